// src/wad/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WadError>;

/// Errors raised while decoding a WAD container.
///
/// Parse errors abort the entry being decoded and propagate; they never
/// touch a previously constructed map. `InvariantViolation` is different in
/// kind: it marks a broken cross-reference invariant after a mutation, which
/// is a bug rather than a data problem, and is raised as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WadError {
    #[error("unexpected end of data")]
    UnexpectedEndOfData,

    #[error("seek past end of data: {0}")]
    SeekOutOfRange(usize),

    #[error("entry {0} not found")]
    EntryNotFound(u16),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
