// src/wad/mod.rs
pub mod chunks;
pub mod container;
pub mod cursor;
pub mod error;
pub mod macbinary;

pub use chunks::{Chunk, ChunkRegistry};
pub use container::{DirectoryEntry, EntryChunks, MapSummary, Wad, WadHeader};
pub use cursor::ByteCursor;
pub use error::{Result, WadError};
