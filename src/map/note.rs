// src/map/note.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_i16;
use super::point::Point;

/// An overhead-view annotation (`NOTE`, 72 bytes on disk), owned by the
/// polygon it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    pub note_type: i16,
    pub location: Point,
    pub polygon_index: Option<usize>,
    pub text: String,
}

impl Note {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            note_type: r.int16()?,
            location: Point::from_chunk(r)?,
            polygon_index: index_from_i16(r.int16()?),
            text: r.c_string(64)?,
        })
    }
}
