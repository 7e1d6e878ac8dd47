// src/map/object.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_u16;

/// A placed object: player start, monster, item or scenery (`OBJS`,
/// 16 bytes on disk). Objects are owned by the polygon they stand in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapObject {
    pub object_type: u16,
    pub type_index: u16,
    pub facing: i16,
    pub polygon: Option<usize>,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub flags: u16,
}

impl MapObject {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            object_type: r.uint16()?,
            type_index: r.uint16()?,
            facing: r.int16()?,
            polygon: index_from_u16(r.uint16()?),
            x: r.int16()?,
            y: r.int16()?,
            z: r.int16()?,
            flags: r.uint16()?,
        })
    }
}
