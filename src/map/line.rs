// src/map/line.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_u16;

/// A map line joining two points (`LINS`, 32 bytes on disk).
///
/// With both polygon references set the line is a portal between two
/// polygons; with one set it is a solid wall.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub begin: usize,
    pub end: usize,
    pub flags: u16,
    pub length: u16,
    pub highest_floor: u16,
    pub highest_ceiling: u16,
    pub front_side: Option<usize>,
    pub back_side: Option<usize>,
    pub front_poly: Option<usize>,
    pub back_poly: Option<usize>,
}

impl Line {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let line = Self {
            begin: r.uint16()? as usize,
            end: r.uint16()? as usize,
            flags: r.uint16()?,
            length: r.uint16()?,
            highest_floor: r.uint16()?,
            highest_ceiling: r.uint16()?,
            front_side: index_from_u16(r.uint16()?),
            back_side: index_from_u16(r.uint16()?),
            front_poly: index_from_u16(r.uint16()?),
            back_poly: index_from_u16(r.uint16()?),
        };
        r.skip(12)?;
        Ok(line)
    }

    pub fn is_portal(&self) -> bool {
        self.front_poly.is_some() && self.back_poly.is_some()
    }

    pub fn is_solid_wall(&self) -> bool {
        self.front_poly.is_some() != self.back_poly.is_some()
    }
}
