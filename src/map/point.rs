// src/map/point.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_u16;

/// A 2D map coordinate.
///
/// Stored wider than the on-disk 16-bit type so that edits which would leave
/// the legal range can be detected and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            x: r.int16()? as i32,
            y: r.int16()? as i32,
        })
    }

    /// True if both coordinates fit the 16-bit signed on-disk range.
    pub fn in_bounds(&self) -> bool {
        (-0x8000..=0x7fff).contains(&self.x) && (-0x8000..=0x7fff).contains(&self.y)
    }

    pub fn offset_by(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Runtime endpoint record (`EPNT`), as the engine saves it back out.
/// Carries the same position as a bare point plus cached height data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub flags: u16,
    pub highest_floor: i16,
    pub lowest_ceiling: i16,
    pub position: Point,
    pub transformed: Point,
    pub supporting_polygon: Option<usize>,
}

impl Endpoint {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            flags: r.uint16()?,
            highest_floor: r.int16()?,
            lowest_ceiling: r.int16()?,
            position: Point::from_chunk(r)?,
            transformed: Point::from_chunk(r)?,
            supporting_polygon: index_from_u16(r.uint16()?),
        })
    }
}
