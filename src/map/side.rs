// src/map/side.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_i16;

/// Texture placement for one surface of a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideTexture {
    pub x: i16,
    pub y: i16,
    pub texture: u16,
}

impl SideTexture {
    fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            x: r.int16()?,
            y: r.int16()?,
            texture: r.uint16()?,
        })
    }
}

/// One textured face of a line (`SIDS`, 64 bytes on disk).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Side {
    pub side_type: u16,
    pub flags: u16,
    pub primary_texture: SideTexture,
    pub secondary_texture: SideTexture,
    pub transparent_texture: SideTexture,
    pub control_panel_type: i16,
    pub control_panel_permutation: i16,
    pub primary_transfer_mode: i16,
    pub secondary_transfer_mode: i16,
    pub transparent_transfer_mode: i16,
    pub polygon_index: Option<usize>,
    pub line_index: Option<usize>,
    pub primary_lightsource: Option<usize>,
    pub secondary_lightsource: Option<usize>,
    pub transparent_lightsource: Option<usize>,
    pub ambient_delta: i32,
}

impl Side {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let side_type = r.uint16()?;
        let flags = r.uint16()?;
        let primary_texture = SideTexture::from_chunk(r)?;
        let secondary_texture = SideTexture::from_chunk(r)?;
        let transparent_texture = SideTexture::from_chunk(r)?;
        r.skip(16)?; // collision exclusion zone, runtime only
        let side = Self {
            side_type,
            flags,
            primary_texture,
            secondary_texture,
            transparent_texture,
            control_panel_type: r.int16()?,
            control_panel_permutation: r.int16()?,
            primary_transfer_mode: r.int16()?,
            secondary_transfer_mode: r.int16()?,
            transparent_transfer_mode: r.int16()?,
            polygon_index: index_from_i16(r.int16()?),
            line_index: index_from_i16(r.int16()?),
            primary_lightsource: index_from_i16(r.int16()?),
            secondary_lightsource: index_from_i16(r.int16()?),
            transparent_lightsource: index_from_i16(r.int16()?),
            ambient_delta: r.int32()?,
        };
        r.skip(2)?;
        Ok(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_chunk() {
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes()); // type
        data.extend_from_slice(&1u16.to_be_bytes()); // flags
        for _ in 0..3 {
            data.extend_from_slice(&[0; 6]); // texture definitions
        }
        data.extend_from_slice(&[0; 16]); // exclusion zone
        for v in [-1i16, -1, 0, 0, 0, 5, 9, 2, -1, -1] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&0i32.to_be_bytes()); // ambient delta
        data.extend_from_slice(&[0; 2]);
        assert_eq!(data.len(), 64);

        let mut r = ByteCursor::new(&data);
        let side = Side::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(side.polygon_index, Some(5));
        assert_eq!(side.line_index, Some(9));
        assert_eq!(side.primary_lightsource, Some(2));
        assert_eq!(side.secondary_lightsource, None);
        assert_eq!(side.control_panel_type, -1);
    }
}
