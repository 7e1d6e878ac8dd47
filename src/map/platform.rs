// src/map/platform.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_i16;

/// A moving floor/ceiling (`plat`, 32 bytes on disk), attached to one
/// polygon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Platform {
    pub platform_type: i16,
    pub speed: i16,
    pub delay: i16,
    pub maximum_height: i16,
    pub minimum_height: i16,
    pub static_flags: u32,
    pub polygon_index: Option<usize>,
    pub tag: i16,
}

impl Platform {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let platform = Self {
            platform_type: r.int16()?,
            speed: r.int16()?,
            delay: r.int16()?,
            maximum_height: r.int16()?,
            minimum_height: r.int16()?,
            static_flags: r.uint32()?,
            polygon_index: index_from_i16(r.int16()?),
            tag: r.int16()?,
        };
        r.skip(14)?;
        Ok(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_chunk() {
        let mut data = Vec::new();
        for v in [0i16, 35, 30, 512, -512] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&0x8000_0001u32.to_be_bytes());
        data.extend_from_slice(&4i16.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&[0; 14]);
        assert_eq!(data.len(), 32);

        let mut r = ByteCursor::new(&data);
        let platform = Platform::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(platform.static_flags, 0x8000_0001);
        assert_eq!(platform.polygon_index, Some(4));
        assert_eq!(platform.minimum_height, -512);
    }
}
