// src/map/media.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::index_from_i16;
use super::point::Point;

/// A liquid volume (`medi`, 32 bytes on disk). The referenced light drives
/// the surface height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Media {
    pub media_type: i16,
    pub flags: u16,
    pub light_index: Option<usize>,
    pub current_direction: i16,
    pub current_magnitude: i16,
    pub low: i16,
    pub high: i16,
    pub origin: Point,
    pub height: i16,
    pub minimum_light_intensity: i32,
    pub texture: u16,
    pub transfer_mode: i16,
}

impl Media {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let media = Self {
            media_type: r.int16()?,
            flags: r.uint16()?,
            light_index: index_from_i16(r.int16()?),
            current_direction: r.int16()?,
            current_magnitude: r.int16()?,
            low: r.int16()?,
            high: r.int16()?,
            origin: Point::from_chunk(r)?,
            height: r.int16()?,
            minimum_light_intensity: r.int32()?,
            texture: r.uint16()?,
            transfer_mode: r.int16()?,
        };
        r.skip(4)?;
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_from_chunk() {
        let mut data = Vec::new();
        for v in [1i16, 0, 3, 0, 0, -512, 512] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        for v in [16i16, 32, 0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&19u16.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&[0; 4]);
        assert_eq!(data.len(), 32);

        let mut r = ByteCursor::new(&data);
        let media = Media::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(media.light_index, Some(3));
        assert_eq!(media.origin, Point::new(16, 32));
        assert_eq!(media.texture, 19);
    }
}
