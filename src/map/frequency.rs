// src/map/frequency.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

/// Monster/item placement frequency (`plac`, 12 bytes on disk).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frequency {
    pub flags: u16,
    pub initial_count: i16,
    pub minimum_count: i16,
    pub maximum_count: i16,
    pub random_count: i16,
    pub random_chance: u16,
}

impl Frequency {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            flags: r.uint16()?,
            initial_count: r.int16()?,
            minimum_count: r.int16()?,
            maximum_count: r.int16()?,
            random_count: r.int16()?,
            random_chance: r.uint16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_chunk() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_be_bytes());
        for v in [2i16, 0, 8, -1] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&0x8000u16.to_be_bytes());
        let mut r = ByteCursor::new(&data);
        let freq = Frequency::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(freq.maximum_count, 8);
        assert_eq!(freq.random_chance, 0x8000);
    }
}
