// src/map/sound.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

/// A looping background sound (`ambi`, 16 bytes on disk).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmbientSound {
    pub flags: u16,
    pub sound_index: i16,
    pub volume: i16,
}

impl AmbientSound {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let sound = Self {
            flags: r.uint16()?,
            sound_index: r.int16()?,
            volume: r.int16()?,
        };
        r.skip(10)?;
        Ok(sound)
    }
}

/// An intermittently triggered sound (`bonk`, 32 bytes on disk).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RandomSound {
    pub flags: u16,
    pub sound_index: i16,
    pub volume: i16,
    pub delta_volume: i16,
    pub period: i16,
    pub delta_period: i16,
    pub direction: i16,
    pub delta_direction: i16,
    pub pitch: i32,
    pub delta_pitch: i32,
    pub phase: i16,
}

impl RandomSound {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let sound = Self {
            flags: r.uint16()?,
            sound_index: r.int16()?,
            volume: r.int16()?,
            delta_volume: r.int16()?,
            period: r.int16()?,
            delta_period: r.int16()?,
            direction: r.int16()?,
            delta_direction: r.int16()?,
            pitch: r.int32()?,
            delta_pitch: r.int32()?,
            phase: r.int16()?,
        };
        r.skip(6)?;
        Ok(sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_sound_from_chunk() {
        let mut data = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&12i16.to_be_bytes());
        data.extend_from_slice(&256i16.to_be_bytes());
        data.extend_from_slice(&[0; 10]);
        let mut r = ByteCursor::new(&data);
        let sound = AmbientSound::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(sound.sound_index, 12);
        assert_eq!(sound.volume, 256);
    }

    #[test]
    fn test_random_sound_from_chunk() {
        let mut data = Vec::new();
        for v in [0i16, 20, 128, 0, 60, 30, 0, 0] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&0x10000i32.to_be_bytes());
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&[0; 6]);
        assert_eq!(data.len(), 32);

        let mut r = ByteCursor::new(&data);
        let sound = RandomSound::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(sound.sound_index, 20);
        assert_eq!(sound.period, 60);
        assert_eq!(sound.pitch, 0x10000);
    }
}
