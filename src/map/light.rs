// src/map/light.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

/// One phase of a light's intensity waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightingFunction {
    pub function: i16,
    pub period: i16,
    pub delta_period: i16,
    pub intensity: i32,
    pub delta_intensity: i32,
}

impl LightingFunction {
    fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            function: r.int16()?,
            period: r.int16()?,
            delta_period: r.int16()?,
            intensity: r.int32()?,
            delta_intensity: r.int32()?,
        })
    }
}

/// A light definition (`LITE`, 100 bytes on disk). Lights do not reference
/// other records; sides, polygons and media reference lights.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Light {
    pub light_type: i16,
    pub flags: u16,
    pub phase: i16,
    pub primary_active: LightingFunction,
    pub secondary_active: LightingFunction,
    pub becoming_active: LightingFunction,
    pub primary_inactive: LightingFunction,
    pub secondary_inactive: LightingFunction,
    pub becoming_inactive: LightingFunction,
    pub tag: i16,
}

impl Light {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let light = Self {
            light_type: r.int16()?,
            flags: r.uint16()?,
            phase: r.int16()?,
            primary_active: LightingFunction::from_chunk(r)?,
            secondary_active: LightingFunction::from_chunk(r)?,
            becoming_active: LightingFunction::from_chunk(r)?,
            primary_inactive: LightingFunction::from_chunk(r)?,
            secondary_inactive: LightingFunction::from_chunk(r)?,
            becoming_inactive: LightingFunction::from_chunk(r)?,
            tag: r.int16()?,
        };
        r.skip(8)?;
        Ok(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_from_chunk() {
        let mut data = Vec::new();
        data.extend_from_slice(&1i16.to_be_bytes()); // type
        data.extend_from_slice(&0u16.to_be_bytes()); // flags
        data.extend_from_slice(&0i16.to_be_bytes()); // phase
        for _ in 0..6 {
            data.extend_from_slice(&0i16.to_be_bytes());
            data.extend_from_slice(&30i16.to_be_bytes());
            data.extend_from_slice(&0i16.to_be_bytes());
            data.extend_from_slice(&0x10000i32.to_be_bytes());
            data.extend_from_slice(&0i32.to_be_bytes());
        }
        data.extend_from_slice(&0i16.to_be_bytes()); // tag
        data.extend_from_slice(&[0; 8]);
        assert_eq!(data.len(), 100);

        let mut r = ByteCursor::new(&data);
        let light = Light::from_chunk(&mut r).unwrap();
        assert!(r.eof());
        assert_eq!(light.light_type, 1);
        assert_eq!(light.primary_active.period, 30);
        assert_eq!(light.becoming_inactive.intensity, 0x10000);
    }
}
