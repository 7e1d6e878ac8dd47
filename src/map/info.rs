// src/map/info.rs
use serde::Serialize;

use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

/// Map metadata (`Minf`). This is the one chunk cheap enough to decode for
/// every entry when building a map picker listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MapInfo {
    pub environment_code: u16,
    pub physics_model: u16,
    pub music_id: u16,
    pub mission_flags: u16,
    pub environment_flags: u16,
    pub name: String,
    pub entry_flags: u32,
}

impl MapInfo {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let environment_code = r.uint16()?;
        let physics_model = r.uint16()?;
        let music_id = r.uint16()?;
        let mission_flags = r.uint16()?;
        let environment_flags = r.uint16()?;
        r.skip(8)?;
        Ok(Self {
            environment_code,
            physics_model,
            music_id,
            mission_flags,
            environment_flags,
            name: r.c_string(66)?,
            entry_flags: r.uint32()?,
        })
    }
}

/// Build the fixed-size payload for a `Minf` chunk. Shared by the decoder
/// tests and the container fixtures.
#[cfg(test)]
pub fn info_bytes(name: &str, mission_flags: u16) -> Vec<u8> {
    let mut data = Vec::new();
    for v in [1u16, 0, 2, mission_flags, 0] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    data.extend_from_slice(&[0; 8]);
    let mut name_field = [0u8; 66];
    name_field[..name.len()].copy_from_slice(name.as_bytes());
    data.extend_from_slice(&name_field);
    data.extend_from_slice(&1u32.to_be_bytes());
    data
}
