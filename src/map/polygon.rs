// src/map/polygon.rs
use crate::wad::cursor::ByteCursor;
use crate::wad::error::Result;

use super::{index_from_u16, NO_INDEX};

/// A convex floor/ceiling cell (`POLY`, 128 bytes on disk).
///
/// The on-disk record always carries eight slots for each per-vertex list;
/// only the first `vertex_count` are meaningful and only those are kept, so
/// `endpoints`, `lines`, `sides` and `adjacent_polygons` are always the same
/// length. `endpoints[i]` and `lines[i]` describe the edge from
/// `endpoints[i]` to `endpoints[(i + 1) % n]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub poly_type: u16,
    pub flags: u16,
    pub permutation: u16,
    pub vertex_count: usize,
    pub endpoints: Vec<usize>,
    pub lines: Vec<usize>,
    pub floor_texture: u16,
    pub ceiling_texture: u16,
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_lightsource: Option<usize>,
    pub ceiling_lightsource: Option<usize>,
    pub area: i32,
    pub first_object: u16,
    pub first_exclusion_zone: u16,
    pub line_exclusion_zone_count: u16,
    pub point_exclusion_zone_count: u16,
    pub floor_transfer_mode: u16,
    pub ceiling_transfer_mode: u16,
    pub adjacent_polygons: Vec<Option<usize>>,
    pub first_neighbor: u16,
    pub neighbor_count: u16,
    pub center: [u16; 2],
    pub sides: Vec<Option<usize>>,
    pub floor_origin: [u16; 2],
    pub ceiling_origin: [u16; 2],
    pub media_index: Option<usize>,
    pub media_lightsource: Option<usize>,
    pub sound_source_indexes: u16,
    pub ambient_sound: Option<usize>,
    pub random_sound: Option<usize>,
}

const SLOT_COUNT: usize = 8;

fn read_slots(r: &mut ByteCursor) -> Result<[u16; SLOT_COUNT]> {
    let mut slots = [NO_INDEX; SLOT_COUNT];
    for slot in slots.iter_mut() {
        *slot = r.uint16()?;
    }
    Ok(slots)
}

fn read_pair(r: &mut ByteCursor) -> Result<[u16; 2]> {
    Ok([r.uint16()?, r.uint16()?])
}

impl Polygon {
    pub fn from_chunk(r: &mut ByteCursor) -> Result<Self> {
        let poly_type = r.uint16()?;
        let flags = r.uint16()?;
        let permutation = r.uint16()?;
        let vertex_count = (r.uint16()? as usize).min(SLOT_COUNT);
        let endpoint_slots = read_slots(r)?;
        let line_slots = read_slots(r)?;
        let floor_texture = r.uint16()?;
        let ceiling_texture = r.uint16()?;
        let floor_height = r.int16()?;
        let ceiling_height = r.int16()?;
        let floor_lightsource = index_from_u16(r.uint16()?);
        let ceiling_lightsource = index_from_u16(r.uint16()?);
        let area = r.int32()?;
        let first_object = r.uint16()?;
        let first_exclusion_zone = r.uint16()?;
        let line_exclusion_zone_count = r.uint16()?;
        let point_exclusion_zone_count = r.uint16()?;
        let floor_transfer_mode = r.uint16()?;
        let ceiling_transfer_mode = r.uint16()?;
        let adjacent_slots = read_slots(r)?;
        let first_neighbor = r.uint16()?;
        let neighbor_count = r.uint16()?;
        let center = read_pair(r)?;
        let side_slots = read_slots(r)?;
        let floor_origin = read_pair(r)?;
        let ceiling_origin = read_pair(r)?;
        let media_index = index_from_u16(r.uint16()?);
        let media_lightsource = index_from_u16(r.uint16()?);
        let sound_source_indexes = r.uint16()?;
        let ambient_sound = index_from_u16(r.uint16()?);
        let random_sound = index_from_u16(r.uint16()?);
        r.skip(2)?;

        Ok(Self {
            poly_type,
            flags,
            permutation,
            vertex_count,
            endpoints: endpoint_slots[..vertex_count]
                .iter()
                .map(|&v| v as usize)
                .collect(),
            lines: line_slots[..vertex_count]
                .iter()
                .map(|&v| v as usize)
                .collect(),
            floor_texture,
            ceiling_texture,
            floor_height,
            ceiling_height,
            floor_lightsource,
            ceiling_lightsource,
            area,
            first_object,
            first_exclusion_zone,
            line_exclusion_zone_count,
            point_exclusion_zone_count,
            floor_transfer_mode,
            ceiling_transfer_mode,
            adjacent_polygons: adjacent_slots[..vertex_count]
                .iter()
                .map(|&v| index_from_u16(v))
                .collect(),
            first_neighbor,
            neighbor_count,
            center,
            sides: side_slots[..vertex_count]
                .iter()
                .map(|&v| index_from_u16(v))
                .collect(),
            floor_origin,
            ceiling_origin,
            media_index,
            media_lightsource,
            sound_source_indexes,
            ambient_sound,
            random_sound,
        })
    }
}
