// src/geom/model.rs
//
// The cross-referenced in-memory model of one map entry, plus the edit
// operations on it. Every mutation returns a new MapGeometry; records the
// edit did not touch keep their existing Arc, so unedited maps share
// storage with their successors.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::map::{
    AmbientSound, Frequency, Light, Line, MapInfo, MapObject, Media, Note, Platform, Point,
    Polygon, RandomSound, Side,
};
use crate::wad::chunks::{
    Chunk, TAG_AMBIENT_SOUNDS, TAG_ENDPOINTS, TAG_FREQUENCIES, TAG_INFO, TAG_LIGHTS, TAG_LINES,
    TAG_MEDIA, TAG_NOTES, TAG_OBJECTS, TAG_PLATFORMS, TAG_POINTS, TAG_POLYGONS,
    TAG_RANDOM_SOUNDS, TAG_SIDES,
};
use crate::wad::container::{EntryChunks, Wad};
use crate::wad::error::{Result, WadError};

use super::dependencies::{Dependencies, ObjKind};

/// One map entry decoded into cross-referenced entity arrays.
///
/// Records are held behind `Arc` so that edited snapshots share the records
/// the edit left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapGeometry {
    /// Directory id of the entry this was decoded from.
    pub index: u16,
    pub info: Option<MapInfo>,
    pub points: Vec<Arc<Point>>,
    pub lines: Vec<Arc<Line>>,
    pub sides: Vec<Arc<Side>>,
    pub polygons: Vec<Arc<Polygon>>,
    pub lights: Vec<Arc<Light>>,
    pub objects: Vec<Arc<MapObject>>,
    pub frequencies: Vec<Arc<Frequency>>,
    pub media: Vec<Arc<Media>>,
    pub ambient_sounds: Vec<Arc<AmbientSound>>,
    pub random_sounds: Vec<Arc<RandomSound>>,
    pub platforms: Vec<Arc<Platform>>,
    pub notes: Vec<Arc<Note>>,
}

fn table<T>(items: Vec<T>) -> Vec<Arc<T>> {
    items.into_iter().map(Arc::new).collect()
}

impl MapGeometry {
    /// Build the model from one entry's decoded chunks.
    ///
    /// Point positions come from the editor-format `PNTS` chunk when it is
    /// present, otherwise from the positions embedded in the engine-format
    /// `EPNT` chunk. Chunks the entry lacks become empty arrays.
    pub fn from_entry(index: u16, mut chunks: EntryChunks) -> Self {
        let points = match chunks.take(TAG_POINTS) {
            Some(Chunk::Points(points)) => table(points),
            _ => match chunks.take(TAG_ENDPOINTS) {
                Some(Chunk::Endpoints(endpoints)) => endpoints
                    .into_iter()
                    .map(|e| Arc::new(e.position))
                    .collect(),
                _ => Vec::new(),
            },
        };
        let lines = match chunks.take(TAG_LINES) {
            Some(Chunk::Lines(lines)) => table(lines),
            _ => Vec::new(),
        };
        let sides = match chunks.take(TAG_SIDES) {
            Some(Chunk::Sides(sides)) => table(sides),
            _ => Vec::new(),
        };
        let polygons = match chunks.take(TAG_POLYGONS) {
            Some(Chunk::Polygons(polygons)) => table(polygons),
            _ => Vec::new(),
        };
        let lights = match chunks.take(TAG_LIGHTS) {
            Some(Chunk::Lights(lights)) => table(lights),
            _ => Vec::new(),
        };
        let objects = match chunks.take(TAG_OBJECTS) {
            Some(Chunk::Objects(objects)) => table(objects),
            _ => Vec::new(),
        };
        let frequencies = match chunks.take(TAG_FREQUENCIES) {
            Some(Chunk::Frequencies(frequencies)) => table(frequencies),
            _ => Vec::new(),
        };
        let media = match chunks.take(TAG_MEDIA) {
            Some(Chunk::Media(media)) => table(media),
            _ => Vec::new(),
        };
        let ambient_sounds = match chunks.take(TAG_AMBIENT_SOUNDS) {
            Some(Chunk::AmbientSounds(sounds)) => table(sounds),
            _ => Vec::new(),
        };
        let random_sounds = match chunks.take(TAG_RANDOM_SOUNDS) {
            Some(Chunk::RandomSounds(sounds)) => table(sounds),
            _ => Vec::new(),
        };
        let platforms = match chunks.take(TAG_PLATFORMS) {
            Some(Chunk::Platforms(platforms)) => table(platforms),
            _ => Vec::new(),
        };
        let notes = match chunks.take(TAG_NOTES) {
            Some(Chunk::Notes(notes)) => table(notes),
            _ => Vec::new(),
        };
        let info = match chunks.take(TAG_INFO) {
            Some(Chunk::Info(info)) => Some(info),
            _ => None,
        };

        Self {
            index,
            info,
            points,
            lines,
            sides,
            polygons,
            lights,
            objects,
            frequencies,
            media,
            ambient_sounds,
            random_sounds,
            platforms,
            notes,
        }
    }

    /// Decode the entry with the given directory id.
    pub fn from_wad(wad: &Wad, id: u16) -> Result<Self> {
        Ok(Self::from_entry(id, wad.read_entry(id)?))
    }

    /// Decode every entry of the container, ordered by directory id.
    pub fn read_all(wad: &Wad) -> Result<Vec<Self>> {
        let mut ids = wad.entry_ids();
        ids.sort_unstable();
        ids.into_iter().map(|id| Self::from_wad(wad, id)).collect()
    }

    /// Number of live records of one category.
    pub fn count(&self, kind: ObjKind) -> usize {
        match kind {
            ObjKind::Points => self.points.len(),
            ObjKind::Lines => self.lines.len(),
            ObjKind::Sides => self.sides.len(),
            ObjKind::Polygons => self.polygons.len(),
            ObjKind::Lights => self.lights.len(),
            ObjKind::Objects => self.objects.len(),
            ObjKind::Frequencies => self.frequencies.len(),
            ObjKind::Media => self.media.len(),
            ObjKind::AmbientSounds => self.ambient_sounds.len(),
            ObjKind::RandomSounds => self.random_sounds.len(),
            ObjKind::Platforms => self.platforms.len(),
            ObjKind::Notes => self.notes.len(),
        }
    }

    /// Move one point. A destination outside the legal coordinate range is
    /// rejected and the map comes back unchanged.
    pub fn move_point(&self, index: usize, to: Point) -> Self {
        if !to.in_bounds() {
            return self.clone();
        }
        let mut next = self.clone();
        next.points[index] = Arc::new(to);
        next
    }

    /// Translate a polygon so its first endpoint lands on `to`, carrying all
    /// of its endpoints along. If any endpoint would leave the legal range
    /// nothing moves.
    pub fn move_polygon(&self, index: usize, to: Point) -> Self {
        let polygon = &self.polygons[index];
        let Some(&first) = polygon.endpoints.first() else {
            return self.clone();
        };
        let dx = to.x - self.points[first].x;
        let dy = to.y - self.points[first].y;

        let mut points = self.points.clone();
        for &pt in &polygon.endpoints {
            let moved = points[pt].offset_by(dx, dy);
            if !moved.in_bounds() {
                return self.clone();
            }
            points[pt] = Arc::new(moved);
        }
        Self {
            points,
            ..self.clone()
        }
    }

    /// Delete a point along with every record that depends on it.
    pub fn delete_point(&self, index: usize) -> Self {
        self.remove_and_renumber(&Dependencies::closure(self, ObjKind::Points, index))
    }

    /// Delete a line along with its sides and bordering polygons. The
    /// line's endpoints stay; other lines may still use them.
    pub fn delete_line(&self, index: usize) -> Self {
        self.remove_and_renumber(&Dependencies::closure(self, ObjKind::Lines, index))
    }

    /// Delete a polygon along with its sides and the objects and notes
    /// homed in it. Boundary points and lines stay.
    pub fn delete_polygon(&self, index: usize) -> Self {
        self.remove_and_renumber(&Dependencies::closure(self, ObjKind::Polygons, index))
    }

    /// Drop every record in the closure and rewrite all surviving
    /// cross-references against the compacted arrays.
    ///
    /// Panics if a surviving record holds a required reference to a dead
    /// one; the closure is supposed to make that impossible.
    fn remove_and_renumber(&self, dead: &Dependencies) -> Self {
        let points_map = remap_table(self.points.len(), ObjKind::Points, dead);
        let lines_map = remap_table(self.lines.len(), ObjKind::Lines, dead);
        let sides_map = remap_table(self.sides.len(), ObjKind::Sides, dead);
        let polygons_map = remap_table(self.polygons.len(), ObjKind::Polygons, dead);
        let lights_map = remap_table(self.lights.len(), ObjKind::Lights, dead);
        let media_map = remap_table(self.media.len(), ObjKind::Media, dead);
        let ambient_map = remap_table(self.ambient_sounds.len(), ObjKind::AmbientSounds, dead);
        let random_map = remap_table(self.random_sounds.len(), ObjKind::RandomSounds, dead);
        let objects_map = remap_table(self.objects.len(), ObjKind::Objects, dead);
        let frequencies_map = remap_table(self.frequencies.len(), ObjKind::Frequencies, dead);
        let platforms_map = remap_table(self.platforms.len(), ObjKind::Platforms, dead);
        let notes_map = remap_table(self.notes.len(), ObjKind::Notes, dead);

        let mut next = Self {
            index: self.index,
            info: self.info.clone(),
            points: compact(&self.points, &points_map),
            lines: compact(&self.lines, &lines_map),
            sides: compact(&self.sides, &sides_map),
            polygons: compact(&self.polygons, &polygons_map),
            lights: compact(&self.lights, &lights_map),
            objects: compact(&self.objects, &objects_map),
            frequencies: compact(&self.frequencies, &frequencies_map),
            media: compact(&self.media, &media_map),
            ambient_sounds: compact(&self.ambient_sounds, &ambient_map),
            random_sounds: compact(&self.random_sounds, &random_map),
            platforms: compact(&self.platforms, &platforms_map),
            notes: compact(&self.notes, &notes_map),
        };

        for slot in next.lines.iter_mut() {
            let mut line = (**slot).clone();
            line.begin = remap_required(&points_map, line.begin, "line begin point");
            line.end = remap_required(&points_map, line.end, "line end point");
            line.front_side = remap_opt(&sides_map, line.front_side);
            line.back_side = remap_opt(&sides_map, line.back_side);
            line.front_poly = remap_opt(&polygons_map, line.front_poly);
            line.back_poly = remap_opt(&polygons_map, line.back_poly);
            replace_if_changed(slot, line);
        }

        for slot in next.sides.iter_mut() {
            let mut side = (**slot).clone();
            side.polygon_index = remap_opt(&polygons_map, side.polygon_index);
            side.line_index = remap_opt(&lines_map, side.line_index);
            side.primary_lightsource = remap_opt(&lights_map, side.primary_lightsource);
            side.secondary_lightsource = remap_opt(&lights_map, side.secondary_lightsource);
            side.transparent_lightsource = remap_opt(&lights_map, side.transparent_lightsource);
            replace_if_changed(slot, side);
        }

        for slot in next.polygons.iter_mut() {
            let mut polygon = (**slot).clone();
            for endpoint in polygon.endpoints.iter_mut() {
                *endpoint = remap_required(&points_map, *endpoint, "polygon endpoint");
            }
            for line in polygon.lines.iter_mut() {
                *line = remap_required(&lines_map, *line, "polygon boundary line");
            }
            for side in polygon.sides.iter_mut() {
                *side = remap_opt(&sides_map, *side);
            }
            for adjacent in polygon.adjacent_polygons.iter_mut() {
                *adjacent = remap_opt(&polygons_map, *adjacent);
            }
            polygon.floor_lightsource = remap_opt(&lights_map, polygon.floor_lightsource);
            polygon.ceiling_lightsource = remap_opt(&lights_map, polygon.ceiling_lightsource);
            polygon.media_index = remap_opt(&media_map, polygon.media_index);
            polygon.media_lightsource = remap_opt(&lights_map, polygon.media_lightsource);
            polygon.ambient_sound = remap_opt(&ambient_map, polygon.ambient_sound);
            polygon.random_sound = remap_opt(&random_map, polygon.random_sound);
            replace_if_changed(slot, polygon);
        }

        for slot in next.objects.iter_mut() {
            let mut object = (**slot).clone();
            object.polygon = remap_opt(&polygons_map, object.polygon);
            replace_if_changed(slot, object);
        }

        for slot in next.notes.iter_mut() {
            let mut note = (**slot).clone();
            note.polygon_index = remap_opt(&polygons_map, note.polygon_index);
            replace_if_changed(slot, note);
        }

        for slot in next.platforms.iter_mut() {
            let mut platform = (**slot).clone();
            platform.polygon_index = remap_opt(&polygons_map, platform.polygon_index);
            replace_if_changed(slot, platform);
        }

        for slot in next.media.iter_mut() {
            let mut media = (**slot).clone();
            media.light_index = remap_opt(&lights_map, media.light_index);
            replace_if_changed(slot, media);
        }

        debug!(
            "renumber: {} -> {} polygons, {} -> {} lines, {} -> {} points",
            self.polygons.len(),
            next.polygons.len(),
            self.lines.len(),
            next.lines.len(),
            self.points.len(),
            next.points.len()
        );

        next
    }

    /// Content checksum over the geometry arrays, for change detection. The
    /// three big arrays hash in parallel.
    pub fn checksum(&self) -> u32 {
        let points = self
            .points
            .par_iter()
            .map(|p| point_crc(p))
            .reduce(|| 0u32, u32::wrapping_add);
        let lines = self
            .lines
            .par_iter()
            .map(|l| line_crc(l))
            .reduce(|| 0u32, u32::wrapping_add);
        let polygons = self
            .polygons
            .par_iter()
            .map(|p| polygon_crc(p))
            .reduce(|| 0u32, u32::wrapping_add);
        points
            .wrapping_add(lines.wrapping_mul(3))
            .wrapping_add(polygons.wrapping_mul(5))
    }
}

/// Old index -> new index for one category; `None` marks a dead record.
fn remap_table(len: usize, kind: ObjKind, dead: &Dependencies) -> Vec<Option<usize>> {
    let mut table = Vec::with_capacity(len);
    let mut next = 0usize;
    for i in 0..len {
        if dead.contains(kind, i) {
            table.push(None);
        } else {
            table.push(Some(next));
            next += 1;
        }
    }
    table
}

/// Keep the survivors, preserving order. Survivors keep their Arc.
fn compact<T>(records: &[Arc<T>], table: &[Option<usize>]) -> Vec<Arc<T>> {
    records
        .iter()
        .zip(table)
        .filter(|(_, slot)| slot.is_some())
        .map(|(record, _)| Arc::clone(record))
        .collect()
}

fn remap_opt(table: &[Option<usize>], index: Option<usize>) -> Option<usize> {
    index.and_then(|i| table.get(i).copied().flatten())
}

fn remap_required(table: &[Option<usize>], index: usize, what: &str) -> usize {
    match table.get(index).copied().flatten() {
        Some(new_index) => new_index,
        None => panic!(
            "{}",
            WadError::InvariantViolation(format!(
                "{} {} survived the deletion of its target",
                what, index
            ))
        ),
    }
}

/// Swap in the rewritten record only if renumbering actually changed it, so
/// untouched records stay shared with the previous snapshot.
fn replace_if_changed<T: PartialEq>(slot: &mut Arc<T>, rewritten: T) {
    if **slot != rewritten {
        *slot = Arc::new(rewritten);
    }
}

fn crc_push(crc: u32, value: i32) -> u32 {
    crc.wrapping_mul(31).wrapping_add(value as u32)
}

fn crc_push_ref(crc: u32, index: Option<usize>) -> u32 {
    crc_push(crc, index.map_or(-1, |i| i as i32))
}

fn point_crc(p: &Point) -> u32 {
    crc_push(crc_push(17, p.x), p.y)
}

fn line_crc(l: &Line) -> u32 {
    let mut crc = 17;
    crc = crc_push(crc, l.begin as i32);
    crc = crc_push(crc, l.end as i32);
    crc = crc_push(crc, l.flags as i32);
    crc = crc_push_ref(crc, l.front_side);
    crc = crc_push_ref(crc, l.back_side);
    crc = crc_push_ref(crc, l.front_poly);
    crc_push_ref(crc, l.back_poly)
}

fn polygon_crc(p: &Polygon) -> u32 {
    let mut crc = 17;
    crc = crc_push(crc, p.poly_type as i32);
    crc = crc_push(crc, p.floor_height as i32);
    crc = crc_push(crc, p.ceiling_height as i32);
    for &endpoint in &p.endpoints {
        crc = crc_push(crc, endpoint as i32);
    }
    for &line in &p.lines {
        crc = crc_push(crc, line as i32);
    }
    for &side in &p.sides {
        crc = crc_push_ref(crc, side);
    }
    crc
}
