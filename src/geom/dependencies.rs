// src/geom/dependencies.rs

use std::collections::{HashMap, HashSet};

use super::model::MapGeometry;

/// The record categories a map stores, one per entity array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjKind {
    Points,
    Lines,
    Sides,
    Polygons,
    Lights,
    Objects,
    Frequencies,
    Media,
    AmbientSounds,
    RandomSounds,
    Platforms,
    Notes,
}

impl ObjKind {
    pub fn all() -> &'static [ObjKind] {
        &[
            ObjKind::Points,
            ObjKind::Lines,
            ObjKind::Sides,
            ObjKind::Polygons,
            ObjKind::Lights,
            ObjKind::Objects,
            ObjKind::Frequencies,
            ObjKind::Media,
            ObjKind::AmbientSounds,
            ObjKind::RandomSounds,
            ObjKind::Platforms,
            ObjKind::Notes,
        ]
    }
}

/// The set of records that must be deleted together.
///
/// A record B depends on record A if B cannot exist once A is gone: a line
/// depends on its two endpoints, a polygon on each of its boundary sides.
#[derive(Debug, Default)]
pub struct Dependencies {
    dead: HashMap<ObjKind, HashSet<usize>>,
}

impl Dependencies {
    /// Mark one record dead. Returns false if it already was, which is what
    /// terminates the traversal across the Line/Side/Polygon reference
    /// cycle.
    fn insert(&mut self, kind: ObjKind, index: usize) -> bool {
        self.dead.entry(kind).or_default().insert(index)
    }

    pub fn contains(&self, kind: ObjKind, index: usize) -> bool {
        self.dead.get(&kind).map_or(false, |set| set.contains(&index))
    }

    pub fn count(&self, kind: ObjKind) -> usize {
        self.dead.get(&kind).map_or(0, HashSet::len)
    }

    /// Collect the transitive deletion closure rooted at one record, with an
    /// explicit worklist rather than recursion.
    pub fn closure(map: &MapGeometry, root_kind: ObjKind, root_index: usize) -> Self {
        let mut deps = Self::default();
        let mut worklist = vec![(root_kind, root_index)];

        while let Some((kind, index)) = worklist.pop() {
            if !deps.insert(kind, index) {
                continue;
            }
            match kind {
                ObjKind::Points => {
                    // A line cannot exist without both endpoints.
                    for (i, line) in map.lines.iter().enumerate() {
                        if line.begin == index || line.end == index {
                            worklist.push((ObjKind::Lines, i));
                        }
                    }
                }
                ObjKind::Lines => {
                    let line = &map.lines[index];
                    for side in [line.front_side, line.back_side].into_iter().flatten() {
                        worklist.push((ObjKind::Sides, side));
                    }
                    // A polygon cannot exist with a missing boundary line.
                    for poly in [line.front_poly, line.back_poly].into_iter().flatten() {
                        worklist.push((ObjKind::Polygons, poly));
                    }
                }
                ObjKind::Sides => {
                    if let Some(poly) = map.sides[index].polygon_index {
                        worklist.push((ObjKind::Polygons, poly));
                    }
                }
                ObjKind::Polygons => {
                    let polygon = &map.polygons[index];
                    for side in polygon.sides.iter().copied().flatten() {
                        worklist.push((ObjKind::Sides, side));
                    }
                    // Objects and notes are owned by their home polygon.
                    for (i, object) in map.objects.iter().enumerate() {
                        if object.polygon == Some(index) {
                            worklist.push((ObjKind::Objects, i));
                        }
                    }
                    for (i, note) in map.notes.iter().enumerate() {
                        if note.polygon_index == Some(index) {
                            worklist.push((ObjKind::Notes, i));
                        }
                    }
                    // Deliberately not the polygon's points or lines: the
                    // boundary is shared with neighboring polygons and
                    // outlives this one.
                }
                // Leaf categories pull nothing else in.
                _ => {}
            }
        }

        deps
    }
}
