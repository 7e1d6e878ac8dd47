// src/geom/queries.rs
//
// Read-only spatial lookups over a decoded map. All integer arithmetic is
// widened to i64 before multiplying so coordinate extremes cannot overflow.

use crate::map::Point;

use super::model::MapGeometry;

fn dot(ax: i64, ay: i64, bx: i64, by: i64) -> i64 {
    ax * bx + ay * by
}

fn distance_squared(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

fn distance(a: Point, b: Point) -> f64 {
    (distance_squared(a, b) as f64).sqrt()
}

/// Even-odd test of one polygon against a point, walking the polygon's
/// boundary lines. Each edge counts when it spans the query's y half-open
/// (so an edge endpoint is counted exactly once between the two edges that
/// share it) and crosses at or left of the query's x.
pub fn polygon_contains(p: Point, map: &MapGeometry, polygon_index: usize) -> bool {
    let polygon = &map.polygons[polygon_index];
    let mut inside = false;
    for &line_index in &polygon.lines {
        let line = &map.lines[line_index];
        let begin = *map.points[line.begin];
        let end = *map.points[line.end];
        let spans = (begin.y <= p.y && p.y < end.y) || (begin.y > p.y && p.y >= end.y);
        if !spans {
            continue;
        }
        let t = (p.y - begin.y) as f64 / (end.y - begin.y) as f64;
        let crossing_x = begin.x as f64 + t * (end.x - begin.x) as f64;
        if crossing_x <= p.x as f64 {
            inside = !inside;
        }
    }
    inside
}

/// Indexes of every polygon whose interior holds the point, ascending.
pub fn polygons_at(p: Point, map: &MapGeometry) -> Vec<usize> {
    (0..map.polygons.len())
        .filter(|&i| polygon_contains(p, map, i))
        .collect()
}

/// Index of the point nearest the query, earliest index winning ties.
/// `None` on an empty map.
pub fn closest_point(p: Point, map: &MapGeometry) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, candidate) in map.points.iter().enumerate() {
        let d = distance_squared(p, **candidate);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// The nearest line and how far away it is.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestLine {
    pub index: usize,
    pub distance: f64,
}

/// Distance from a point to a line segment: perpendicular distance when the
/// projection lands inside the segment, distance to the nearer endpoint
/// otherwise.
fn segment_distance(p: Point, begin: Point, end: Point) -> f64 {
    let dir_x = (end.x - begin.x) as i64;
    let dir_y = (end.y - begin.y) as i64;
    let length_squared = dot(dir_x, dir_y, dir_x, dir_y);
    if length_squared == 0 {
        // Degenerate segment, both endpoints coincide.
        return distance(p, begin);
    }
    let t = dot(dir_x, dir_y, (p.x - begin.x) as i64, (p.y - begin.y) as i64);
    if t <= 0 {
        distance(p, begin)
    } else if t >= length_squared {
        distance(p, end)
    } else {
        let s = t as f64 / length_squared as f64;
        let proj_x = begin.x as f64 + s * dir_x as f64;
        let proj_y = begin.y as f64 + s * dir_y as f64;
        let dx = p.x as f64 - proj_x;
        let dy = p.y as f64 - proj_y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The line nearest the query, earliest index winning ties. `None` on a map
/// with no lines.
pub fn closest_line(p: Point, map: &MapGeometry) -> Option<ClosestLine> {
    let mut best: Option<ClosestLine> = None;
    for (i, line) in map.lines.iter().enumerate() {
        let d = segment_distance(p, *map.points[line.begin], *map.points[line.end]);
        if best.as_ref().map_or(true, |b| d < b.distance) {
            best = Some(ClosestLine {
                index: i,
                distance: d,
            });
        }
    }
    best
}

/// True when the closed ring of points never turns both ways. Collinear
/// triples are neutral, so a square with a redundant mid-edge point still
/// counts as convex. Rings of fewer than three points are trivially convex.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return true;
    }
    let mut winding = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = ((b.x - a.x) as i64) * ((c.y - b.y) as i64)
            - ((b.y - a.y) as i64) * ((c.x - b.x) as i64);
        let turn = cross.signum();
        if turn != 0 {
            if winding != 0 && winding != turn {
                return false;
            }
            winding = turn;
        }
    }
    true
}
