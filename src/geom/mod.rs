// src/geom/mod.rs
pub mod dependencies;
pub mod model;
pub mod queries;

pub use dependencies::{Dependencies, ObjKind};
pub use model::MapGeometry;
pub use queries::{
    closest_line, closest_point, is_convex, polygon_contains, polygons_at, ClosestLine,
};
