// src/lib.rs

pub mod geom;
pub mod map;
pub mod wad;
