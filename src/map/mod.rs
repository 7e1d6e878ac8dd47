// src/map/mod.rs
pub mod frequency;
pub mod info;
pub mod light;
pub mod line;
pub mod media;
pub mod note;
pub mod object;
pub mod platform;
pub mod point;
pub mod polygon;
pub mod side;
pub mod sound;

pub use frequency::Frequency;
pub use info::MapInfo;
pub use light::Light;
pub use line::Line;
pub use media::Media;
pub use note::Note;
pub use object::MapObject;
pub use platform::Platform;
pub use point::{Endpoint, Point};
pub use polygon::Polygon;
pub use side::Side;
pub use sound::{AmbientSound, RandomSound};

/// On-disk "no reference" sentinel for unsigned index fields.
pub const NO_INDEX: u16 = 0xffff;

/// Decode an unsigned on-disk index, mapping the 0xffff sentinel to `None`.
///
/// Cross-references are stored as `Option<usize>` everywhere in the model;
/// the sentinel never participates in arithmetic.
pub fn index_from_u16(raw: u16) -> Option<usize> {
    if raw == NO_INDEX {
        None
    } else {
        Some(raw as usize)
    }
}

/// Decode a signed on-disk index; -1 (and any other negative) is `None`.
pub fn index_from_i16(raw: i16) -> Option<usize> {
    if raw < 0 {
        None
    } else {
        Some(raw as usize)
    }
}
