// src/wad/chunks.rs
//
// Chunk tag -> decoder dispatch. Entity-table chunks use the array shape
// (one record parsed repeatedly until the payload is exhausted); singleton
// chunks like `Minf` use the scalar shape. Tags nobody registered are kept
// as raw payload bytes so unrecognized chunk types still reach the caller.

use std::collections::HashMap;

use crate::map::{
    AmbientSound, Endpoint, Frequency, Light, Line, MapInfo, MapObject, Media, Note, Platform,
    Point, Polygon, RandomSound, Side,
};

use super::cursor::ByteCursor;
use super::error::Result;

pub const TAG_POINTS: &str = "PNTS";
pub const TAG_ENDPOINTS: &str = "EPNT";
pub const TAG_LINES: &str = "LINS";
pub const TAG_POLYGONS: &str = "POLY";
pub const TAG_SIDES: &str = "SIDS";
pub const TAG_LIGHTS: &str = "LITE";
pub const TAG_OBJECTS: &str = "OBJS";
pub const TAG_FREQUENCIES: &str = "plac";
pub const TAG_MEDIA: &str = "medi";
pub const TAG_AMBIENT_SOUNDS: &str = "ambi";
pub const TAG_RANDOM_SOUNDS: &str = "bonk";
pub const TAG_PLATFORMS: &str = "plat";
pub const TAG_NOTES: &str = "NOTE";
pub const TAG_INFO: &str = "Minf";

/// One decoded chunk of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Points(Vec<Point>),
    Endpoints(Vec<Endpoint>),
    Lines(Vec<Line>),
    Polygons(Vec<Polygon>),
    Sides(Vec<Side>),
    Lights(Vec<Light>),
    Objects(Vec<MapObject>),
    Frequencies(Vec<Frequency>),
    Media(Vec<Media>),
    AmbientSounds(Vec<AmbientSound>),
    RandomSounds(Vec<RandomSound>),
    Platforms(Vec<Platform>),
    Notes(Vec<Note>),
    Info(MapInfo),
    /// Untouched payload of a tag with no registered decoder.
    Unknown(Vec<u8>),
}

type DecoderFn = fn(&mut ByteCursor) -> Result<Chunk>;

/// Parse fixed-width records until the payload runs out.
fn decode_array<T>(
    r: &mut ByteCursor,
    parse_one: fn(&mut ByteCursor) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while !r.eof() {
        items.push(parse_one(r)?);
    }
    Ok(items)
}

/// Maps a 4-character chunk tag to its decoder.
pub struct ChunkRegistry {
    decoders: HashMap<&'static str, DecoderFn>,
}

impl ChunkRegistry {
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    pub fn define(&mut self, tag: &'static str, decoder: DecoderFn) {
        self.decoders.insert(tag, decoder);
    }

    /// Decode one chunk payload. Unregistered tags round-trip as
    /// `Chunk::Unknown`.
    pub fn decode(&self, tag: &str, payload: &[u8]) -> Result<Chunk> {
        match self.decoders.get(tag) {
            Some(decoder) => decoder(&mut ByteCursor::new(payload)),
            None => Ok(Chunk::Unknown(payload.to_vec())),
        }
    }
}

impl Default for ChunkRegistry {
    /// The standard map registry: every entity table plus the `Minf`
    /// metadata singleton.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.define(TAG_POINTS, |r| {
            Ok(Chunk::Points(decode_array(r, Point::from_chunk)?))
        });
        registry.define(TAG_ENDPOINTS, |r| {
            Ok(Chunk::Endpoints(decode_array(r, Endpoint::from_chunk)?))
        });
        registry.define(TAG_LINES, |r| {
            Ok(Chunk::Lines(decode_array(r, Line::from_chunk)?))
        });
        registry.define(TAG_POLYGONS, |r| {
            Ok(Chunk::Polygons(decode_array(r, Polygon::from_chunk)?))
        });
        registry.define(TAG_SIDES, |r| {
            Ok(Chunk::Sides(decode_array(r, Side::from_chunk)?))
        });
        registry.define(TAG_LIGHTS, |r| {
            Ok(Chunk::Lights(decode_array(r, Light::from_chunk)?))
        });
        registry.define(TAG_OBJECTS, |r| {
            Ok(Chunk::Objects(decode_array(r, MapObject::from_chunk)?))
        });
        registry.define(TAG_FREQUENCIES, |r| {
            Ok(Chunk::Frequencies(decode_array(r, Frequency::from_chunk)?))
        });
        registry.define(TAG_MEDIA, |r| {
            Ok(Chunk::Media(decode_array(r, Media::from_chunk)?))
        });
        registry.define(TAG_AMBIENT_SOUNDS, |r| {
            Ok(Chunk::AmbientSounds(decode_array(
                r,
                AmbientSound::from_chunk,
            )?))
        });
        registry.define(TAG_RANDOM_SOUNDS, |r| {
            Ok(Chunk::RandomSounds(decode_array(
                r,
                RandomSound::from_chunk,
            )?))
        });
        registry.define(TAG_PLATFORMS, |r| {
            Ok(Chunk::Platforms(decode_array(r, Platform::from_chunk)?))
        });
        registry.define(TAG_NOTES, |r| {
            Ok(Chunk::Notes(decode_array(r, Note::from_chunk)?))
        });
        registry.define(TAG_INFO, |r| Ok(Chunk::Info(MapInfo::from_chunk(r)?)));
        registry
    }
}
