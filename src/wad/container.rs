// src/wad/container.rs

use std::collections::HashMap;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::map::MapInfo;

use super::chunks::{Chunk, ChunkRegistry, TAG_INFO};
use super::cursor::ByteCursor;
use super::error::{Result, WadError};

/// Size of the fixed container prologue.
const HEADER_SIZE: usize = 128;
/// Chunk-header and directory-entry sizes used when the prologue declares
/// zero, and for pre-versioned files.
const DEFAULT_CHUNK_HEADER_SIZE: u16 = 16;
const DEFAULT_ENTRY_SIZE: u16 = 10;
const LEGACY_CHUNK_HEADER_SIZE: usize = 12;
const LEGACY_ENTRY_SIZE: usize = 8;

/// One directory record: the byte range and id of a logical sub-document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub offset: u32,
    pub length: u32,
    pub id: u16,
    pub app_data: Vec<u8>,
}

/// The decoded container prologue plus its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadHeader {
    pub wad_version: u16,
    pub data_version: u16,
    pub filename: String,
    pub checksum: u32,
    pub directory_offset: u32,
    pub entry_count: u16,
    pub app_data_bytes: u16,
    pub chunk_header_size: u16,
    pub entry_size: u16,
    pub parent_checksum: u32,
    pub directory: Vec<DirectoryEntry>,
}

/// The decoded chunks of one directory entry, keyed by tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryChunks {
    chunks: HashMap<String, Chunk>,
}

impl EntryChunks {
    pub fn get(&self, tag: &str) -> Option<&Chunk> {
        self.chunks.get(tag)
    }

    pub fn take(&mut self, tag: &str) -> Option<Chunk> {
        self.chunks.remove(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.chunks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Cheap per-entry listing for a map picker: id plus metadata, no geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub id: u16,
    pub info: Option<MapInfo>,
}

/// A WAD container resident in memory.
///
/// The file bytes are read up front; every later operation is a synchronous
/// walk over bounds-checked slices.
pub struct Wad {
    data: Vec<u8>,
    header: WadHeader,
    registry: ChunkRegistry,
}

impl Wad {
    /// Parse the prologue and directory of an in-memory container. The
    /// buffer should already be the logical WAD, with any MacBinary wrapper
    /// stripped (`macbinary::data_fork`).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = read_wad_header(&data)?;
        info!(
            "opened wad '{}' (version {}, {} entries)",
            header.filename, header.wad_version, header.entry_count
        );
        Ok(Self {
            data,
            header,
            registry: ChunkRegistry::default(),
        })
    }

    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// Ids of every directory entry, in directory order.
    pub fn entry_ids(&self) -> Vec<u16> {
        self.header.directory.iter().map(|e| e.id).collect()
    }

    fn read_range(&self, start: usize, stop: usize) -> Result<&[u8]> {
        self.data
            .get(start..stop)
            .ok_or(WadError::UnexpectedEndOfData)
    }

    /// Decode every chunk of the entry with the given id.
    pub fn read_entry(&self, id: u16) -> Result<EntryChunks> {
        self.read_entry_chunks(id, None)
    }

    /// Decode only the metadata chunk of every entry. Entries are decoded in
    /// parallel; the result preserves directory order.
    pub fn read_map_summaries(&self) -> Result<Vec<MapSummary>> {
        self.header
            .directory
            .par_iter()
            .map(|entry| {
                let mut chunks = self.read_entry_chunks(entry.id, Some(&[TAG_INFO]))?;
                let info = match chunks.take(TAG_INFO) {
                    Some(Chunk::Info(info)) => Some(info),
                    _ => None,
                };
                Ok(MapSummary {
                    id: entry.id,
                    info,
                })
            })
            .collect()
    }

    /// Walk one entry's chunk stream, decoding the tags the allow-list
    /// permits (all of them when there is no list).
    fn read_entry_chunks(&self, id: u16, allow: Option<&[&str]>) -> Result<EntryChunks> {
        let entry = self
            .header
            .directory
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(WadError::EntryNotFound(id))?;

        let data = self.read_range(
            entry.offset as usize,
            entry.offset as usize + entry.length as usize,
        )?;

        let header_size = if self.header.wad_version == 0 {
            LEGACY_CHUNK_HEADER_SIZE
        } else {
            self.header.chunk_header_size as usize
        };

        let mut chunks = EntryChunks::default();
        let mut chunk_start = 0usize;
        while chunk_start < data.len() {
            let header = data
                .get(chunk_start..chunk_start + header_size)
                .ok_or(WadError::UnexpectedEndOfData)?;
            let mut r = ByteCursor::new(header);
            let tag = r.fixed_string(4)?;
            let next_offset = r.uint32()? as usize;
            let size = r.uint32()? as usize;

            let data_start = chunk_start + header_size;
            let payload = data
                .get(data_start..data_start + size)
                .ok_or(WadError::UnexpectedEndOfData)?;

            if allow.map_or(true, |tags| tags.contains(&tag.as_str())) {
                let chunk = self.registry.decode(&tag, payload)?;
                chunks.chunks.insert(tag, chunk);
            }

            // A next offset that does not strictly increase would loop
            // forever on a malformed file.
            if next_offset <= chunk_start {
                if next_offset != 0 {
                    warn!(
                        "entry {}: chunk at {} points backwards to {}, stopping",
                        id, chunk_start, next_offset
                    );
                }
                break;
            }
            chunk_start = next_offset;
        }

        Ok(chunks)
    }
}

fn read_wad_header(data: &[u8]) -> Result<WadHeader> {
    let mut r = ByteCursor::new(data.get(..HEADER_SIZE).unwrap_or(data));
    let wad_version = r.uint16()?;
    let data_version = r.uint16()?;
    let filename = r.c_string(64)?;
    let checksum = r.uint32()?;
    let directory_offset = r.uint32()?;
    let entry_count = r.uint16()?;
    let app_data_bytes = r.uint16()?;
    let mut chunk_header_size = r.uint16()?;
    if chunk_header_size == 0 {
        chunk_header_size = DEFAULT_CHUNK_HEADER_SIZE;
    }
    let mut entry_size = r.uint16()?;
    if entry_size == 0 {
        entry_size = DEFAULT_ENTRY_SIZE;
    }
    let parent_checksum = r.uint32()?;

    let full_entry_size = if wad_version < 1 {
        LEGACY_ENTRY_SIZE
    } else {
        entry_size as usize + app_data_bytes as usize
    };
    let dir_start = directory_offset as usize;
    let dir_data = data
        .get(dir_start..dir_start + entry_count as usize * full_entry_size)
        .ok_or(WadError::UnexpectedEndOfData)?;

    let mut directory = Vec::with_capacity(entry_count as usize);
    for i in 0..entry_count as usize {
        let mut r = ByteCursor::new(&dir_data[i * full_entry_size..(i + 1) * full_entry_size]);
        let offset = r.uint32()?;
        let length = r.uint32()?;
        // The id field only exists in version >= 2 directories; older files
        // are identified by position.
        let (id, app_data) = if wad_version >= 2 {
            (r.uint16()?, r.raw(app_data_bytes as usize)?.to_vec())
        } else {
            (i as u16, Vec::new())
        };
        directory.push(DirectoryEntry {
            offset,
            length,
            id,
            app_data,
        });
    }

    Ok(WadHeader {
        wad_version,
        data_version,
        filename,
        checksum,
        directory_offset,
        entry_count,
        app_data_bytes,
        chunk_header_size,
        entry_size,
        parent_checksum,
        directory,
    })
}

/// In-memory WAD builders shared by the container and geometry tests.
#[cfg(test)]
pub mod fixtures {
    /// A chunk with the standard 16-byte header.
    pub fn chunk(tag: &str, next_offset: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(tag.as_bytes());
        out.extend_from_slice(&next_offset.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(payload);
        out
    }

    /// Chain chunks into one entry's byte range; the last chunk gets a zero
    /// next-offset, which terminates the walk.
    pub fn entry_data(chunks: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, (tag, payload)) in chunks.iter().enumerate() {
            let next = if i + 1 == chunks.len() {
                0
            } else {
                (out.len() + 16 + payload.len()) as u32
            };
            out.extend_from_slice(&chunk(tag, next, payload));
        }
        out
    }

    /// A version-2 container holding the given (id, entry bytes) pairs.
    pub fn build_wad(entries: &[(u16, Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        let mut dir = Vec::new();
        for (id, data) in entries {
            let offset = (super::HEADER_SIZE + body.len()) as u32;
            body.extend_from_slice(data);
            dir.extend_from_slice(&offset.to_be_bytes());
            dir.extend_from_slice(&(data.len() as u32).to_be_bytes());
            dir.extend_from_slice(&id.to_be_bytes());
        }
        let dir_offset = (super::HEADER_SIZE + body.len()) as u32;

        let mut out = Vec::new();
        out.extend_from_slice(&2u16.to_be_bytes()); // wad version
        out.extend_from_slice(&1u16.to_be_bytes()); // data version
        let mut name = [0u8; 64];
        name[..11].copy_from_slice(b"fixture.wad");
        out.extend_from_slice(&name);
        out.extend_from_slice(&0u32.to_be_bytes()); // checksum
        out.extend_from_slice(&dir_offset.to_be_bytes());
        out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // app data bytes
        out.extend_from_slice(&0u16.to_be_bytes()); // chunk header size -> 16
        out.extend_from_slice(&0u16.to_be_bytes()); // entry size -> 10
        out.extend_from_slice(&0u32.to_be_bytes()); // parent checksum
        out.resize(super::HEADER_SIZE, 0);
        out.extend_from_slice(&body);
        out.extend_from_slice(&dir);
        out
    }

    /// Point chunk payload from coordinate pairs.
    pub fn points_payload(points: &[(i16, i16)]) -> Vec<u8> {
        let mut out = Vec::new();
        for &(x, y) in points {
            out.extend_from_slice(&x.to_be_bytes());
            out.extend_from_slice(&y.to_be_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::map::info::info_bytes;

    #[test]
    fn test_header_and_directory_parse() {
        let wad_bytes = build_wad(&[
            (0, entry_data(&[("Minf", info_bytes("Alpha", 0))])),
            (5, entry_data(&[("Minf", info_bytes("Beta", 0))])),
        ]);
        let wad = Wad::from_bytes(wad_bytes).unwrap();
        let header = wad.header();
        assert_eq!(header.wad_version, 2);
        assert_eq!(header.filename, "fixture.wad");
        assert_eq!(header.chunk_header_size, 16); // zero defaults to 16
        assert_eq!(header.entry_size, 10);
        assert_eq!(wad.entry_ids(), vec![0, 5]);
    }

    #[test]
    fn test_read_entry_decodes_registered_and_keeps_unknown() {
        let entry = entry_data(&[
            ("PNTS", points_payload(&[(0, 0), (100, 0)])),
            ("term", vec![1, 2, 3, 4]),
            ("Minf", info_bytes("Gamma", 0)),
        ]);
        let wad = Wad::from_bytes(build_wad(&[(7, entry)])).unwrap();
        let chunks = wad.read_entry(7).unwrap();
        assert_eq!(chunks.len(), 3);
        match chunks.get("PNTS").unwrap() {
            Chunk::Points(points) => assert_eq!(points.len(), 2),
            other => panic!("expected points, got {:?}", other),
        }
        assert_eq!(
            chunks.get("term").unwrap(),
            &Chunk::Unknown(vec![1, 2, 3, 4])
        );
        match chunks.get("Minf").unwrap() {
            Chunk::Info(info) => assert_eq!(info.name, "Gamma"),
            other => panic!("expected info, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_entry_is_entry_not_found() {
        let wad = Wad::from_bytes(build_wad(&[(0, entry_data(&[("term", vec![])]))])).unwrap();
        assert!(matches!(
            wad.read_entry(3),
            Err(WadError::EntryNotFound(3))
        ));
    }

    #[test]
    fn test_summaries_decode_only_metadata() {
        let wad_bytes = build_wad(&[
            (
                1,
                entry_data(&[
                    ("PNTS", points_payload(&[(0, 0)])),
                    ("Minf", info_bytes("First", 2)),
                ]),
            ),
            (2, entry_data(&[("PNTS", points_payload(&[(0, 0)]))])),
        ]);
        let wad = Wad::from_bytes(wad_bytes).unwrap();
        let summaries = wad.read_map_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, 1);
        assert_eq!(summaries[0].info.as_ref().unwrap().name, "First");
        assert_eq!(summaries[0].info.as_ref().unwrap().mission_flags, 2);
        // Second entry has no metadata chunk at all.
        assert_eq!(summaries[1].info, None);
    }

    #[test]
    fn test_chunk_walk_stops_on_non_increasing_offset() {
        // Second chunk claims its own start as the next offset; a naive
        // walker would spin forever.
        let mut entry = chunk("AAAA", 20, &[1, 2, 3, 4]);
        let second_start = entry.len() as u32;
        entry.extend_from_slice(&chunk("BBBB", second_start, &[5, 6]));
        let wad = Wad::from_bytes(build_wad(&[(0, entry)])).unwrap();
        let chunks = wad.read_entry(0).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.get("BBBB").unwrap(), &Chunk::Unknown(vec![5, 6]));
    }

    #[test]
    fn test_truncated_chunk_payload_is_an_error() {
        // Header promises 100 payload bytes but the entry range ends first.
        let entry = chunk("PNTS", 0, &[0, 0, 0, 0]);
        let mut wad_bytes = build_wad(&[(0, entry)]);
        // Grow the claimed size in place: bytes 8..12 of the chunk header.
        let size_at = 128 + 8;
        wad_bytes[size_at..size_at + 4].copy_from_slice(&100u32.to_be_bytes());
        let wad = Wad::from_bytes(wad_bytes).unwrap();
        assert_eq!(wad.read_entry(0), Err(WadError::UnexpectedEndOfData));
    }

    #[test]
    fn test_legacy_layout_uses_fixed_strides() {
        // Version-0 container: 8-byte directory entries, 12-byte chunk
        // headers, ids assigned by position.
        let mut entry = Vec::new();
        entry.extend_from_slice(b"term");
        entry.extend_from_slice(&0u32.to_be_bytes()); // next offset
        entry.extend_from_slice(&3u32.to_be_bytes()); // size
        entry.extend_from_slice(&[9, 9, 9]);

        let mut out = Vec::new();
        out.extend_from_slice(&0u16.to_be_bytes()); // wad version
        out.extend_from_slice(&0u16.to_be_bytes()); // data version
        out.extend_from_slice(&[0; 64]); // filename
        out.extend_from_slice(&0u32.to_be_bytes()); // checksum
        out.extend_from_slice(&((128 + entry.len()) as u32).to_be_bytes());
        out.extend_from_slice(&1u16.to_be_bytes()); // entry count
        out.extend_from_slice(&0u16.to_be_bytes()); // app data bytes
        out.extend_from_slice(&0u16.to_be_bytes()); // chunk header size
        out.extend_from_slice(&0u16.to_be_bytes()); // entry size
        out.extend_from_slice(&0u32.to_be_bytes()); // parent checksum
        out.resize(128, 0);
        out.extend_from_slice(&entry);
        out.extend_from_slice(&128u32.to_be_bytes()); // entry offset
        out.extend_from_slice(&(entry.len() as u32).to_be_bytes());

        let wad = Wad::from_bytes(out).unwrap();
        assert_eq!(wad.entry_ids(), vec![0]);
        let chunks = wad.read_entry(0).unwrap();
        assert_eq!(chunks.get("term").unwrap(), &Chunk::Unknown(vec![9, 9, 9]));
    }
}
