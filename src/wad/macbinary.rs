// src/wad/macbinary.rs
//
// Classic Mac files often travel wrapped in a MacBinary II envelope: a
// 128-byte header, the data fork, then the resource fork. The WAD we want is
// the data fork.

use byteorder::{ReadBytesExt, BE};

const HEADER_SIZE: usize = 128;

/// CRC-16 with polynomial 0x1021, MSB-first, no reflection (XMODEM).
fn macbin_crc(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in bytes {
        let mut data = (byte as u16) << 8;
        for _ in 0..8 {
            if (data ^ crc) & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
            data <<= 1;
        }
    }
    crc
}

/// Strip a MacBinary II wrapper, returning the data fork.
///
/// Detection checks the fixed header fields (version, name length, zero
/// fill, minimum decoder version) and the stored CRC over bytes [0, 124).
/// If any check fails the input is not wrapped and is returned whole.
pub fn data_fork(file: &[u8]) -> &[u8] {
    if file.len() < HEADER_SIZE {
        return file;
    }
    let header = &file[..HEADER_SIZE];
    let version = header[0];
    let name_length = header[1];
    let zero_fill = header[74];
    let min_version = header[123];
    let stored_crc = (header[124] as u16) << 8 | header[125] as u16;

    if version != 0
        || name_length > 63
        || zero_fill != 0
        || min_version > 123
        || macbin_crc(&header[..124]) != stored_crc
    {
        return file;
    }

    let fork_length = (&header[83..87]).read_u32::<BE>().unwrap_or(0) as usize;
    let end = (HEADER_SIZE + fork_length).min(file.len());
    &file[HEADER_SIZE..end]
}
