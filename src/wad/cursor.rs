// src/wad/cursor.rs

use byteorder::{ReadBytesExt, BE};

use super::error::{Result, WadError};

/// Upper half of the classic Mac OS Roman character set (0x80..=0xFF).
/// The lower half is plain ASCII.
const MAC_ROMAN_HIGH: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{a0}', 'À', 'Ã', 'Õ', 'Œ',
    'œ', '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ',
    'ﬂ', '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó',
    'Ô', '\u{f8ff}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝',
    '˛', 'ˇ',
];

/// Decode a byte slice as Mac OS Roman text.
pub fn decode_mac_roman(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b < 0x80 {
                b as char
            } else {
                MAC_ROMAN_HIGH[(b - 0x80) as usize]
            }
        })
        .collect()
}

/// Sequential big-endian reader over an immutable byte buffer.
///
/// All multi-byte reads are big-endian; any read that would run past the end
/// of the buffer fails with `UnexpectedEndOfData`.
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn space_remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn eof(&self) -> bool {
        self.space_remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    pub fn uint8(&mut self) -> Result<u8> {
        let v = self
            .remaining()
            .read_u8()
            .map_err(|_| WadError::UnexpectedEndOfData)?;
        self.pos += 1;
        Ok(v)
    }

    pub fn uint16(&mut self) -> Result<u16> {
        let v = self
            .remaining()
            .read_u16::<BE>()
            .map_err(|_| WadError::UnexpectedEndOfData)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn uint32(&mut self) -> Result<u32> {
        let v = self
            .remaining()
            .read_u32::<BE>()
            .map_err(|_| WadError::UnexpectedEndOfData)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn int8(&mut self) -> Result<i8> {
        Ok(self.uint8()? as i8)
    }

    pub fn int16(&mut self) -> Result<i16> {
        Ok(self.uint16()? as i16)
    }

    /// Composed as `(uint16 << 16) | uint16` on a 32-bit signed value, so a
    /// quantity with the top bit set reads as negative. Existing chunk
    /// layouts were authored against this, so it stays.
    pub fn int32(&mut self) -> Result<i32> {
        let hi = self.uint16()? as u32;
        let lo = self.uint16()? as u32;
        Ok((hi << 16 | lo) as i32)
    }

    pub fn raw(&mut self, n_bytes: usize) -> Result<&'a [u8]> {
        if self.space_remaining() < n_bytes {
            return Err(WadError::UnexpectedEndOfData);
        }
        let slice = &self.bytes[self.pos..self.pos + n_bytes];
        self.pos += n_bytes;
        Ok(slice)
    }

    /// Read `n_bytes` raw bytes and decode them all as Mac Roman text.
    pub fn fixed_string(&mut self, n_bytes: usize) -> Result<String> {
        Ok(decode_mac_roman(self.raw(n_bytes)?))
    }

    /// Read `max_len` raw bytes; decode the prefix before the first NUL, or
    /// all of them if none is found.
    pub fn c_string(&mut self, max_len: usize) -> Result<String> {
        let bytes = self.raw(max_len)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(decode_mac_roman(&bytes[..end]))
    }

    /// Read `total_bytes` raw bytes; the first is a length prefix for the
    /// text that follows.
    pub fn pascal_string(&mut self, total_bytes: usize) -> Result<String> {
        let bytes = self.raw(total_bytes)?;
        if bytes.is_empty() {
            return Ok(String::new());
        }
        let len = (bytes[0] as usize).min(bytes.len() - 1);
        Ok(decode_mac_roman(&bytes[1..1 + len]))
    }

    pub fn skip(&mut self, n_bytes: usize) -> Result<()> {
        if self.space_remaining() < n_bytes {
            return Err(WadError::UnexpectedEndOfData);
        }
        self.pos += n_bytes;
        Ok(())
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.bytes.len() {
            return Err(WadError::SeekOutOfRange(pos));
        }
        self.pos = pos;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_reads() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.uint8().unwrap(), 0x12);
        assert_eq!(r.uint16().unwrap(), 0x3456);
        assert_eq!(r.position(), 3);
        assert!(r.uint32().is_err());
    }

    #[test]
    fn test_uint32_is_unsigned() {
        let data = [0xff, 0xff, 0xff, 0xfe];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.uint32().unwrap(), 0xffff_fffe);
    }

    #[test]
    fn test_signed_reads() {
        let data = [0xff, 0xff, 0xfe, 0x80];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.int8().unwrap(), -1);
        assert_eq!(r.int16().unwrap(), -2);
        assert_eq!(r.int8().unwrap(), -128);
    }

    #[test]
    fn test_int32_reads_high_bit_as_negative() {
        let data = [0x80, 0x00, 0x00, 0x01];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.int32().unwrap(), -0x7fff_ffff);
    }

    #[test]
    fn test_raw_and_eof() {
        let data = [1, 2, 3];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.raw(2).unwrap(), &[1, 2]);
        assert!(!r.eof());
        assert_eq!(r.raw(1).unwrap(), &[3]);
        assert!(r.eof());
        assert_eq!(r.raw(1), Err(WadError::UnexpectedEndOfData));
    }

    #[test]
    fn test_c_string_stops_at_nul() {
        let data = b"map\0garbage";
        let mut r = ByteCursor::new(data);
        assert_eq!(r.c_string(11).unwrap(), "map");
        assert!(r.eof());
    }

    #[test]
    fn test_c_string_without_nul_takes_everything() {
        let data = b"abcd";
        let mut r = ByteCursor::new(data);
        assert_eq!(r.c_string(4).unwrap(), "abcd");
    }

    #[test]
    fn test_pascal_string() {
        let data = [3, b'w', b'a', b'd', 0, 0];
        let mut r = ByteCursor::new(&data);
        assert_eq!(r.pascal_string(6).unwrap(), "wad");
        assert!(r.eof());
    }

    #[test]
    fn test_mac_roman_high_half() {
        // 0x8e is 'é', 0xa5 is the bullet.
        assert_eq!(decode_mac_roman(&[b'c', b'a', b'f', 0x8e]), "café");
        assert_eq!(decode_mac_roman(&[0xa5]), "•");
    }

    #[test]
    fn test_seek_and_skip() {
        let data = [0, 1, 2, 3];
        let mut r = ByteCursor::new(&data);
        r.skip(2).unwrap();
        assert_eq!(r.uint8().unwrap(), 2);
        r.seek(0).unwrap();
        assert_eq!(r.uint8().unwrap(), 0);
        assert_eq!(r.seek(4), Err(WadError::SeekOutOfRange(4)));
        assert_eq!(r.skip(9), Err(WadError::UnexpectedEndOfData));
    }
}
