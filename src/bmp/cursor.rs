//! Little-endian field access over a BMP byte buffer.

use crate::error::BmpError;

/// Bounded read cursor over `&[u8]`.
///
/// Header reads report truncation as [`BmpError::CorruptHeader`]; pixel reads
/// report it as [`BmpError::UnexpectedEof`].
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[cfg(test)]
    fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::CorruptHeader(format!(
                "offset {pos} is past the end of the file ({} bytes)",
                self.data.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    /// Read an unsigned little-endian field of `len` (1..=4) bytes.
    pub(crate) fn read_le(&mut self, len: usize) -> Result<u32, BmpError> {
        debug_assert!((1..=4).contains(&len));
        self.read_le_u64(len).map(|v| v as u32)
    }

    /// Read an unsigned little-endian field of `len` (1..=8) bytes into a `u64`.
    pub(crate) fn read_le_u64(&mut self, len: usize) -> Result<u64, BmpError> {
        let bytes = self.header_bytes(len)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    fn header_bytes(&mut self, len: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(len).filter(|&e| e <= self.data.len());
        let Some(end) = end else {
            return Err(BmpError::CorruptHeader(format!(
                "header ends early: need {len} bytes at offset {}, file is {} bytes",
                self.pos,
                self.data.len()
            )));
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read one pixel worth of bytes.
    #[inline]
    pub(crate) fn read_pixel<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let src = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(BmpError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(src);
        self.pos += N;
        Ok(buf)
    }

    /// Skip row padding. A short run at the end of the file is tolerated.
    pub(crate) fn skip_padding(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }
}

/// Append `value` as a little-endian field of `bytes` (1..=4) bytes.
///
/// Fails when `value` has significant bits beyond the field width.
pub(crate) fn push_le(out: &mut Vec<u8>, value: u64, bytes: usize) -> Result<(), BmpError> {
    if !(1..=4).contains(&bytes) || value >> (bytes * 8) != 0 {
        return Err(BmpError::ValueTooLarge { value, bytes });
    }
    out.extend_from_slice(&value.to_le_bytes()[..bytes]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x36, 0x00, 0x00, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0xFF];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_le(4).unwrap(), 0x36);
        assert_eq!(c.read_le(2).unwrap(), 24);
        assert_eq!(c.position(), 6);
        assert_eq!(c.read_le_u64(4).unwrap(), 0xFF00_0000);
    }

    #[test]
    fn header_read_past_end_is_corrupt() {
        let mut c = Cursor::new(&[1, 2, 3]);
        assert!(matches!(c.read_le(4), Err(BmpError::CorruptHeader(_))));
        assert!(matches!(c.set_position(4), Err(BmpError::CorruptHeader(_))));
        assert!(c.set_position(3).is_ok());
    }

    #[test]
    fn pixel_read_past_end_is_eof() {
        let mut c = Cursor::new(&[1, 2, 3, 4, 5]);
        assert_eq!(c.read_pixel::<3>().unwrap(), [1, 2, 3]);
        assert!(matches!(c.read_pixel::<3>(), Err(BmpError::UnexpectedEof)));
        c.skip_padding(10);
        assert_eq!(c.position(), c.len());
    }

    #[test]
    fn push_le_writes_field_width() {
        let mut out = Vec::new();
        push_le(&mut out, 2835, 4).unwrap();
        push_le(&mut out, 1, 2).unwrap();
        push_le(&mut out, 0xFF, 1).unwrap();
        assert_eq!(out, [0x13, 0x0B, 0, 0, 1, 0, 0xFF]);
    }

    #[test]
    fn push_le_rejects_overflow() {
        let mut out = Vec::new();
        assert!(matches!(
            push_le(&mut out, 0x1_0000, 2),
            Err(BmpError::ValueTooLarge { value: 0x1_0000, bytes: 2 })
        ));
        assert!(push_le(&mut out, u64::from(u32::MAX) + 1, 4).is_err());
        assert!(push_le(&mut out, 0, 5).is_err());
        assert!(out.is_empty());
    }
}
