//! BMP file header + DIB header parsing.

use log::trace;

use super::cursor::Cursor;
use super::mask::ChannelMap;
use crate::error::BmpError;
use crate::pixel::BitDepth;

pub(crate) const SIGNATURE: &[u8; 2] = b"BM";

const OFFSET_FIELD: usize = 0x0A;
const WIDTH_FIELD: usize = 0x12;
const BIT_DEPTH_FIELD: usize = 0x1C;
/// End of the fields this decoder reads for every depth.
const CORE_END: usize = 0x1E;
/// The 4x4-byte mask table following the 40-byte DIB header.
const MASK_TABLE: usize = 0x36;
const MASK_TABLE_END: usize = 0x46;

/// Header fields needed to decode the pixel-data region.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BmpHeader {
    pub data_offset: usize,
    pub width: u32,
    pub height: u32,
    pub depth: BitDepth,
    /// Resolved channel positions; only present for 32-bit.
    pub channels: Option<ChannelMap>,
}

/// Parse headers and position-check the pixel-data offset.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, BmpError> {
    let mut bytes = Cursor::new(data);

    let magic = bytes.read_le(2)? as u16;
    if magic.to_le_bytes() != *SIGNATURE {
        return Err(BmpError::CorruptHeader("missing BM signature".into()));
    }

    bytes.set_position(OFFSET_FIELD)?;
    let data_offset = bytes.read_le(4)? as usize;

    bytes.set_position(WIDTH_FIELD)?;
    let width = bytes.read_le(4)? as i32;
    let height = bytes.read_le(4)? as i32;

    bytes.set_position(BIT_DEPTH_FIELD)?;
    let depth = BitDepth::try_from(bytes.read_le(2)?)?;

    if width <= 0 {
        return Err(BmpError::CorruptHeader(format!("invalid width {width}")));
    }
    if height < 0 {
        return Err(BmpError::UnsupportedVariant(
            "top-down (negative height) BMP".into(),
        ));
    }
    if height == 0 {
        return Err(BmpError::CorruptHeader("height is zero".into()));
    }

    let channels = match depth {
        BitDepth::Bpp24 => None,
        BitDepth::Bpp32 if data_offset < MASK_TABLE_END => {
            // No room for a mask table: plain 40-byte header.
            Some(ChannelMap::BGRA)
        }
        BitDepth::Bpp32 => {
            bytes.set_position(MASK_TABLE)?;
            let mut masks = [0u64; 4];
            for mask in &mut masks {
                *mask = bytes.read_le_u64(4)?;
            }
            if masks == [0; 4] {
                Some(ChannelMap::BGRA)
            } else {
                Some(ChannelMap::resolve(masks))
            }
        }
    };

    if data_offset < CORE_END {
        return Err(BmpError::CorruptHeader(format!(
            "pixel data offset {data_offset} overlaps the header"
        )));
    }
    if data_offset > bytes.len() {
        return Err(BmpError::CorruptHeader(format!(
            "pixel data offset {data_offset} is past the end of the file ({} bytes)",
            bytes.len()
        )));
    }

    trace!("BMP {width}x{height}, {} bpp, pixel data at {data_offset}", depth.bits());

    Ok(BmpHeader {
        data_offset,
        width: width as u32,
        height: height as u32,
        depth,
        channels,
    })
}
