//! BMP encoder: uncompressed 24-bit (BGR) and 32-bit bitfields (ABGR).

use enough::Stop;

use super::cursor::push_le;
use super::header::SIGNATURE;
use crate::error::BmpError;
use crate::pixel::BitDepth;
use crate::store::PixelStore;

const FILE_HEADER_LEN: u64 = 14;
const INFO_HEADER_LEN: u64 = 40;
/// BITMAPV3INFOHEADER: the 40-byte header plus four channel masks.
const V3_HEADER_LEN: u64 = 56;
const BI_RGB: u64 = 0;
const BI_BITFIELDS: u64 = 3;
/// 72 DPI in pixels per metre.
const RESOLUTION: u64 = 2835;

/// Masks for pixel bytes 0..4, which are written as A, B, G, R.
const ABGR_MASKS: [u64; 4] = [0xFF00_0000, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF];

/// Encode a whole store as a BMP of the given depth.
pub(crate) fn encode_bmp(
    store: &PixelStore,
    depth: BitDepth,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let (width, height) = (store.width(), store.height());
    let w = u64::from(width);
    let h = u64::from(height);
    let padding = depth.row_padding(width as usize) as u64;
    let bpp = depth.bytes_per_pixel() as u64;

    let header_len = match depth {
        BitDepth::Bpp24 => FILE_HEADER_LEN + INFO_HEADER_LEN,
        BitDepth::Bpp32 => FILE_HEADER_LEN + V3_HEADER_LEN,
    };
    let pixel_data_size = w
        .checked_mul(bpp)
        .and_then(|row| row.checked_add(padding))
        .and_then(|row| row.checked_mul(h))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size + header_len;

    stop.check()?;

    // Header fields are range-checked before the pixel region is reserved.
    let mut out = Vec::with_capacity(header_len as usize);
    write_file_header(&mut out, file_size, header_len)?;
    match depth {
        BitDepth::Bpp24 => write_info_header(&mut out, w, h)?,
        BitDepth::Bpp32 => write_v3_header(&mut out, w, h, pixel_data_size)?,
    }
    out.reserve(pixel_data_size as usize);

    match depth {
        BitDepth::Bpp24 => write_rows_24bit(&mut out, store, padding as usize, stop)?,
        BitDepth::Bpp32 => write_rows_32bit(&mut out, store, stop)?,
    }

    debug_assert_eq!(out.len() as u64, file_size);
    Ok(out)
}

fn write_file_header(out: &mut Vec<u8>, file_size: u64, data_offset: u64) -> Result<(), BmpError> {
    out.extend_from_slice(SIGNATURE);
    push_le(out, file_size, 4)?;
    push_le(out, 0, 4)?; // reserved
    push_le(out, data_offset, 4)
}

/// Size, geometry, planes and depth: the first 16 bytes of every DIB header.
fn write_dib_prefix(
    out: &mut Vec<u8>,
    header_size: u64,
    width: u64,
    height: u64,
    bits: u16,
) -> Result<(), BmpError> {
    push_le(out, header_size, 4)?;
    push_le(out, width, 4)?;
    push_le(out, height, 4)?; // positive = bottom-up
    push_le(out, 1, 2)?; // planes
    push_le(out, u64::from(bits), 2)
}

fn write_info_header(out: &mut Vec<u8>, width: u64, height: u64) -> Result<(), BmpError> {
    write_dib_prefix(out, INFO_HEADER_LEN, width, height, 24)?;
    push_le(out, BI_RGB, 4)?;
    // image size, resolutions, palette counts
    for _ in 0..5 {
        push_le(out, 0, 4)?;
    }
    Ok(())
}

fn write_v3_header(
    out: &mut Vec<u8>,
    width: u64,
    height: u64,
    pixel_data_size: u64,
) -> Result<(), BmpError> {
    write_dib_prefix(out, V3_HEADER_LEN, width, height, 32)?;
    push_le(out, BI_BITFIELDS, 4)?;
    push_le(out, pixel_data_size, 4)?;
    push_le(out, RESOLUTION, 4)?;
    push_le(out, RESOLUTION, 4)?;
    push_le(out, 0, 4)?; // colors used
    push_le(out, 0, 4)?; // important colors
    for mask in ABGR_MASKS {
        push_le(out, mask, 4)?;
    }
    Ok(())
}

fn write_rows_24bit(
    out: &mut Vec<u8>,
    store: &PixelStore,
    padding: usize,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let w = store.width() as usize;
    let h = store.height() as usize;
    for (row_idx, y) in (0..h).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for idx in y * w..(y + 1) * w {
            let [r, g, b, _] = store.rgba_at(idx);
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(core::iter::repeat_n(0u8, padding));
    }
    Ok(())
}

fn write_rows_32bit(out: &mut Vec<u8>, store: &PixelStore, stop: &dyn Stop) -> Result<(), BmpError> {
    let w = store.width() as usize;
    let h = store.height() as usize;
    for (row_idx, y) in (0..h).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for idx in y * w..(y + 1) * w {
            let [r, g, b, a] = store.rgba_at(idx);
            out.extend_from_slice(&[a, b, g, r]);
        }
    }
    Ok(())
}
