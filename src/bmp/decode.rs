//! Pixel-data decoding for 24-bit and 32-bit BMPs.
//!
//! Rows are stored bottom-up, so file row 0 fills grid row `height - 1`.

use enough::Stop;

use super::cursor::Cursor;
use super::header::BmpHeader;
use super::mask::ChannelMap;
use crate::error::BmpError;
use crate::pixel::{BitDepth, Channel};
use crate::store::PixelStore;

/// Decode the pixel-data region described by `header` into a fresh store.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelStore, BmpError> {
    let mut bytes = Cursor::new(data);
    bytes.set_position(header.data_offset)?;

    // Geometry is untrusted until the file is known to hold that many bytes.
    let needed = pixel_data_len(header)?;
    if data.len() - header.data_offset < needed {
        return Err(BmpError::UnexpectedEof);
    }

    let mut store = PixelStore::new(header.width, header.height, header.depth.has_alpha())?;
    match (header.depth, header.channels) {
        (BitDepth::Bpp32, Some(channels)) => decode_32bit(&mut bytes, &mut store, &channels, stop)?,
        (BitDepth::Bpp32, None) => decode_32bit(&mut bytes, &mut store, &ChannelMap::BGRA, stop)?,
        (BitDepth::Bpp24, _) => decode_24bit(&mut bytes, &mut store, stop)?,
    }
    Ok(store)
}

/// Smallest pixel-data region that decodes fully. The last row's padding may
/// be missing.
fn pixel_data_len(header: &BmpHeader) -> Result<usize, BmpError> {
    let (width, height) = (header.width, header.height);
    let w = width as usize;
    let row = w
        .checked_mul(header.depth.bytes_per_pixel())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let stride = row + header.depth.row_padding(w);
    stride
        .checked_mul(height as usize - 1)
        .and_then(|rows| rows.checked_add(row))
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

fn decode_24bit(
    bytes: &mut Cursor<'_>,
    store: &mut PixelStore,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let w = store.width() as usize;
    let h = store.height() as usize;
    let padding = BitDepth::Bpp24.row_padding(w);

    for (row_idx, y) in (0..h).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let row_start = y * w;
        for x in 0..w {
            let [b, g, r] = bytes.read_pixel::<3>()?;
            put(store, Channel::Red, row_start + x, r);
            put(store, Channel::Green, row_start + x, g);
            put(store, Channel::Blue, row_start + x, b);
        }
        bytes.skip_padding(padding);
    }
    Ok(())
}

fn decode_32bit(
    bytes: &mut Cursor<'_>,
    store: &mut PixelStore,
    channels: &ChannelMap,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let w = store.width() as usize;
    let h = store.height() as usize;
    let positions = Channel::ALL.map(|c| channels.position(c));

    for (row_idx, y) in (0..h).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let row_start = y * w;
        for x in 0..w {
            let pixel = bytes.read_pixel::<4>()?;
            for (channel, pos) in Channel::ALL.into_iter().zip(positions) {
                if let Some(pos) = pos {
                    put(store, channel, row_start + x, pixel[pos]);
                }
            }
        }
    }
    Ok(())
}

#[inline]
fn put(store: &mut PixelStore, channel: Channel, idx: usize, value: u8) {
    if let Some(plane) = store.plane_mut(channel) {
        plane[idx] = value;
    }
}
