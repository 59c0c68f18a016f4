//! BMP container: header parsing, colour masks, pixel loops, encoder (internal).
//!
//! Use [`crate::Image`] or [`crate::DecodeRequest`] for the public API.

mod cursor;
mod decode;
mod encode;
pub(crate) mod header;
mod mask;

use enough::Stop;

use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::BitDepth;
use crate::store::PixelStore;

/// Decode a full BMP byte stream.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<(PixelStore, BitDepth), BmpError> {
    let header = header::parse_header(data)?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height, header.depth)?;
    }
    stop.check()?;
    let store = decode::decode_pixels(data, &header, stop)?;
    Ok((store, header.depth))
}

/// Encode a store as a BMP of the given depth.
pub(crate) fn encode(
    store: &PixelStore,
    depth: BitDepth,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(store, depth, stop)
}
