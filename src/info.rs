use crate::bmp::header::parse_header;
use crate::error::BmpError;
use crate::pixel::BitDepth;

/// Geometry and depth read from a BMP header, without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: BitDepth,
}

impl ImageInfo {
    /// Probe BMP headers.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let header = parse_header(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            bit_depth: header.depth,
        })
    }
}
