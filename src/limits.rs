//! Decode-time resource limits.

use crate::error::BmpError;
use crate::pixel::BitDepth;
use crate::store::PixelStore;

/// Resource limits applied to a decode before any plane is allocated.
///
/// All fields default to `None` (no limit). Memory is counted per plane:
/// three for a 24-bit image, four once the alpha plane exists.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes across all channel planes of the decoded image.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header geometry against every configured limit.
    pub(crate) fn check(&self, width: u32, height: u32, depth: BitDepth) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(height);
        let planes = PixelStore::footprint(width, height, depth.has_alpha());
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("plane memory", planes, self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(limit) = limit.filter(|&limit| value > limit) {
                return Err(BmpError::LimitExceeded(format!(
                    "{what} {value} exceeds limit {limit}"
                )));
            }
        }
        Ok(())
    }
}
