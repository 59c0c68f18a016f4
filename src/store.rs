//! Per-channel pixel planes.

use crate::error::BmpError;
use crate::pixel::Channel;

/// Four equally sized `width * height` planes of 8-bit channel values.
///
/// Planes are flat and row-major: `(x, y)` lives at `y * width + x`.
/// The alpha plane only exists for 32-bit images; without it, alpha reads
/// return 255 (opaque).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelStore {
    width: u32,
    height: u32,
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl PixelStore {
    /// Allocate zeroed colour planes, plus an opaque alpha plane if `alpha` is set.
    pub fn new(width: u32, height: u32, alpha: bool) -> Result<Self, BmpError> {
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidDimensions { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            red: vec![0; len],
            green: vec![0; len],
            blue: vec![0; len],
            alpha: alpha.then(|| vec![255; len]),
        })
    }

    /// Bytes held by the planes of a `width * height` store.
    pub(crate) fn footprint(width: u32, height: u32, alpha: bool) -> u64 {
        let planes = if alpha { 4 } else { 3 };
        (u64::from(width) * u64::from(height)).saturating_mul(planes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Flat index of `(x, y)`, or `None` when outside the grid.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Read one channel value. Alpha reads 255 when there is no alpha plane.
    pub fn get(&self, x: u32, y: u32, channel: Channel) -> Result<u8, BmpError> {
        let idx = self
            .index(x, y)
            .ok_or(BmpError::CoordinatesOutOfBounds { x, y })?;
        Ok(match self.plane(channel) {
            Some(plane) => plane[idx],
            None => 255,
        })
    }

    /// Write one channel value.
    ///
    /// Returns `Ok(false)` when `channel` is alpha and there is no alpha
    /// plane; nothing is stored in that case.
    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: u8) -> Result<bool, BmpError> {
        let idx = self
            .index(x, y)
            .ok_or(BmpError::CoordinatesOutOfBounds { x, y })?;
        match self.plane_mut(channel) {
            Some(plane) => {
                plane[idx] = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whole plane for `channel`, row-major. `None` for a missing alpha plane.
    pub fn plane(&self, channel: Channel) -> Option<&[u8]> {
        match channel {
            Channel::Red => Some(&self.red),
            Channel::Green => Some(&self.green),
            Channel::Blue => Some(&self.blue),
            Channel::Alpha => self.alpha.as_deref(),
        }
    }

    pub(crate) fn plane_mut(&mut self, channel: Channel) -> Option<&mut [u8]> {
        match channel {
            Channel::Red => Some(&mut self.red),
            Channel::Green => Some(&mut self.green),
            Channel::Blue => Some(&mut self.blue),
            Channel::Alpha => self.alpha.as_deref_mut(),
        }
    }

    /// Add an opaque alpha plane or drop the existing one.
    pub(crate) fn set_alpha_plane(&mut self, enabled: bool) {
        match (enabled, self.alpha.is_some()) {
            (true, false) => self.alpha = Some(vec![255; self.red.len()]),
            (false, true) => self.alpha = None,
            _ => {}
        }
    }

    /// All four values at a flat index, alpha defaulting to 255.
    #[inline]
    pub(crate) fn rgba_at(&self, idx: usize) -> [u8; 4] {
        [
            self.red[idx],
            self.green[idx],
            self.blue[idx],
            self.alpha.as_ref().map_or(255, |a| a[idx]),
        ]
    }
}
