use core::fmt;

use crate::error::BmpError;

/// One of the four colour channels held by a [`PixelStore`](crate::PixelStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels, in mask-table slot order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Alpha => "Alpha",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Alpha => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported bits per pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// B,G,R; rows padded to 4 bytes. No alpha.
    #[default]
    Bpp24,
    /// B,G,R,A with a colour-mask table.
    Bpp32,
}

impl BitDepth {
    /// Bytes per pixel in the file's pixel-data region.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bpp24 => 3,
            Self::Bpp32 => 4,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::Bpp24 => 24,
            Self::Bpp32 => 32,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Bpp32)
    }

    /// Zero bytes appended to each row so its length is a multiple of 4.
    pub fn row_padding(self, width: usize) -> usize {
        (4 - (width * self.bytes_per_pixel()) % 4) % 4
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = BmpError;

    fn try_from(bits: u32) -> Result<Self, BmpError> {
        match bits {
            24 => Ok(Self::Bpp24),
            32 => Ok(Self::Bpp32),
            other => Err(BmpError::UnsupportedBitDepth(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names() {
        let names: Vec<&str> = Channel::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Red", "Green", "Blue", "Alpha"]);
        assert_eq!(Channel::Alpha.to_string(), "Alpha");
    }

    #[test]
    fn padding_keeps_rows_aligned() {
        for w in 1..=64usize {
            let row = w * 3 + BitDepth::Bpp24.row_padding(w);
            assert_eq!(row % 4, 0, "width {w}");
            assert!(BitDepth::Bpp24.row_padding(w) < 4);
            assert_eq!(BitDepth::Bpp32.row_padding(w), 0);
        }
    }

    #[test]
    fn depth_from_bits() {
        assert_eq!(BitDepth::try_from(24).unwrap(), BitDepth::Bpp24);
        assert_eq!(BitDepth::try_from(32).unwrap(), BitDepth::Bpp32);
        assert!(matches!(
            BitDepth::try_from(16),
            Err(BmpError::UnsupportedBitDepth(16))
        ));
    }
}
