//! The crate's single error type.

use enough::StopReason;

use crate::pixel::Channel;

/// Errors from BMP decoding, encoding and pixel access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Header truncated, signature missing, or pixel-data offset unreachable.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    /// Bit depth other than 24 or 32, read from a header or asked of `set_bit_depth`.
    #[error("unsupported bit depth ({0})")]
    UnsupportedBitDepth(u32),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    /// Pixel data ended before every row was read.
    #[error("unexpected end of pixel data")]
    UnexpectedEof,

    /// Pixel access outside `[0, width) x [0, height)`.
    #[error("specified coordinates are outside image boundaries [{x}, {y}]")]
    CoordinatesOutOfBounds { x: u32, y: u32 },

    #[error("colour value must be between 0 and 255 ({channel}, {value}, [{x}, {y}])")]
    InvalidColourValue {
        channel: Channel,
        value: i32,
        x: u32,
        y: u32,
    },

    /// A zero width or height.
    #[error("image dimensions must be greater than zero: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Plane or file size arithmetic overflows.
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// A header field does not fit in the byte count it is written with.
    #[error("value {value:#x} does not fit in {bytes} byte(s)")]
    ValueTooLarge { value: u64, bytes: usize },

    #[error("buffer size mismatch: need {needed} pixels, got {actual}")]
    BufferSizeMismatch { needed: usize, actual: usize },

    /// Header geometry exceeds a configured [`Limits`](crate::Limits) field.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Encoding or exporting an image that has no pixel grid yet.
    #[error("image not initialised")]
    NotInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
