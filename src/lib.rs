//! # bmpgrid
//!
//! Uncompressed Windows BMP decoder and encoder working on per-channel
//! pixel planes.
//!
//! ## Supported Formats
//!
//! - **24-bit**: B,G,R pixels, rows padded to 4 bytes, no alpha
//! - **32-bit**: B,G,R,A pixels routed through the colour-mask table;
//!   written as BITMAPV3INFOHEADER with A,B,G,R byte order
//!
//! Rows are bottom-up on disk in both directions.
//!
//! ## Non-Goals
//!
//! - RLE, embedded JPEG/PNG, palettes, 16-bit pixels
//! - ICC profiles
//! - Top-down (negative height) files
//!
//! ## Usage
//!
//! ```no_run
//! use bmpgrid::{Channel, Image};
//!
//! let mut image = Image::new();
//! image.set_bit_depth(32)?;
//! image.set_size(2, 2)?;
//! image.set_colour(0, 0, Channel::Red, 255)?;
//! image.set_grey(1, 1, 128)?;
//! image.export("out")?; // writes out.bmp
//!
//! let reopened = Image::from_path("out.bmp")?;
//! assert_eq!(reopened.colour(0, 0, Channel::Red)?, 255);
//! # Ok::<(), bmpgrid::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod decode;
mod error;
mod image;
mod info;
mod limits;
mod pixel;
mod store;

// Re-exports
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use image::Image;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{BitDepth, Channel};
pub use store::PixelStore;
