//! The [`Image`] facade: geometry, bit depth and pixel planes.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use enough::{Stop, Unstoppable};
use log::{debug, warn};

use crate::bmp;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Channel};
use crate::store::PixelStore;

/// A BMP image held as per-channel planes.
///
/// An `Image` is either uninitialized (no pixel store) or initialized by
/// [`open`](Self::open) or [`set_size`](Self::set_size).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    depth: BitDepth,
    store: Option<PixelStore>,
}

impl Image {
    /// An uninitialized 24-bit image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a BMP file. See [`open`](Self::open) for path handling.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let mut image = Self::new();
        image.open(path)?;
        Ok(image)
    }

    /// Decode an in-memory BMP.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        crate::DecodeRequest::new(data).decode(Unstoppable)
    }

    pub(crate) fn from_parts(store: PixelStore, depth: BitDepth) -> Self {
        Self {
            depth,
            store: Some(store),
        }
    }

    /// Read a BMP file into this image.
    ///
    /// `.bmp` is appended when the path does not already end in `.bmp` or
    /// `.BMP`. Opening an already initialized image does nothing and logs a
    /// warning; call [`close`](Self::close) first.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        self.open_inner(path.as_ref(), None)
    }

    /// Like [`open`](Self::open), rejecting files whose geometry exceeds `limits`.
    pub fn open_with_limits(
        &mut self,
        path: impl AsRef<Path>,
        limits: &Limits,
    ) -> Result<(), BmpError> {
        self.open_inner(path.as_ref(), Some(limits))
    }

    fn open_inner(&mut self, path: &Path, limits: Option<&Limits>) -> Result<(), BmpError> {
        if self.is_initialized() {
            warn!("close the existing bitmap before opening another");
            return Ok(());
        }
        let path = with_bmp_extension(path);
        debug!("opening {}", path.display());
        let data = fs::read(&path)?;
        let (store, depth) = bmp::decode(&data, limits, &Unstoppable)?;
        self.depth = depth;
        self.store = Some(store);
        Ok(())
    }

    /// Release the pixel planes and reset to the 24-bit default.
    pub fn close(&mut self) {
        self.store = None;
        self.depth = BitDepth::default();
    }

    /// Allocate fresh planes of `width` x `height`.
    ///
    /// Colour planes start black; at 32-bit the alpha plane starts opaque.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        self.store = Some(PixelStore::new(width, height, self.depth.has_alpha())?);
        Ok(())
    }

    /// Switch between 24 and 32 bits per pixel.
    ///
    /// Moving to 32-bit adds an opaque alpha plane; moving to 24-bit drops it.
    pub fn set_bit_depth(&mut self, bits: u32) -> Result<(), BmpError> {
        let depth = BitDepth::try_from(bits)?;
        if let Some(store) = &mut self.store {
            store.set_alpha_plane(depth.has_alpha());
        }
        self.depth = depth;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.store.as_ref().map_or(0, PixelStore::width)
    }

    pub fn height(&self) -> u32 {
        self.store.as_ref().map_or(0, PixelStore::height)
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.depth
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// The pixel planes, if initialized.
    pub fn store(&self) -> Option<&PixelStore> {
        self.store.as_ref()
    }

    /// Read one channel at `(x, y)`. Alpha reads 255 on a 24-bit image.
    pub fn colour(&self, x: u32, y: u32, channel: Channel) -> Result<u8, BmpError> {
        self.store
            .as_ref()
            .ok_or(BmpError::CoordinatesOutOfBounds { x, y })?
            .get(x, y, channel)
    }

    /// Write one channel at `(x, y)`.
    ///
    /// `value` must lie in `0..=255`. Alpha writes on a 24-bit image are
    /// ignored with a warning.
    pub fn set_colour(&mut self, x: u32, y: u32, channel: Channel, value: i32) -> Result<(), BmpError> {
        let Ok(byte) = u8::try_from(value) else {
            return Err(BmpError::InvalidColourValue {
                channel,
                value,
                x,
                y,
            });
        };
        let store = self
            .store
            .as_mut()
            .ok_or(BmpError::CoordinatesOutOfBounds { x, y })?;
        if !store.set(x, y, channel, byte)? {
            warn!("24 bpp bitmaps do not support alpha channel, to achieve transparency use 32 bpp");
        }
        Ok(())
    }

    /// Set red, green and blue at `(x, y)` to the same value.
    pub fn set_grey(&mut self, x: u32, y: u32, value: i32) -> Result<(), BmpError> {
        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            self.set_colour(x, y, channel, value)?;
        }
        Ok(())
    }

    /// Encode to an in-memory BMP.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        let store = self.store.as_ref().ok_or(BmpError::NotInitialized)?;
        bmp::encode(store, self.depth, &stop)
    }

    /// Write the image as a BMP file, replacing any existing file.
    ///
    /// `.bmp` is appended to the path as for [`open`](Self::open). Nothing is
    /// written when the image is uninitialized. The file is not written
    /// atomically: an I/O error part way through can leave a partial file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let data = self.encode(Unstoppable)?;
        let path = with_bmp_extension(path.as_ref());
        debug!("exporting {} ({} bytes)", path.display(), data.len());
        if path.exists() {
            fs::remove_file(&path)?;
        }
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(&data)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(feature = "rgb")]
impl Image {
    /// Copy the planes out as interleaved RGBA8, row-major.
    ///
    /// Returns an empty vector for an uninitialized image.
    pub fn to_rgba8(&self) -> Vec<rgb::RGBA8> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        let len = store.width() as usize * store.height() as usize;
        (0..len)
            .map(|idx| {
                let [r, g, b, a] = store.rgba_at(idx);
                rgb::RGBA8::new(r, g, b, a)
            })
            .collect()
    }

    /// Build an image from interleaved RGBA8 pixels, row-major.
    ///
    /// Alpha is dropped for [`BitDepth::Bpp24`].
    pub fn from_rgba8(
        width: u32,
        height: u32,
        pixels: &[rgb::RGBA8],
        depth: BitDepth,
    ) -> Result<Self, BmpError> {
        let mut store = PixelStore::new(width, height, depth.has_alpha())?;
        let needed = width as usize * height as usize;
        if pixels.len() != needed {
            return Err(BmpError::BufferSizeMismatch {
                needed,
                actual: pixels.len(),
            });
        }
        for channel in Channel::ALL {
            let Some(plane) = store.plane_mut(channel) else {
                continue;
            };
            for (dst, px) in plane.iter_mut().zip(pixels) {
                *dst = match channel {
                    Channel::Red => px.r,
                    Channel::Green => px.g,
                    Channel::Blue => px.b,
                    Channel::Alpha => px.a,
                };
            }
        }
        Ok(Self::from_parts(store, depth))
    }
}

#[cfg(feature = "imgref")]
impl Image {
    /// Copy the planes out as an [`imgref::ImgVec`] of RGBA8.
    pub fn to_imgvec(&self) -> Option<imgref::ImgVec<rgb::RGBA8>> {
        let store = self.store.as_ref()?;
        Some(imgref::ImgVec::new(
            self.to_rgba8(),
            store.width() as usize,
            store.height() as usize,
        ))
    }
}

/// Append `.bmp` unless the path already ends in `.bmp` or `.BMP`.
pub(crate) fn with_bmp_extension(path: &Path) -> PathBuf {
    let raw = path.as_os_str();
    let bytes = raw.as_encoded_bytes();
    if bytes.ends_with(b".bmp") || bytes.ends_with(b".BMP") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(raw);
    name.push(".bmp");
    PathBuf::from(name)
}
