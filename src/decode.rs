use enough::Stop;

use crate::bmp;
use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;

/// Decode configuration for an in-memory BMP.
///
/// ```no_run
/// use bmpgrid::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let image = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable)?;
/// # Ok::<(), bmpgrid::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose geometry exceeds `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode into an initialized [`Image`].
    pub fn decode(self, stop: impl Stop) -> Result<Image, BmpError> {
        let (store, depth) = bmp::decode(self.data, self.limits, &stop)?;
        Ok(Image::from_parts(store, depth))
    }
}
