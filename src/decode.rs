use enough::Stop;

use crate::error::PgsError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Builder for decoding BMP bytes into a [`PixelBuffer`].
///
/// ```no_run
/// use pgscodec::{DecodeRequest, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let buffer = DecodeRequest::new(data).decode(Unstoppable)?;
/// # Ok::<(), pgscodec::PgsError>(())
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

    /// Apply resource limits during decoding.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the input as an uncompressed 24-bit BMP.
    ///
    /// Returns a top-down RGB buffer; the file's bottom-up scanline order
    /// and BGR byte order are normalized away here.
    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, PgsError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
