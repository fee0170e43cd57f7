use alloc::vec::Vec;
use rgb::RGB8;

use crate::error::PgsError;

/// An owned rectangular RGB pixel buffer.
///
/// Rows are stored top-down, left-to-right. The BMP decoder flips the file's
/// bottom-up scanlines into this order, so every consumer (quantizer, packer,
/// renderer) can iterate the flat slice without caring about file row order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<RGB8>,
}

impl PixelBuffer {
    /// Build a buffer from top-down row-major pixels.
    ///
    /// Fails if the dimensions are zero, overflow, or don't match the pixel
    /// count.
    pub fn new(width: u32, height: u32, pixels: Vec<RGB8>) -> Result<Self, PgsError> {
        if width == 0 || height == 0 {
            return Err(PgsError::InvalidData(
                "pixel buffer dimensions cannot be zero".into(),
            ));
        }
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PgsError::DimensionsTooLarge { width, height })?;
        if pixels.len() != count {
            return Err(PgsError::BufferTooSmall {
                needed: count,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat top-down row-major pixel slice, `width * height` long.
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGB8> {
        self.pixels
    }

    /// Zero-copy 2D view over the pixels.
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGB8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Convert into an owned [`imgref::ImgVec`].
    pub fn into_imgvec(self) -> imgref::ImgVec<RGB8> {
        imgref::ImgVec::new(self.pixels, self.width as usize, self.height as usize)
    }
}
