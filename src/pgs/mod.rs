//! PGS: a compact 4-bit-per-pixel indexed image format.
//!
//! Layout, all little-endian, no compression:
//!
//! ```text
//! i32 width | i32 height | u8 pixel_size(=4) | u16 color_count(=16)
//! 16 × (u8 a, u8 r, u8 g, u8 b) palette, family-major
//! ceil(width*height/2) packed nibble indices
//! ```
//!
//! There is no magic number; the fixed pixel-size and color-count fields
//! double as the capability check. Callers route files here by the
//! [`FILE_EXTENSION`] convention.

mod decode;
pub(crate) mod encode;

use alloc::vec::Vec;

use crate::palette::PaletteGrid;

/// Bits per packed pixel index.
pub const PIXEL_SIZE: u8 = 4;

/// Palette entry count.
pub const COLOR_COUNT: u16 = 16;

/// Conventional file extension for routing by the caller.
pub const FILE_EXTENSION: &str = "pgs";

/// A quantized image: dimensions, organized palette, and packed indices.
///
/// Immutable once constructed, either by [`crate::EncodeRequest`] or by
/// [`PgsImage::from_bytes`]. Re-encoding means building a new instance.
#[derive(Clone, Debug)]
pub struct PgsImage {
    width: u32,
    height: u32,
    palette: PaletteGrid,
    /// Byte `i` holds pixel `2i`'s index in its high nibble, pixel `2i+1`'s
    /// in its low nibble, top-down row-major. For an odd pixel count the
    /// final low nibble is zero and carries no pixel.
    data: Vec<u8>,
}

impl PgsImage {
    pub(crate) fn from_parts(width: u32, height: u32, palette: PaletteGrid, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize * height as usize).div_ceil(2)
        );
        Self {
            width,
            height,
            palette,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &PaletteGrid {
        &self.palette
    }

    /// The packed nibble indices, `ceil(width*height/2)` bytes.
    pub fn packed_data(&self) -> &[u8] {
        &self.data
    }
}
