//! PGS deserialization and rendering.

use alloc::vec::Vec;

use enough::Stop;
use rgb::{RGB8, RGBA8};

use super::{COLOR_COUNT, PIXEL_SIZE, PgsImage};
use crate::error::PgsError;
use crate::limits::Limits;
use crate::palette::PaletteGrid;
use crate::pixel::PixelBuffer;

/// Header bytes before the palette: two i32 dimensions, u8 pixel size,
/// u16 color count.
const HEADER_LEN: usize = 11;
/// 16 palette entries × 4 bytes.
const PALETTE_LEN: usize = 64;

impl PgsImage {
    /// Deserialize a PGS byte stream.
    ///
    /// The pixel-size and color-count fields are the format's capability
    /// check: any value other than 4 and 16 is rejected rather than
    /// interpreted. Trailing bytes beyond the packed data are ignored; a
    /// short read is an error.
    pub fn from_bytes(
        data: &[u8],
        limits: Option<&Limits>,
        stop: impl Stop,
    ) -> Result<PgsImage, PgsError> {
        let header = data.get(..HEADER_LEN).ok_or(PgsError::UnexpectedEof)?;
        let width = i32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let height = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let pixel_size = header[8];
        let color_count = u16::from_le_bytes([header[9], header[10]]);

        if pixel_size != PIXEL_SIZE {
            return Err(PgsError::InvalidHeader(alloc::format!(
                "PGS pixel size is {pixel_size}, expected {PIXEL_SIZE}"
            )));
        }
        if color_count != COLOR_COUNT {
            return Err(PgsError::InvalidHeader(alloc::format!(
                "PGS color count is {color_count}, expected {COLOR_COUNT}"
            )));
        }
        if width <= 0 {
            return Err(PgsError::InvalidHeader(alloc::format!(
                "PGS width is {width}"
            )));
        }
        if height <= 0 {
            return Err(PgsError::InvalidHeader(alloc::format!(
                "PGS height is {height}"
            )));
        }
        let (width, height) = (width as u32, height as u32);

        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PgsError::DimensionsTooLarge { width, height })?;
        let packed_len = count.div_ceil(2);
        if let Some(limits) = limits {
            limits.check_dimensions(width, height)?;
            limits.check_memory(packed_len)?;
        }
        stop.check()?;

        let palette_bytes = data
            .get(HEADER_LEN..HEADER_LEN + PALETTE_LEN)
            .ok_or(PgsError::UnexpectedEof)?;
        let mut cells = [[RGBA8::new(0, 0, 0, 0); 4]; 4];
        for (cell, entry) in cells
            .iter_mut()
            .flatten()
            .zip(palette_bytes.chunks_exact(4))
        {
            // Entries are stored alpha-first.
            *cell = RGBA8::new(entry[1], entry[2], entry[3], entry[0]);
        }

        let packed_start = HEADER_LEN + PALETTE_LEN;
        let packed = data
            .get(packed_start..packed_start + packed_len)
            .ok_or(PgsError::UnexpectedEof)?;

        Ok(PgsImage::from_parts(
            width,
            height,
            PaletteGrid::from_cells(cells),
            packed.to_vec(),
        ))
    }

    /// Render the packed indices back to an RGB pixel buffer.
    ///
    /// Stops after exactly `width * height` pixels; the trailing unused
    /// nibble of an odd-sized image is never rendered. Palette alpha is not
    /// part of the output.
    pub fn render(&self, stop: impl Stop) -> Result<PixelBuffer, PgsError> {
        let count = self.width() as usize * self.height() as usize;
        let mut pixels: Vec<RGB8> = Vec::with_capacity(count);

        'bytes: for (i, &byte) in self.packed_data().iter().enumerate() {
            if i % 4096 == 0 {
                stop.check()?;
            }
            for index in [byte >> 4, byte & 0b1111] {
                if pixels.len() == count {
                    break 'bytes;
                }
                let entry = self.palette().color(index);
                pixels.push(RGB8::new(entry.r, entry.g, entry.b));
            }
        }

        PixelBuffer::new(self.width(), self.height(), pixels)
    }
}
