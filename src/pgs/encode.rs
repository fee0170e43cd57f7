//! PGS encoding: quantize, organize, pack, serialize.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rand::Rng;

use super::{COLOR_COUNT, PIXEL_SIZE, PgsImage};
use crate::error::PgsError;
use crate::palette::PaletteGrid;
use crate::pixel::PixelBuffer;
use crate::quantize::{Quantization, quantize};

/// Run the full encode pipeline on a decoded pixel buffer.
pub(crate) fn encode_pixels<R: Rng>(
    buffer: &PixelBuffer,
    max_iterations: usize,
    rng: &mut R,
    stop: &dyn Stop,
) -> Result<PgsImage, PgsError> {
    // The population is the per-pixel stream, duplicates included, so
    // frequent colors pull their cluster mean harder.
    let quantization = quantize(
        buffer.pixels(),
        usize::from(COLOR_COUNT),
        max_iterations,
        rng,
        stop,
    )?;
    let palette = PaletteGrid::organize(&quantization.means);
    let data = pack_indices(buffer, &quantization, &palette, stop)?;
    Ok(PgsImage::from_parts(
        buffer.width(),
        buffer.height(),
        palette,
        data,
    ))
}

/// Pack one 4-bit palette index per pixel, two per byte, high nibble first.
///
/// The index of a pixel is the composition color → cluster mean → grid
/// cell. Both links exist for every pixel of the quantized buffer; a break
/// means the quantization and palette went out of sync.
fn pack_indices(
    buffer: &PixelBuffer,
    quantization: &Quantization,
    palette: &PaletteGrid,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PgsError> {
    let index_of = palette.index_map();
    let width = buffer.width() as usize;
    let pixels = buffer.pixels();

    let mut out = vec![0u8; pixels.len().div_ceil(2)];
    let mut i = 0usize;
    for (row_idx, row) in pixels.chunks_exact(width).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for &pixel in row {
            let cluster = *quantization
                .assignment
                .get(&pixel)
                .ok_or_else(|| PgsError::InvalidData(alloc::format!(
                    "pixel {pixel:?} missing from quantization assignment"
                )))?;
            let mean = quantization.means[cluster];
            let index = *index_of.get(&mean).ok_or_else(|| {
                PgsError::InvalidData(alloc::format!(
                    "cluster mean {mean:?} missing from palette grid"
                ))
            })?;
            if i % 2 == 0 {
                out[i / 2] = index << 4;
            } else {
                out[i / 2] |= index;
            }
            i += 1;
        }
    }

    Ok(out)
}

impl PgsImage {
    /// Serialize to the on-disk PGS layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(11 + 64 + self.data.len());
        out.extend_from_slice(&(self.width as i32).to_le_bytes());
        out.extend_from_slice(&(self.height as i32).to_le_bytes());
        out.push(PIXEL_SIZE);
        out.extend_from_slice(&COLOR_COUNT.to_le_bytes());
        for row in self.palette.cells() {
            for entry in row {
                out.extend_from_slice(&[entry.a, entry.r, entry.g, entry.b]);
            }
        }
        out.extend_from_slice(&self.data);
        out
    }
}
