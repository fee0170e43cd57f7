//! BMP header parsing and scanline decoding.
//!
//! Accepts only the classic layout: 14-byte file header, 40-byte info
//! header, uncompressed 24-bit bottom-up pixel data with rows padded to
//! 4-byte boundaries. Everything else is rejected up front.

use alloc::vec;

use enough::Stop;
use rgb::RGB8;

use crate::error::PgsError;
use crate::pixel::PixelBuffer;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_u8(&mut self) -> Result<u8, PgsError> {
        let b = *self.data.get(self.pos).ok_or(PgsError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    fn read_u16_le(&mut self) -> Result<u16, PgsError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + 2)
            .ok_or(PgsError::UnexpectedEof)?;
        self.pos += 2;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32_le(&mut self) -> Result<u32, PgsError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + 4)
            .ok_or(PgsError::UnexpectedEof)?;
        self.pos += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i32_le(&mut self) -> Result<i32, PgsError> {
        self.read_u32_le().map(|v| v as i32)
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], PgsError> {
        let end = self.pos.checked_add(n).ok_or(PgsError::UnexpectedEof)?;
        let slice = self.data.get(self.pos..end).ok_or(PgsError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }
}

// ── Header ──────────────────────────────────────────────────────────

pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    /// Offset of the first scanline, from the start of the stream.
    pub data_offset: usize,
}

/// Parse the 14-byte file header and 40-byte info header.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, PgsError> {
    let mut bytes = Cursor::new(data);

    if bytes.read_u8()? != b'B' || bytes.read_u8()? != b'M' {
        return Err(PgsError::UnrecognizedFormat);
    }
    let _file_size = bytes.read_u32_le()?;
    let _reserved1 = bytes.read_u16_le()?;
    let _reserved2 = bytes.read_u16_le()?;
    let _data_offset = bytes.read_u32_le()?;

    let _info_size = bytes.read_u32_le()?;
    let width = bytes.read_i32_le()?;
    let height = bytes.read_i32_le()?;
    let _planes = bytes.read_u16_le()?;
    let bpp = bytes.read_u16_le()?;
    let compression = bytes.read_u32_le()?;
    let _image_size = bytes.read_u32_le()?;
    let _x_pixels_per_meter = bytes.read_u32_le()?;
    let _y_pixels_per_meter = bytes.read_u32_le()?;
    let _palette_size = bytes.read_u32_le()?;
    let _important_colors = bytes.read_u32_le()?;

    if bpp != 24 {
        return Err(PgsError::UnsupportedVariant(alloc::format!(
            "BMP bit depth is {bpp}, only 24 is supported"
        )));
    }
    if compression != 0 {
        return Err(PgsError::UnsupportedVariant(alloc::format!(
            "BMP compression type {compression}, only uncompressed is supported"
        )));
    }
    if width <= 0 {
        return Err(PgsError::InvalidHeader(alloc::format!(
            "BMP width is {width}"
        )));
    }
    if height <= 0 {
        return Err(PgsError::InvalidHeader(alloc::format!(
            "BMP height is {height}"
        )));
    }

    Ok(BmpHeader {
        width: width as u32,
        height: height as u32,
        data_offset: bytes.pos,
    })
}

/// Read the bottom-up BGR scanlines into a top-down RGB buffer.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PgsError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let count = w
        .checked_mul(h)
        .ok_or(PgsError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;

    let row_bytes = w * 3;
    // Each scanline is padded up to the next multiple of 4 bytes.
    let padding = row_bytes.next_multiple_of(4) - row_bytes;

    let mut bytes = Cursor::new(data);
    bytes.pos = header.data_offset;

    let mut pixels = vec![RGB8::new(0, 0, 0); count];
    // Scanlines are stored bottom-up; fill the output top-down.
    for line in 0..h {
        if line % 16 == 0 {
            stop.check()?;
        }
        let scanline = bytes.read_slice(row_bytes)?;
        if padding > 0 {
            bytes.read_slice(padding)?;
        }
        let row = &mut pixels[(h - 1 - line) * w..(h - line) * w];
        for (pixel, bgr) in row.iter_mut().zip(scanline.chunks_exact(3)) {
            *pixel = RGB8::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    PixelBuffer::new(header.width, header.height, pixels)
}
