//! Uncompressed 24-bit BMP decoder (internal).
//!
//! Use [`crate::DecodeRequest`].

mod decode;

use enough::Stop;

use crate::error::PgsError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Decode BMP data into a top-down RGB pixel buffer.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PgsError> {
    let header = decode::parse_header(data)?;
    if let Some(limits) = limits {
        limits.check_dimensions(header.width, header.height)?;
        let out_bytes = header.width as usize * header.height as usize * 3;
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;
    decode::decode_pixels(data, &header, stop)
}
