//! # pgscodec
//!
//! Converts uncompressed 24-bit BMP images into PGS — a compact
//! 4-bit-per-pixel indexed format — and back.
//!
//! Encoding quantizes the image down to 16 representative colors with a
//! k-means clusterer, arranges them into a 4×4 palette grid grouped by
//! dominant channel (Red, Green, Blue, Other), and packs two 4-bit palette
//! indices per byte. Decoding is lossless once quantized.
//!
//! ## Non-Goals
//!
//! - BMP bit depths other than uncompressed 24-bit
//! - Animated or progressive formats
//! - Perceptual color distance (plain Euclidean RGB only)
//!
//! ## Usage
//!
//! The crate never touches the filesystem: byte buffers in, byte buffers
//! out. Callers route files between the BMP decoder and the PGS loader by
//! file extension ([`pgs::FILE_EXTENSION`]).
//!
//! ```no_run
//! use pgscodec::{DecodeRequest, EncodeRequest, PgsImage, Unstoppable};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let bmp_bytes: &[u8] = &[]; // your BMP bytes
//!
//! // BMP → pixel buffer
//! let buffer = DecodeRequest::new(bmp_bytes).decode(Unstoppable)?;
//!
//! // Pixel buffer → PGS (seeded for a reproducible palette)
//! let mut rng = SmallRng::seed_from_u64(42);
//! let image = EncodeRequest::new().encode(&buffer, &mut rng, Unstoppable)?;
//! let pgs_bytes = image.to_bytes();
//!
//! // PGS → pixel buffer
//! let reloaded = PgsImage::from_bytes(&pgs_bytes, None, Unstoppable)?;
//! let rendered = reloaded.render(Unstoppable)?;
//! # Ok::<(), pgscodec::PgsError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod encode;
mod error;
mod limits;
mod palette;
pub mod pgs;
mod pixel;
pub mod quantize;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PgsError;
pub use limits::Limits;
pub use palette::{ColorFamily, PaletteGrid};
pub use pgs::PgsImage;
pub use pixel::PixelBuffer;
pub use quantize::{Quantization, quantize};
pub use rgb::{RGB8, RGBA8};
