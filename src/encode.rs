use enough::Stop;
use rand::Rng;

use crate::error::PgsError;
use crate::pgs::PgsImage;
use crate::pixel::PixelBuffer;
use crate::quantize::DEFAULT_MAX_ITERATIONS;

/// Builder for encoding a [`PixelBuffer`] into a [`PgsImage`].
///
/// Runs the quantize → organize → pack pipeline. The random source for
/// cluster initialization is passed in explicitly, so a seeded generator
/// gives a reproducible palette.
///
/// ```no_run
/// use pgscodec::{EncodeRequest, PixelBuffer, Unstoppable};
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// # let buffer: PixelBuffer = todo!();
/// let mut rng = SmallRng::seed_from_u64(42);
/// let image = EncodeRequest::new().encode(&buffer, &mut rng, Unstoppable)?;
/// let bytes = image.to_bytes();
/// # Ok::<(), pgscodec::PgsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    max_iterations: usize,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Cap the quantizer's refinement iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Quantize `buffer` to 16 colors and pack it into a [`PgsImage`].
    pub fn encode<R: Rng>(
        &self,
        buffer: &PixelBuffer,
        rng: &mut R,
        stop: impl Stop,
    ) -> Result<PgsImage, PgsError> {
        crate::pgs::encode::encode_pixels(buffer, self.max_iterations, rng, &stop)
    }
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self::new()
    }
}
