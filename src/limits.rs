use crate::PgsError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Checked after header parsing,
/// before any pixel allocation.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for output buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, max: u64) -> PgsError {
    PgsError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
}

impl Limits {
    /// Check image dimensions against limits.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), PgsError> {
        let (w, h) = (u64::from(width), u64::from(height));
        match self.max_width {
            Some(max) if w > max => return Err(exceeded("width", w, max)),
            _ => {}
        }
        match self.max_height {
            Some(max) if h > max => return Err(exceeded("height", h, max)),
            _ => {}
        }
        match self.max_pixels {
            Some(max) if w * h > max => return Err(exceeded("pixel count", w * h, max)),
            _ => {}
        }
        Ok(())
    }

    /// Check that an output allocation is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), PgsError> {
        match self.max_memory_bytes {
            Some(max) if bytes as u64 > max => Err(exceeded("allocation bytes", bytes as u64, max)),
            _ => Ok(()),
        }
    }
}
