/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count, checked against both the declared
    /// `width * height` and the number of cells actually decoded.
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// Check declared dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::PnmError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::PnmError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::PnmError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        self.check_pixels(u64::from(width) * u64::from(height))
    }

    /// Check a running count of decoded cells.
    pub(crate) fn check_pixels(&self, pixels: u64) -> Result<(), crate::PnmError> {
        if let Some(max_px) = self.max_pixels {
            if pixels > max_px {
                return Err(crate::PnmError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }
}
