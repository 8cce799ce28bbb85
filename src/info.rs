use crate::error::PnmError;
use crate::pixel::PnmFormat;

/// Header facts read without parsing any pixel rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    /// Always 1 for [`PnmFormat::BiLevel`].
    pub max_value: u16,
}

impl ImageInfo {
    /// Probe plain PNM text. Comment and blank lines are skipped.
    pub fn from_text(text: &str) -> Result<Self, PnmError> {
        crate::pnm::probe_header(text)
    }
}
