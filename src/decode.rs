use enough::Stop;

use crate::error::PnmError;
use crate::image::PnmImage;
use crate::limits::Limits;
use crate::pnm;

/// Builder for decoding plain PNM text.
///
/// ```
/// use plainpnm::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let image = DecodeRequest::new("P1\n# tiny\n2 1\n1 0\n")
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.width(), 2);
/// # Ok::<(), plainpnm::PnmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    text: &'a str,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Strip comment and blank lines, then parse.
    pub fn decode(self, stop: impl Stop) -> Result<PnmImage, PnmError> {
        pnm::parse(pnm::content_lines(self.text), self.limits, &stop)
    }
}
