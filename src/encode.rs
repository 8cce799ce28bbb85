use alloc::string::String;
use enough::Stop;

use crate::error::PnmError;
use crate::image::PnmImage;
use crate::pixel::PnmFormat;
use crate::pnm;

/// Builder for encoding an image as plain PNM text.
///
/// By default the image is written in its own format. [`as_format`]
/// converts first, e.g. to write an RGB image as P2.
///
/// [`as_format`]: EncodeRequest::as_format
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    format: Option<PnmFormat>,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write as `format`, converting pixels with [`PnmImage::converted`].
    pub fn as_format(format: PnmFormat) -> Self {
        Self {
            format: Some(format),
        }
    }

    pub fn encode(self, image: &PnmImage, stop: impl Stop) -> Result<String, PnmError> {
        match self.format {
            Some(format) if format != image.format() => {
                pnm::encode(&image.converted(format), &stop)
            }
            _ => pnm::encode(image, &stop),
        }
    }
}
