//! Plain PNM family: P1 (PBM), P2 (PGM), P3 (PPM).
//!
//! The text is line-oriented: a `P<k>` magic line, a `width height` line,
//! a max-value line for P2/P3, then one grid row per line. Comment and
//! blank lines are removed by [`content_lines`] before parsing.

mod decode;
mod encode;

use alloc::string::String;

use crate::error::PnmError;
use crate::image::PnmImage;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PnmFormat;
use enough::{Stop, Unstoppable};

/// Parsed PNM header (internal).
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    pub max_value: u16,
}

/// Lines of `text` that carry data: blank lines and lines starting with
/// `#` (after leading whitespace) are dropped.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| {
        let line = line.trim_start();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Parse already-filtered lines into an image.
///
/// Callers must strip blank and comment lines first (see [`content_lines`]).
/// A blank line that slips through becomes an empty grid row.
pub fn parse_lines<'a, I>(lines: I) -> Result<PnmImage, PnmError>
where
    I: IntoIterator<Item = &'a str>,
{
    parse(lines.into_iter(), None, &Unstoppable)
}

pub(crate) fn parse<'a, I>(
    mut lines: I,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PnmImage, PnmError>
where
    I: Iterator<Item = &'a str>,
{
    let header = decode::parse_header(&mut lines)?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }
    stop.check()?;
    let pixels = decode::parse_rows(lines, &header, limits, stop)?;
    Ok(PnmImage::from_parts(
        header.format,
        header.width,
        header.height,
        header.max_value,
        pixels,
    ))
}

/// Probe header for ImageInfo without parsing pixel rows.
pub(crate) fn probe_header(text: &str) -> Result<ImageInfo, PnmError> {
    let header = decode::parse_header(&mut content_lines(text))?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: header.format,
        max_value: header.max_value,
    })
}

/// Encode to plain PNM text (called from EncodeRequest).
pub(crate) fn encode(image: &PnmImage, stop: &dyn Stop) -> Result<String, PnmError> {
    encode::encode_pnm(image, stop)
}
