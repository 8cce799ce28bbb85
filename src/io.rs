//! File and stream helpers (`std` feature).

use std::io::{Read, Write};
use std::path::Path;

use enough::Unstoppable;

use crate::error::PnmError;
use crate::image::PnmImage;

/// Read and decode a plain PNM file.
pub fn read_path(path: impl AsRef<Path>) -> Result<PnmImage, PnmError> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    crate::decode(&text, Unstoppable)
}

/// Read all of `reader` and decode it, e.g. from stdin.
pub fn read_from<R: Read>(mut reader: R) -> Result<PnmImage, PnmError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    crate::decode(&text, Unstoppable)
}

/// Encode `image` to `path`, replacing any existing file.
pub fn write_path(path: impl AsRef<Path>, image: &PnmImage) -> Result<(), PnmError> {
    let path = path.as_ref();
    log::debug!("writing {}", path.display());
    let text = crate::encode(image, Unstoppable)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Encode `image` into `writer`, e.g. stdout.
pub fn write_to<W: Write>(mut writer: W, image: &PnmImage) -> Result<(), PnmError> {
    let text = crate::encode(image, Unstoppable)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
