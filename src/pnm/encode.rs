//! Plain PNM serializer: P1, P2, P3.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use enough::Stop;

use crate::error::PnmError;
use crate::image::PnmImage;
use crate::pixel::Pixel;

/// Magic, dimensions and (for P2/P3) max-value lines.
fn write_header<W: fmt::Write>(image: &PnmImage, out: &mut W) -> fmt::Result {
    writeln!(out, "P{}", image.format().tag())?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    if image.format().has_max_value() {
        writeln!(out, "{}", image.max_value())?;
    }
    Ok(())
}

/// One grid row, pixels separated by single spaces.
fn write_row<W: fmt::Write>(row: &[Pixel], out: &mut W) -> fmt::Result {
    let mut pixels = row.iter();
    if let Some(first) = pixels.next() {
        write!(out, "{first}")?;
        for px in pixels {
            write!(out, " {px}")?;
        }
    }
    out.write_char('\n')
}

/// Encode an image to its canonical plain-text form.
pub(crate) fn encode_pnm(image: &PnmImage, stop: &dyn Stop) -> Result<String, PnmError> {
    // Sized from the grid actually present, not the declared dimensions.
    let cells: usize = image.rows().iter().map(Vec::len).sum();
    let samples = cells.saturating_mul(image.format().samples_per_pixel());
    let mut out = String::with_capacity(samples.saturating_mul(4).saturating_add(32));

    write_header(image, &mut out).map_err(formatter_error)?;
    for (row_idx, row) in image.rows().iter().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        write_row(row, &mut out).map_err(formatter_error)?;
    }
    Ok(out)
}

fn formatter_error(_: fmt::Error) -> PnmError {
    PnmError::InvalidData("formatter rejected output".into())
}

/// Writes the same text as [`crate::encode`].
impl fmt::Display for PnmImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(self, f)?;
        for row in self.rows() {
            write_row(row, f)?;
        }
        Ok(())
    }
}
