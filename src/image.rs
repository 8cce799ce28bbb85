//! The editable pixel buffer.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::PnmError;
use crate::pixel::{Pixel, PnmFormat};
use crate::raster::{self, Point};

/// Max-value given to non-bitmap canvases created by [`PnmImage::of_size`].
pub const DEFAULT_MAX_VALUE: u16 = 255;

/// Largest grid, in cells, that [`PnmImage::of_size`] and
/// [`PnmImage::scaled`] will allocate. Larger requests fail with
/// [`PnmError::DimensionsTooLarge`].
pub const MAX_PIXELS: u64 = 1 << 28;

/// A plain PNM image: header metadata plus a row-major grid of [`Pixel`]s.
///
/// Format and dimensions are fixed at construction. Images built with
/// [`PnmImage::new`] or [`PnmImage::of_size`] are always rectangular.
/// Parsed images keep the grid exactly as the text laid it out, so the row
/// count may differ from the declared `height`; see [`is_rectangular`].
///
/// [`is_rectangular`]: PnmImage::is_rectangular
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PnmImage {
    format: PnmFormat,
    width: u32,
    height: u32,
    max_value: u16,
    pixels: Vec<Vec<Pixel>>,
}

impl PnmImage {
    /// Build an image from an explicit grid.
    ///
    /// `max_value` is ignored for [`PnmFormat::BiLevel`] (always 1). Fails
    /// with [`PnmError::InvalidArgument`] on zero dimensions, a zero
    /// max-value, a grid that is not `height` rows of `width` cells, a cell
    /// of the wrong variant, or a channel above `max_value`.
    pub fn new(
        format: PnmFormat,
        width: u32,
        height: u32,
        max_value: u16,
        pixels: Vec<Vec<Pixel>>,
    ) -> Result<Self, PnmError> {
        if width == 0 || height == 0 {
            return Err(PnmError::InvalidArgument(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let max_value = effective_max(format, max_value)?;
        if pixels.len() != height as usize {
            return Err(PnmError::InvalidArgument(format!(
                "expected {height} rows, got {}",
                pixels.len()
            )));
        }
        for (y, row) in pixels.iter().enumerate() {
            if row.len() != width as usize {
                return Err(PnmError::InvalidArgument(format!(
                    "row {y} has {} pixels, expected {width}",
                    row.len()
                )));
            }
            for px in row {
                check_pixel(format, max_value, px)?;
            }
        }
        Ok(Self {
            format,
            width,
            height,
            max_value,
            pixels,
        })
    }

    /// Parser path: variants are already uniform, grid shape is trusted as-is.
    pub(crate) fn from_parts(
        format: PnmFormat,
        width: u32,
        height: u32,
        max_value: u16,
        pixels: Vec<Vec<Pixel>>,
    ) -> Self {
        debug_assert!(pixels.iter().flatten().all(|p| p.format() == format));
        Self {
            format,
            width,
            height,
            max_value: if format.has_max_value() { max_value } else { 1 },
            pixels,
        }
    }

    /// A `width`×`height` canvas filled with the format's background value.
    ///
    /// Grayscale and RGB canvases use [`DEFAULT_MAX_VALUE`].
    pub fn of_size(width: u32, height: u32, format: PnmFormat) -> Result<Self, PnmError> {
        Self::of_size_with_max(width, height, format, DEFAULT_MAX_VALUE)
    }

    pub fn of_size_with_max(
        width: u32,
        height: u32,
        format: PnmFormat,
        max_value: u16,
    ) -> Result<Self, PnmError> {
        if width == 0 || height == 0 {
            return Err(PnmError::InvalidArgument(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let max_value = effective_max(format, max_value)?;
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(PnmError::DimensionsTooLarge {
                width: u64::from(width),
                height: u64::from(height),
            });
        }
        let row = vec![format.background(); width as usize];
        Ok(Self {
            format,
            width,
            height,
            max_value,
            pixels: vec![row; height as usize],
        })
    }

    pub fn format(&self) -> PnmFormat {
        self.format
    }

    /// Declared width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height. May differ from [`grid_height`](Self::grid_height)
    /// for parsed images.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Number of rows actually present in the grid.
    pub fn grid_height(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the grid is exactly `height` rows of `width` cells.
    pub fn is_rectangular(&self) -> bool {
        self.pixels.len() == self.height as usize
            && self.pixels.iter().all(|r| r.len() == self.width as usize)
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.pixels
    }

    pub fn row(&self, y: usize) -> Option<&[Pixel]> {
        self.pixels.get(y).map(Vec::as_slice)
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.pixels.get(y)?.get(x).copied()
    }

    /// Overwrite one cell. The pixel must match the image format and
    /// stay within `max_value`.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<(), PnmError> {
        check_pixel(self.format, self.max_value, &pixel)?;
        let (width, height) = (self.width, self.height);
        let cell = self
            .pixels
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(PnmError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width,
                height,
            })?;
        *cell = pixel;
        Ok(())
    }

    pub fn into_pixels(self) -> Vec<Vec<Pixel>> {
        self.pixels
    }

    /// Copy of the image in another format, keeping dimensions, grid shape
    /// and max-value (1 when the target is a bitmap).
    ///
    /// Color reduces to gray with integer Rec. 601 luma. Gray reduces to a
    /// bitmap by thresholding at half of `max_value`: darker cells are `on`.
    pub fn converted(&self, format: PnmFormat) -> Self {
        if format == self.format {
            return self.clone();
        }
        let max = self.max_value;
        let pixels = self
            .pixels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|px| match format {
                        PnmFormat::BiLevel => {
                            Pixel::Bit(u32::from(luma(px, max)) * 2 < u32::from(max))
                        }
                        PnmFormat::Grayscale => Pixel::Gray(luma(px, max)),
                        PnmFormat::Rgb => {
                            let [red, green, blue] = px.channels(max);
                            Pixel::Rgb { red, green, blue }
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_parts(format, self.width, self.height, max, pixels)
    }

    /// Nearest-neighbor upscale: every pixel becomes a `factor`×`factor` block.
    ///
    /// `factor == 1` returns an identical copy; `factor == 0` fails with
    /// [`PnmError::InvalidArgument`]. Fails with
    /// [`PnmError::DimensionsTooLarge`] when the new dimensions overflow `u32`
    /// or the scaled grid would exceed [`MAX_PIXELS`] cells.
    pub fn scaled(&self, factor: u32) -> Result<Self, PnmError> {
        if factor == 0 {
            return Err(PnmError::InvalidArgument(
                "scale factor must be at least 1".into(),
            ));
        }
        let too_large = || PnmError::DimensionsTooLarge {
            width: u64::from(self.width) * u64::from(factor),
            height: u64::from(self.height) * u64::from(factor),
        };
        let width = self.width.checked_mul(factor).ok_or_else(too_large)?;
        let height = self.height.checked_mul(factor).ok_or_else(too_large)?;

        // Bound what is actually allocated: the grid present, not the header.
        let k = u64::from(factor);
        let cells: u64 = self.pixels.iter().map(|row| row.len() as u64).sum();
        let scaled_cells = cells
            .checked_mul(k * k)
            .ok_or_else(too_large)?;
        let scaled_rows = (self.pixels.len() as u64)
            .checked_mul(k)
            .ok_or_else(too_large)?;
        if scaled_cells.max(scaled_rows) > MAX_PIXELS {
            return Err(too_large());
        }

        let f = factor as usize;
        let mut pixels = Vec::with_capacity(self.pixels.len().saturating_mul(f));
        for row in &self.pixels {
            let wide: Vec<Pixel> = row
                .iter()
                .flat_map(|&px| core::iter::repeat_n(px, f))
                .collect();
            for _ in 1..f {
                pixels.push(wide.clone());
            }
            pixels.push(wide);
        }

        log::trace!(
            "scaled {}x{} by {factor} to {width}x{height}",
            self.width,
            self.height
        );

        Ok(Self {
            format: self.format,
            width,
            height,
            max_value: self.max_value,
            pixels,
        })
    }

    /// Draw a segment with the format's foreground value.
    ///
    /// Bitmaps get `on` cells; grayscale and RGB images get `max_value` on
    /// every channel. See [`raster::line_cells`] for the covered cells.
    pub fn draw_line(
        &mut self,
        start: impl Into<Point>,
        end: impl Into<Point>,
    ) -> Result<(), PnmError> {
        let ink = self.format.foreground(self.max_value);
        self.draw_line_with(start, end, ink)
    }

    /// Draw a segment with an explicit pixel value.
    ///
    /// Both endpoints must lie inside the declared dimensions and the grid.
    /// Nothing is written unless every covered cell exists.
    pub fn draw_line_with(
        &mut self,
        start: impl Into<Point>,
        end: impl Into<Point>,
        pixel: Pixel,
    ) -> Result<(), PnmError> {
        let (start, end) = (start.into(), end.into());
        check_pixel(self.format, self.max_value, &pixel)?;
        self.check_point(start)?;
        self.check_point(end)?;

        let cells = raster::line_cells(start, end);
        for &p in &cells {
            self.check_point(p)?;
        }
        for p in cells {
            self.pixels[p.y as usize][p.x as usize] = pixel;
        }
        Ok(())
    }

    fn check_point(&self, p: Point) -> Result<(), PnmError> {
        let inside = p.x >= 0
            && p.y >= 0
            && (p.x as u32) < self.width
            && (p.y as u32) < self.height
            && self
                .pixels
                .get(p.y as usize)
                .is_some_and(|row| (p.x as usize) < row.len());
        if inside {
            Ok(())
        } else {
            Err(PnmError::OutOfBounds {
                x: i64::from(p.x),
                y: i64::from(p.y),
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Export as 8-bit RGBA bytes (opaque), channels rescaled from
    /// `0..=max_value` to `0..=255`. Bitmap `on` cells become black.
    ///
    /// Requires a rectangular grid; values above `max_value` saturate.
    pub fn to_rgba8(&self) -> Result<Vec<u8>, PnmError> {
        if !self.is_rectangular() {
            return Err(PnmError::InvalidData(format!(
                "grid of {} rows does not match declared {}x{}",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let mut out = Vec::with_capacity(w * h * 4);
        for px in self.pixels.iter().flatten() {
            for c in px.channels(self.max_value) {
                out.push(to_u8(c, self.max_value));
            }
            out.push(255);
        }
        Ok(out)
    }

    /// [`to_rgba8`](Self::to_rgba8) as an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<rgb::RGBA8>, PnmError> {
        use rgb::FromSlice as _;

        let bytes = self.to_rgba8()?;
        Ok(imgref::ImgVec::new(
            bytes.as_rgba().to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

fn effective_max(format: PnmFormat, max_value: u16) -> Result<u16, PnmError> {
    if !format.has_max_value() {
        return Ok(1);
    }
    if max_value == 0 {
        return Err(PnmError::InvalidArgument(
            "max value must be at least 1".into(),
        ));
    }
    Ok(max_value)
}

fn check_pixel(format: PnmFormat, max_value: u16, px: &Pixel) -> Result<(), PnmError> {
    if px.format() != format {
        return Err(PnmError::InvalidArgument(format!(
            "{:?} pixel in {format:?} image",
            px.format()
        )));
    }
    if px.peak() > max_value {
        return Err(PnmError::InvalidArgument(format!(
            "pixel {px:?} exceeds max value {max_value}"
        )));
    }
    Ok(())
}

fn luma(px: &Pixel, max_value: u16) -> u16 {
    let [r, g, b] = px.channels(max_value).map(u32::from);
    ((r * 299 + g * 587 + b * 114 + 500) / 1000) as u16
}

fn to_u8(value: u16, max_value: u16) -> u8 {
    let max = u32::from(max_value.max(1));
    let scaled = (u32::from(value) * 255 + max / 2) / max;
    scaled.min(255) as u8
}
