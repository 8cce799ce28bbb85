//! Plain PNM parser: P1, P2, P3.

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use super::PnmHeader;
use crate::error::PnmError;
use crate::limits::Limits;
use crate::pixel::{Pixel, PnmFormat};

/// Parse the magic, dimensions and (for P2/P3) max-value lines.
///
/// Consumes exactly the header lines from `lines`, leaving the iterator at
/// the first pixel row.
pub(crate) fn parse_header<'a, I>(lines: &mut I) -> Result<PnmHeader, PnmError>
where
    I: Iterator<Item = &'a str>,
{
    let magic = lines
        .next()
        .ok_or_else(|| PnmError::MalformedHeader("missing format line".into()))?;
    let format = parse_magic(magic.trim())?;

    let dims = lines
        .next()
        .ok_or_else(|| PnmError::MalformedHeader("missing dimensions line".into()))?;
    let mut tokens = dims.split_whitespace();
    let width = parse_dimension(tokens.next(), "width")?;
    let height = parse_dimension(tokens.next(), "height")?;

    let max_value = if format.has_max_value() {
        let line = lines
            .next()
            .ok_or_else(|| PnmError::MalformedHeader("missing max value line".into()))?;
        let line = line.trim();
        match line.parse::<u16>() {
            Ok(0) => {
                return Err(PnmError::MalformedHeader("max value must be positive".into()));
            }
            Ok(v) => v,
            Err(_) => {
                return Err(PnmError::MalformedHeader(format!(
                    "max value `{line}` is not an integer in 1..=65535"
                )));
            }
        }
    } else {
        1
    };

    log::debug!(
        "P{} header: {width}x{height}, max value {max_value}",
        format.tag()
    );

    Ok(PnmHeader {
        format,
        width,
        height,
        max_value,
    })
}

fn parse_magic(line: &str) -> Result<PnmFormat, PnmError> {
    let tag = line
        .strip_prefix('P')
        .ok_or_else(|| PnmError::MalformedHeader(format!("expected `P` magic, got `{line}`")))?;
    // Exactly one digit: `P01` and `P+1` are not P1.
    let digit = match tag.as_bytes() {
        [d] if d.is_ascii_digit() => d - b'0',
        _ => {
            return Err(PnmError::MalformedHeader(format!(
                "malformed format tag `P{tag}`"
            )));
        }
    };
    PnmFormat::from_tag(digit).ok_or_else(|| {
        PnmError::MalformedHeader(format!(
            "unsupported format `P{tag}`, supported are P1, P2 and P3"
        ))
    })
}

fn parse_dimension(token: Option<&str>, name: &str) -> Result<u32, PnmError> {
    let token = token.ok_or_else(|| PnmError::MalformedHeader(format!("missing {name}")))?;
    match token.parse::<u32>() {
        Ok(0) => Err(PnmError::MalformedHeader(format!("{name} must be positive"))),
        Ok(v) => Ok(v),
        Err(_) => Err(PnmError::MalformedHeader(format!(
            "{name} `{token}` is not a positive integer"
        ))),
    }
}

/// Parse every remaining line as one grid row.
///
/// The grid has as many rows as there are lines; the declared height is
/// not used to truncate or pad.
pub(crate) fn parse_rows<'a, I>(
    lines: I,
    header: &PnmHeader,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<Vec<Pixel>>, PnmError>
where
    I: Iterator<Item = &'a str>,
{
    let mut rows = Vec::new();
    let mut cells: u64 = 0;
    let mut over_max: usize = 0;

    for (row_idx, line) in lines.enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let row = parse_row(line, header.format, row_idx)?;
        cells += row.len() as u64;
        if let Some(limits) = limits {
            limits.check_pixels(cells)?;
        }
        over_max += row.iter().filter(|p| p.peak() > header.max_value).count();
        rows.push(row);
    }

    if over_max > 0 {
        log::debug!(
            "{over_max} pixels exceed max value {}, kept unchanged",
            header.max_value
        );
    }
    if rows.len() != header.height as usize {
        log::debug!(
            "declared height {} but found {} pixel rows",
            header.height,
            rows.len()
        );
    }

    Ok(rows)
}

fn parse_row(line: &str, format: PnmFormat, row_idx: usize) -> Result<Vec<Pixel>, PnmError> {
    let tokens = line.split_whitespace();

    match format {
        PnmFormat::BiLevel => tokens
            .map(|token| parse_bit(token, row_idx).map(Pixel::Bit))
            .collect(),
        PnmFormat::Grayscale => tokens
            .map(|token| parse_sample(token, row_idx).map(Pixel::Gray))
            .collect(),
        PnmFormat::Rgb => {
            let values = tokens
                .map(|token| parse_sample(token, row_idx))
                .collect::<Result<Vec<u16>, _>>()?;
            let chunks = values.chunks_exact(3);
            if !chunks.remainder().is_empty() {
                log::trace!(
                    "row {row_idx}: dropping {} trailing samples",
                    chunks.remainder().len()
                );
            }
            Ok(chunks
                .map(|c| Pixel::Rgb {
                    red: c[0],
                    green: c[1],
                    blue: c[2],
                })
                .collect())
        }
    }
}

fn parse_sample(token: &str, row_idx: usize) -> Result<u16, PnmError> {
    token.parse::<u16>().map_err(|_| {
        PnmError::InvalidData(format!(
            "row {row_idx}: `{token}` is not a sample in 0..=65535"
        ))
    })
}

/// Bitmap cell: any integer, nonzero is `on`. Sign and magnitude are not
/// range-checked, so `-1` and `70000` are both `on`.
fn parse_bit(token: &str, row_idx: usize) -> Result<bool, PnmError> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PnmError::InvalidData(format!(
            "row {row_idx}: `{token}` is not an integer"
        )));
    }
    Ok(digits.bytes().any(|b| b != b'0'))
}
