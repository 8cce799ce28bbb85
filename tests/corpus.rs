//! Test corpus: parser edge cases, scaling, line drawing, limits and export.

use enough::{Stop, StopReason, Unstoppable};
use plainpnm::*;

fn blank(w: u32, h: u32) -> PnmImage {
    PnmImage::of_size(w, h, PnmFormat::BiLevel).unwrap()
}

fn on_cells(image: &PnmImage) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (y, row) in image.rows().iter().enumerate() {
        for (x, px) in row.iter().enumerate() {
            if px.is_on() {
                cells.push((x, y));
            }
        }
    }
    cells
}

struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

// ── Parser ───────────────────────────────────────────────────────────

#[test]
fn parse_bilevel_nonzero_is_on() {
    let image = pnm::parse_lines(["P1", "3 1", "0 1 7"]).unwrap();
    assert_eq!(image.format(), PnmFormat::BiLevel);
    assert_eq!(image.max_value(), 1);
    assert_eq!(
        image.row(0).unwrap(),
        &[Pixel::Bit(false), Pixel::Bit(true), Pixel::Bit(true)]
    );
}

#[test]
fn parse_rgb_drops_partial_group() {
    let image = pnm::parse_lines(["P3", "2 2", "255", "1 2 3 4 5 6 7", "9 9"]).unwrap();
    assert_eq!(
        image.row(0).unwrap(),
        &[
            Pixel::Rgb { red: 1, green: 2, blue: 3 },
            Pixel::Rgb { red: 4, green: 5, blue: 6 },
        ]
    );
    // A line with fewer than three samples is an empty row, not a skipped one.
    assert_eq!(image.grid_height(), 2);
    assert!(image.row(1).unwrap().is_empty());
    assert!(!image.is_rectangular());
}

#[test]
fn declared_height_is_metadata_only() {
    let short = pnm::parse_lines(["P2", "2 4", "15", "1 2", "3 4"]).unwrap();
    assert_eq!(short.height(), 4);
    assert_eq!(short.grid_height(), 2);

    let tall = pnm::parse_lines(["P1", "2 1", "1 0", "0 1", "1 1"]).unwrap();
    assert_eq!(tall.height(), 1);
    assert_eq!(tall.grid_height(), 3);
    assert_eq!(tall.get(1, 2), Some(Pixel::Bit(true)));
}

#[test]
fn gray_above_max_is_kept() {
    let image = pnm::parse_lines(["P2", "1 1", "10", "42"]).unwrap();
    assert_eq!(image.get(0, 0), Some(Pixel::Gray(42)));
}

#[test]
fn header_only_gives_empty_grid() {
    let image = pnm::parse_lines(["P2", "3 3", "255"]).unwrap();
    assert_eq!(image.grid_height(), 0);
    assert_eq!(image.width(), 3);
}

#[test]
fn comments_and_blank_lines_are_stripped() {
    let text = "P1\n# a comment\n\n2 2\n  # indented comment\n1 0\n\n0 1\n";
    let image = decode(text, Unstoppable).unwrap();
    assert_eq!(image.grid_height(), 2);
    assert_eq!(on_cells(&image), [(0, 0), (1, 1)]);

    let lines: Vec<&str> = pnm::content_lines(text).collect();
    assert_eq!(lines, ["P1", "2 2", "1 0", "0 1"]);
}

#[test]
fn extra_whitespace_tolerated() {
    let image = decode("  P2  \n 2   1 \n 9 \n\t3    4  \n", Unstoppable).unwrap();
    assert_eq!(image.row(0).unwrap(), &[Pixel::Gray(3), Pixel::Gray(4)]);
}

// ── Malformed input ──────────────────────────────────────────────────

fn assert_malformed(lines: &[&str]) {
    match pnm::parse_lines(lines.iter().copied()) {
        Err(PnmError::MalformedHeader(_)) => {}
        other => panic!("expected MalformedHeader for {lines:?}, got {other:?}"),
    }
}

#[test]
fn unknown_tag_is_malformed() {
    assert_malformed(&["P9", "1 1", "1"]);
    assert_malformed(&["P0", "1 1", "1"]);
    assert_malformed(&["P6", "1 1", "255", "0 0 0"]);
    assert_malformed(&["Q1", "1 1", "1"]);
    assert_malformed(&["P", "1 1", "1"]);
    assert_malformed(&["P+1", "1 1", "1"]);
    assert_malformed(&["P01", "1 1", "1"]);
    assert_malformed(&["P11", "1 1", "1"]);
    assert_malformed(&[]);
}

#[test]
fn bad_dimensions_are_malformed() {
    assert_malformed(&["P1"]);
    assert_malformed(&["P1", "4", "1 1 1 1"]);
    assert_malformed(&["P1", "four 4", "1"]);
    assert_malformed(&["P1", "0 4", "1"]);
    assert_malformed(&["P1", "-2 4", "1"]);
}

#[test]
fn bad_max_value_is_malformed() {
    assert_malformed(&["P2", "1 1"]);
    assert_malformed(&["P2", "1 1", "max", "0"]);
    assert_malformed(&["P3", "1 1", "0", "0 0 0"]);
    assert_malformed(&["P3", "1 1", "70000", "0 0 0"]);
}

#[test]
fn non_numeric_sample_is_invalid_data() {
    let result = pnm::parse_lines(["P2", "2 1", "255", "12 x"]);
    assert!(matches!(result, Err(PnmError::InvalidData(_))));

    let result = pnm::parse_lines(["P1", "2 1", "1 x"]);
    assert!(matches!(result, Err(PnmError::InvalidData(_))));
}

#[test]
fn bilevel_accepts_any_integer() {
    let image = pnm::parse_lines(["P1", "5 1", "-1 70000 +0 -0 007"]).unwrap();
    assert_eq!(
        image.row(0).unwrap(),
        &[
            Pixel::Bit(true),
            Pixel::Bit(true),
            Pixel::Bit(false),
            Pixel::Bit(false),
            Pixel::Bit(true),
        ]
    );

    for token in ["-", "+", "1.0", "0x1"] {
        let result = pnm::parse_lines(["P1", "1 1", token]);
        assert!(
            matches!(result, Err(PnmError::InvalidData(_))),
            "`{token}` accepted"
        );
    }
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn blank_canvas_backgrounds() {
    assert!(on_cells(&blank(3, 2)).is_empty());

    let gray = PnmImage::of_size(2, 2, PnmFormat::Grayscale).unwrap();
    assert_eq!(gray.max_value(), DEFAULT_MAX_VALUE);
    assert!(gray.rows().iter().flatten().all(|&p| p == Pixel::Gray(0)));

    let rgb = PnmImage::of_size_with_max(1, 1, PnmFormat::Rgb, 7).unwrap();
    assert_eq!(rgb.max_value(), 7);
    assert_eq!(rgb.get(0, 0), Some(PnmFormat::Rgb.background()));
}

#[test]
fn bilevel_max_value_forced_to_one() {
    let pixels = vec![vec![Pixel::Bit(true)]];
    let image = PnmImage::new(PnmFormat::BiLevel, 1, 1, 200, pixels).unwrap();
    assert_eq!(image.max_value(), 1);
}

#[test]
fn new_rejects_bad_grids() {
    let mixed = vec![vec![Pixel::Gray(1), Pixel::Bit(true)]];
    assert!(matches!(
        PnmImage::new(PnmFormat::Grayscale, 2, 1, 255, mixed),
        Err(PnmError::InvalidArgument(_))
    ));

    let ragged = vec![vec![Pixel::Bit(true)], vec![]];
    assert!(matches!(
        PnmImage::new(PnmFormat::BiLevel, 1, 2, 1, ragged),
        Err(PnmError::InvalidArgument(_))
    ));

    let too_bright = vec![vec![Pixel::Gray(16)]];
    assert!(matches!(
        PnmImage::new(PnmFormat::Grayscale, 1, 1, 15, too_bright),
        Err(PnmError::InvalidArgument(_))
    ));

    assert!(matches!(
        PnmImage::of_size(0, 3, PnmFormat::BiLevel),
        Err(PnmError::InvalidArgument(_))
    ));
    assert!(matches!(
        PnmImage::of_size_with_max(1, 1, PnmFormat::Grayscale, 0),
        Err(PnmError::InvalidArgument(_))
    ));
}

#[test]
fn of_size_validates_before_allocating() {
    assert!(matches!(
        PnmImage::of_size(0, u32::MAX, PnmFormat::BiLevel),
        Err(PnmError::InvalidArgument(_))
    ));
    assert!(matches!(
        PnmImage::of_size_with_max(u32::MAX, u32::MAX, PnmFormat::Grayscale, 0),
        Err(PnmError::InvalidArgument(_))
    ));
    assert!(matches!(
        PnmImage::of_size(u32::MAX, u32::MAX, PnmFormat::Rgb),
        Err(PnmError::DimensionsTooLarge { .. })
    ));
}

#[test]
fn set_checks_variant_and_bounds() {
    let mut image = blank(2, 2);
    image.set(1, 0, Pixel::Bit(true)).unwrap();
    assert_eq!(image.get(1, 0), Some(Pixel::Bit(true)));

    assert!(matches!(
        image.set(0, 0, Pixel::Gray(1)),
        Err(PnmError::InvalidArgument(_))
    ));
    assert!(matches!(
        image.set(2, 0, Pixel::Bit(true)),
        Err(PnmError::OutOfBounds { .. })
    ));
}

// ── Scaling ──────────────────────────────────────────────────────────

#[test]
fn scaling_replicates_blocks() {
    let pixels = vec![
        vec![Pixel::Gray(1), Pixel::Gray(2), Pixel::Gray(3)],
        vec![Pixel::Gray(4), Pixel::Gray(5), Pixel::Gray(6)],
    ];
    let image = PnmImage::new(PnmFormat::Grayscale, 3, 2, 9, pixels).unwrap();

    for f in 1..=4usize {
        let scaled = image.scaled(f as u32).unwrap();
        assert_eq!(scaled.width(), 3 * f as u32);
        assert_eq!(scaled.height(), 2 * f as u32);
        assert_eq!(scaled.format(), PnmFormat::Grayscale);
        assert_eq!(scaled.max_value(), 9);
        assert!(scaled.is_rectangular());
        for r in 0..2 {
            for c in 0..3 {
                for i in 0..f {
                    for j in 0..f {
                        assert_eq!(scaled.get(c * f + j, r * f + i), image.get(c, r));
                    }
                }
            }
        }
    }
    // Source untouched.
    assert_eq!(image.width(), 3);
}

#[test]
fn scaling_by_one_is_identity() {
    let mut image = blank(5, 4);
    image.draw_line((0, 3), (4, 1)).unwrap();
    assert_eq!(image.scaled(1).unwrap(), image);
}

#[test]
fn scaling_by_zero_is_invalid() {
    assert!(matches!(
        blank(2, 2).scaled(0),
        Err(PnmError::InvalidArgument(_))
    ));
}

#[test]
fn scaling_overflow_is_rejected() {
    let image = blank(70_000, 1);
    assert!(matches!(
        image.scaled(70_000),
        Err(PnmError::DimensionsTooLarge { .. })
    ));
}

#[test]
fn scaling_beyond_pixel_cap_is_rejected() {
    // Dimensions fit in u32, the cell count does not fit the cap.
    let image = blank(2, 2);
    assert!(matches!(
        image.scaled(65_535),
        Err(PnmError::DimensionsTooLarge { .. })
    ));

    // Rows with no cells still count toward the cap.
    let empty_rows = pnm::parse_lines(["P3", "1 1", "255", "1"]).unwrap();
    assert!(empty_rows.row(0).unwrap().is_empty());
    assert!(matches!(
        empty_rows.scaled(u32::MAX),
        Err(PnmError::DimensionsTooLarge { .. })
    ));
}

// ── Line drawing ─────────────────────────────────────────────────────

#[test]
fn diagonal_line() {
    let mut image = blank(4, 4);
    image.draw_line((0, 0), (3, 3)).unwrap();
    assert_eq!(on_cells(&image), [(0, 0), (1, 1), (2, 2), (3, 3)]);
}

#[test]
fn horizontal_line() {
    let mut image = blank(4, 4);
    image.draw_line((0, 2), (3, 2)).unwrap();
    assert_eq!(on_cells(&image), [(0, 2), (1, 2), (2, 2), (3, 2)]);
}

#[test]
fn vertical_line() {
    let mut image = blank(4, 4);
    image.draw_line((1, 0), (1, 3)).unwrap();
    assert_eq!(on_cells(&image), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn vertical_line_at_origin_column() {
    let mut image = blank(3, 3);
    image.draw_line((0, 2), (0, 0)).unwrap();
    assert_eq!(on_cells(&image), [(0, 0), (0, 1), (0, 2)]);
}

#[test]
fn single_point_line() {
    let mut image = blank(4, 4);
    image.draw_line((2, 1), (2, 1)).unwrap();
    assert_eq!(on_cells(&image), [(2, 1)]);
}

#[test]
fn steep_line_covers_every_row() {
    let mut image = blank(3, 6);
    image.draw_line((0, 0), (2, 5)).unwrap();
    for y in 0..6 {
        assert!(
            image.row(y).unwrap().iter().any(Pixel::is_on),
            "row {y} has a gap"
        );
    }
}

#[test]
fn shallow_line_covers_every_column() {
    let mut image = blank(7, 2);
    image.draw_line((6, 1), (0, 0)).unwrap();
    for x in 0..7 {
        assert!(
            (0..2).any(|y| image.get(x, y) == Some(Pixel::Bit(true))),
            "column {x} has a gap"
        );
    }
}

#[test]
fn gray_and_rgb_lines_use_max_value() {
    let mut gray = PnmImage::of_size_with_max(3, 3, PnmFormat::Grayscale, 15).unwrap();
    gray.draw_line((0, 1), (2, 1)).unwrap();
    assert_eq!(gray.get(1, 1), Some(Pixel::Gray(15)));
    assert_eq!(gray.get(1, 0), Some(Pixel::Gray(0)));

    let mut rgb = PnmImage::of_size(2, 2, PnmFormat::Rgb).unwrap();
    rgb.draw_line((1, 0), (1, 1)).unwrap();
    assert_eq!(
        rgb.get(1, 1),
        Some(Pixel::Rgb { red: 255, green: 255, blue: 255 })
    );
}

#[test]
fn line_with_custom_pixel() {
    let mut rgb = PnmImage::of_size(3, 1, PnmFormat::Rgb).unwrap();
    let red = Pixel::Rgb { red: 255, green: 0, blue: 0 };
    rgb.draw_line_with((0, 0), (2, 0), red).unwrap();
    assert!(rgb.row(0).unwrap().iter().all(|&p| p == red));

    assert!(matches!(
        rgb.draw_line_with((0, 0), (2, 0), Pixel::Bit(true)),
        Err(PnmError::InvalidArgument(_))
    ));
}

#[test]
fn out_of_bounds_line_draws_nothing() {
    let mut image = blank(4, 4);
    let err = image.draw_line((0, 0), (4, 3)).unwrap_err();
    assert!(matches!(err, PnmError::OutOfBounds { x: 4, y: 3, .. }));
    assert!(matches!(
        image.draw_line((-1, 0), (2, 2)),
        Err(PnmError::OutOfBounds { .. })
    ));
    assert!(on_cells(&image).is_empty());
}

#[test]
fn line_outside_short_grid_is_out_of_bounds() {
    // Declared 2x3 but only one row present.
    let mut image = pnm::parse_lines(["P1", "2 3", "0 0"]).unwrap();
    assert!(matches!(
        image.draw_line((0, 0), (0, 2)),
        Err(PnmError::OutOfBounds { .. })
    ));
}

#[test]
fn line_to_clamped_corner_of_huge_header() {
    // Declared width 2^31 does not fit i32; clamp instead of wrapping.
    let mut image = pnm::parse_lines(["P1", "2147483648 2", "1 0"]).unwrap();
    let w = i32::try_from(image.width()).unwrap_or(i32::MAX);
    let h = i32::try_from(image.height()).unwrap_or(i32::MAX);
    assert_eq!(w, i32::MAX);
    assert!(matches!(
        image.draw_line((0, 0), (w.saturating_sub(1), h.saturating_sub(1))),
        Err(PnmError::OutOfBounds { .. })
    ));
    assert_eq!(on_cells(&image), [(0, 0)]);
}

// ── Limits and cancellation ──────────────────────────────────────────

#[test]
fn limits_reject_declared_size() {
    let limits = Limits {
        max_width: Some(2),
        ..Default::default()
    };
    let result = DecodeRequest::new("P1\n3 1\n0 0 0\n")
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        PnmError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn limits_reject_actual_grid() {
    // Header claims 1x1, rows carry 6 cells.
    let limits = Limits {
        max_pixels: Some(4),
        ..Default::default()
    };
    let result = DecodeRequest::new("P1\n1 1\n1 1 1\n1 1 1\n")
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(result, Err(PnmError::LimitExceeded(_))));
}

#[test]
fn cancelled_decode_and_encode() {
    let text = "P1\n1 1\n1\n";
    assert!(matches!(
        decode(text, Cancelled),
        Err(PnmError::Cancelled(_))
    ));
    let image = decode(text, Unstoppable).unwrap();
    assert!(matches!(
        encode(&image, Cancelled),
        Err(PnmError::Cancelled(_))
    ));
}

// ── Export ───────────────────────────────────────────────────────────

#[test]
fn rgba_export_scales_channels() {
    let mut bits = blank(2, 1);
    bits.set(0, 0, Pixel::Bit(true)).unwrap();
    assert_eq!(bits.to_rgba8().unwrap(), [0, 0, 0, 255, 255, 255, 255, 255]);

    let pixels = vec![vec![Pixel::Rgb { red: 15, green: 0, blue: 5 }]];
    let rgb = PnmImage::new(PnmFormat::Rgb, 1, 1, 15, pixels).unwrap();
    assert_eq!(rgb.to_rgba8().unwrap(), [255, 0, 85, 255]);
}

#[test]
fn rgba_export_needs_rectangular_grid() {
    let image = pnm::parse_lines(["P1", "2 2", "1 0"]).unwrap();
    assert!(matches!(image.to_rgba8(), Err(PnmError::InvalidData(_))));
}

#[cfg(feature = "imgref")]
#[test]
fn imgvec_export() {
    let mut image = blank(3, 2);
    image.draw_line((0, 1), (2, 1)).unwrap();
    let img = image.to_imgvec().unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(img.buf()[3], rgb::RGBA8::new(0, 0, 0, 255));
    assert_eq!(img.buf()[0], rgb::RGBA8::new(255, 255, 255, 255));
}

#[cfg(feature = "rgb")]
#[test]
fn rgb16_conversions() {
    let px = Pixel::from(rgb::RGB::<u16>::new(1, 2, 3));
    assert_eq!(px, Pixel::Rgb { red: 1, green: 2, blue: 3 });
    assert_eq!(Pixel::Gray(9).to_rgb16(255), rgb::RGB::new(9, 9, 9));
}

// ── File I/O ─────────────────────────────────────────────────────────

#[cfg(feature = "std")]
#[test]
fn write_path_overwrites() {
    let path = std::env::temp_dir().join(format!("plainpnm-{}.pbm", std::process::id()));
    std::fs::write(&path, "stale content that is much longer than the image\n").unwrap();

    let mut image = blank(3, 3);
    image.draw_line((0, 0), (2, 2)).unwrap();
    io::write_path(&path, &image).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "P1\n3 3\n1 0 0\n0 1 0\n0 0 1\n"
    );
    assert_eq!(io::read_path(&path).unwrap(), image);
    std::fs::remove_file(&path).unwrap();
}

#[cfg(feature = "std")]
#[test]
fn stream_io() {
    let image = PnmImage::of_size(2, 1, PnmFormat::Grayscale).unwrap();
    let mut out = Vec::new();
    io::write_to(&mut out, &image).unwrap();
    assert_eq!(io::read_from(out.as_slice()).unwrap(), image);
}

#[cfg(feature = "std")]
#[test]
fn missing_file_is_io_error() {
    let result = io::read_path("/definitely/not/here.pbm");
    assert!(matches!(result, Err(PnmError::Io(_))));
}
