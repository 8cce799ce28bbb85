//! Line rasterization.
//!
//! A digital differential analyzer that walks the segment twice: once
//! stepping over columns and once over rows. The union of both passes has no
//! gaps for shallow or steep lines. Cells visited by both passes are
//! returned twice.

use alloc::vec::Vec;

/// Integer grid coordinate; `x` is the column, `y` the row (0 = top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Cells covered by the segment from `start` to `end`, both inclusive.
///
/// The column pass comes first, then the row pass. Vertical segments are
/// special-cased before horizontal ones in both passes, so a single point
/// (which is both) never reaches the slope division.
pub fn line_cells(start: Point, end: Point) -> Vec<Point> {
    let dx = f64::from(end.x) - f64::from(start.x);
    let dy = f64::from(end.y) - f64::from(start.y);
    let m = dy / dx;
    let b = f64::from(start.y) - m * f64::from(start.x);

    let vertical = start.x == end.x;
    let horizontal = start.y == end.y;

    let columns = inclusive(start.x, end.x);
    let rows = inclusive(start.y, end.y);
    let mut cells = Vec::with_capacity(columns.len() + rows.len());

    for x in columns {
        let y = if vertical {
            start.y
        } else {
            round_half_away(m * f64::from(x) + b)
        };
        cells.push(Point::new(x, y));
    }

    for y in rows {
        let x = if vertical || horizontal {
            start.x
        } else {
            round_half_away((f64::from(y) - b) / m)
        };
        cells.push(Point::new(x, y));
    }

    cells
}

/// Walk from `from` to `to` inclusive, in whichever direction that is.
fn inclusive(from: i32, to: i32) -> Vec<i32> {
    if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    }
}

/// Round to nearest, ties away from zero. `f64::round` lives in `std`.
fn round_half_away(v: f64) -> i32 {
    let t = v as i64;
    let frac = v - t as f64;
    let r = if frac >= 0.5 {
        t.saturating_add(1)
    } else if frac <= -0.5 {
        t.saturating_sub(1)
    } else {
        t
    };
    r as i32
}
