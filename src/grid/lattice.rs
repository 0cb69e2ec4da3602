//! Lattice expansion from aggregated corner cells.
use crate::types::{Cell, GridCell};
use serde::Serialize;

/// Rectangular lattice of equally sized cells, row-major, top-to-bottom and
/// left-to-right. Downstream consumers index cells by `(row, col)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<GridCell>>,
}

impl Grid {
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.n_rows() * self.n_cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell_width(&self) -> Option<u32> {
        self.get(0, 0).map(|c| c.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Cells with their `(row, col)` index, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (r, c, cell))
        })
    }

    /// `(row, col)` of the cell containing pixel `(x, y)`.
    pub fn locate(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let origin = self.get(0, 0)?;
        let w = i64::from(origin.width);
        let dx = i64::from(x) - i64::from(origin.x);
        let dy = i64::from(y) - i64::from(origin.y);
        if dx < 0 || dy < 0 {
            return None;
        }
        let (row, col) = ((dy / w) as usize, (dx / w) as usize);
        (row < self.n_rows() && col < self.n_cols()).then_some((row, col))
    }
}

/// Expand `top_left`/`bottom_right` into the full lattice.
///
/// Rows start at `top_left.y` and advance by the (rounded) top-left width
/// while they begin before `bottom_right.y + width`; columns likewise. A
/// trailing partial step is kept. Degenerate spans produce a single cell.
pub fn build_lattice(top_left: &Cell, bottom_right: &Cell) -> Grid {
    let width = top_left.width;
    let step = (round_px(width) as i64).max(1);

    let grid_width = (bottom_right.x + width) - top_left.x;
    let grid_height = (bottom_right.y + width) - top_left.y;

    let xs = axis_steps(top_left.x, top_left.x + grid_width, step);
    let ys = axis_steps(top_left.y, top_left.y + grid_height, step);

    let rows = ys
        .iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| GridCell {
                    x,
                    y,
                    width: step as u32,
                })
                .collect()
        })
        .collect();
    Grid { rows }
}

fn axis_steps(start: f64, end: f64, step: i64) -> Vec<i32> {
    let start = round_px(start) as i64;
    let end = round_px(end) as i64;
    let mut out: Vec<i32> = (start..end)
        .step_by(step as usize)
        .map(|v| v as i32)
        .collect();
    if out.is_empty() {
        out.push(start as i32);
    }
    out
}

#[inline]
fn round_px(v: f64) -> f64 {
    v.round_ties_even()
}
