//! Cross-anchor aggregation of boundary cells.
//!
//! Each accepted anchor votes for a top-left and a bottom-right boundary
//! cell. The votes are combined field by field with the harmonic mean, which
//! leans towards small values: false-positive anchors mostly inflate the
//! estimates, so a minority of them is damped rather than allowed to drag
//! the lattice. This is a best-effort policy, not a guarantee; a majority of
//! bad anchors still wins.
//!
//! Entries with a non-positive width, or a negative or non-finite
//! coordinate, are skipped before aggregation. A coordinate of exactly 0 is
//! kept: the harmonic mean of a field containing 0 is its limit, 0.
use super::geometry::AnchorCells;
use crate::types::Cell;
use log::{debug, warn};
use serde::Serialize;

/// Placeholder corner used when no anchor survives; both corners coincide.
pub const FALLBACK_CELL: Cell = Cell::new(1.0, 1.0, 10.0);

/// Aggregated lattice corners for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum CornerEstimate {
    /// No usable anchor; corners are [`FALLBACK_CELL`].
    #[serde(rename_all = "camelCase")]
    Fallback { skipped: usize },
    #[serde(rename_all = "camelCase")]
    Aggregated {
        top_left: Cell,
        bottom_right: Cell,
        anchors: usize,
        skipped: usize,
    },
}

impl CornerEstimate {
    /// `(top_left, bottom_right)`, substituting the fallback when needed.
    pub fn corners(&self) -> (Cell, Cell) {
        match *self {
            CornerEstimate::Fallback { .. } => (FALLBACK_CELL, FALLBACK_CELL),
            CornerEstimate::Aggregated {
                top_left,
                bottom_right,
                ..
            } => (top_left, bottom_right),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CornerEstimate::Fallback { .. })
    }

    /// Number of anchors that contributed to the estimate.
    pub fn anchors_used(&self) -> usize {
        match *self {
            CornerEstimate::Fallback { .. } => 0,
            CornerEstimate::Aggregated { anchors, .. } => anchors,
        }
    }

    pub fn anchors_skipped(&self) -> usize {
        match *self {
            CornerEstimate::Fallback { skipped } | CornerEstimate::Aggregated { skipped, .. } => {
                skipped
            }
        }
    }
}

/// Combine per-anchor boundary cells into one top-left / bottom-right pair.
pub fn aggregate_corners(cells: &[AnchorCells]) -> CornerEstimate {
    let usable: Vec<&AnchorCells> = cells
        .iter()
        .filter(|c| c.top_left.is_usable() && c.bottom_right.is_usable())
        .collect();
    let skipped = cells.len() - usable.len();
    if skipped > 0 {
        warn!(
            "aggregate_corners: skipping {} of {} anchors with unusable boundary cells",
            skipped,
            cells.len()
        );
    }

    let top_left = harmonic_cell(usable.iter().map(|c| &c.top_left));
    let bottom_right = harmonic_cell(usable.iter().map(|c| &c.bottom_right));
    match (top_left, bottom_right) {
        (Some(top_left), Some(bottom_right)) => {
            debug!(
                "aggregate_corners: anchors={} top_left={:?} bottom_right={:?}",
                usable.len(),
                top_left,
                bottom_right
            );
            CornerEstimate::Aggregated {
                top_left,
                bottom_right,
                anchors: usable.len(),
                skipped,
            }
        }
        _ => {
            debug!("aggregate_corners: no usable anchors, using fallback corners");
            CornerEstimate::Fallback { skipped }
        }
    }
}

fn harmonic_cell<'a>(cells: impl Iterator<Item = &'a Cell> + Clone) -> Option<Cell> {
    let xs: Vec<f64> = cells.clone().map(|c| c.x).collect();
    let ys: Vec<f64> = cells.clone().map(|c| c.y).collect();
    let ws: Vec<f64> = cells.map(|c| c.width).collect();
    Some(Cell::new(
        harmonic_mean(&xs)?,
        harmonic_mean(&ys)?,
        harmonic_mean(&ws)?,
    ))
}

/// `n / Σ(1/v)`. Any 0 makes the mean 0. `None` for an empty slice or any
/// negative or non-finite value.
pub fn harmonic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }
    if values.contains(&0.0) {
        return Some(0.0);
    }
    let reciprocal_sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    Some(values.len() as f64 / reciprocal_sum)
}
