use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle of a candidate anchor, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Square cell estimate in image space. `width` doubles as the height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Cell {
    pub const fn new(x: f64, y: f64, width: f64) -> Self {
        Self { x, y, width }
    }

    /// True when the width is finite and strictly positive and both
    /// coordinates are finite and non-negative. A coordinate of 0 is the
    /// image origin.
    pub fn is_usable(&self) -> bool {
        let width_ok = self.width.is_finite() && self.width > 0.0;
        width_ok && [self.x, self.y].iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Lattice cell snapped to integer pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageDims {
    pub width: usize,
    pub height: usize,
}

impl ImageDims {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResult {
    /// `false` when no usable anchor was found and the fallback corners were used.
    pub found: bool,
    pub grid: Grid,
    pub top_left: Cell,
    pub bottom_right: Cell,
    pub anchors_used: usize,
    pub latency_ms: f64,
}
