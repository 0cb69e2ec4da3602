//! Per-anchor cell geometry.
//!
//! An anchor fixes one cell of the lattice (the sample cell) and, through it,
//! the lattice phase and spacing. Stepping the sample cell by whole cell
//! widths towards the playable-area borders yields the outermost cells that
//! still fit inside them.
use super::settings::{BorderSettings, Settings};
use crate::types::{BoundingRect, Cell, ImageDims};
use nalgebra::Vector2;
use serde::Serialize;

/// Cells inferred from a single anchor. All three share one width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorCells {
    pub sample: Cell,
    pub top_left: Cell,
    pub bottom_right: Cell,
}

/// Derive the sample cell and its boundary cells for one accepted anchor.
///
/// The caller guarantees a non-degenerate rectangle; accepted anchors always
/// have positive sides.
pub fn anchor_cells(
    rect: &BoundingRect,
    settings: &Settings,
    borders: &BorderSettings,
    dims: ImageDims,
) -> AnchorCells {
    let sample = sample_cell(rect, settings);
    AnchorCells {
        sample,
        top_left: top_left_cell(&sample, borders, dims),
        bottom_right: bottom_right_cell(&sample, borders, dims),
    }
}

/// Cell footprint of the anchor, with the long side treated as the width.
pub fn sample_cell(rect: &BoundingRect, settings: &Settings) -> Cell {
    let (mut w, mut h) = (f64::from(rect.width), f64::from(rect.height));
    if w < h {
        std::mem::swap(&mut w, &mut h);
    }
    let origin = Vector2::new(f64::from(rect.x), f64::from(rect.y));
    let shifted = origin - settings.offset.component_mul(&Vector2::new(w, h));
    Cell::new(shifted.x, shifted.y, settings.scale.x * w)
}

/// Step back by whole cells towards the top/left borders without crossing them.
pub fn top_left_cell(sample: &Cell, borders: &BorderSettings, dims: ImageDims) -> Cell {
    let width_padding = dims.width as f64 * borders.left;
    let height_padding = dims.height as f64 * borders.top;

    let usable_width = sample.x - width_padding;
    let usable_height = sample.y - height_padding;

    Cell::new(
        sample.x - whole_cells(usable_width, sample.width) * sample.width,
        sample.y - whole_cells(usable_height, sample.width) * sample.width,
        sample.width,
    )
}

/// Step forward by whole cells towards the bottom/right borders without crossing them.
pub fn bottom_right_cell(sample: &Cell, borders: &BorderSettings, dims: ImageDims) -> Cell {
    let (img_w, img_h) = (dims.width as f64, dims.height as f64);
    let remaining_width = img_w - sample.x - sample.width;
    let remaining_height = img_h - sample.y - sample.width;

    let usable_width = remaining_width - img_w * borders.right;
    let usable_height = remaining_height - img_h * borders.bottom;

    Cell::new(
        sample.x + whole_cells(usable_width, sample.width) * sample.width,
        sample.y + whole_cells(usable_height, sample.width) * sample.width,
        sample.width,
    )
}

#[inline]
fn whole_cells(span: f64, width: f64) -> f64 {
    (span / width).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_cell(cell: &Cell, x: f64, y: f64, width: f64) {
        assert!(
            close(cell.x, x) && close(cell.y, y) && close(cell.width, width),
            "expected ({x}, {y}, {width}), got {cell:?}"
        );
    }

    fn settings(offset: f64, scale: f64) -> Settings {
        Settings {
            offset: Vector2::new(offset, offset),
            scale: Vector2::new(scale, scale),
        }
    }

    fn no_borders() -> BorderSettings {
        BorderSettings {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
        }
    }

    #[test]
    fn sample_cell_from_square_anchor() {
        let rect = BoundingRect::new(100, 100, 50, 50);
        let cell = sample_cell(&rect, &settings(0.1, 0.8));
        assert_cell(&cell, 95.0, 95.0, 40.0);
    }

    #[test]
    fn tall_anchor_uses_long_side_as_width() {
        let wide = sample_cell(&BoundingRect::new(10, 10, 60, 50), &settings(0.1, 0.5));
        let tall = sample_cell(&BoundingRect::new(10, 10, 50, 60), &settings(0.1, 0.5));
        assert_eq!(wide, tall);
        assert_cell(&wide, 4.0, 5.0, 30.0);
    }

    #[test]
    fn boundary_cells_snap_inside_borders() {
        let dims = ImageDims::new(200, 100);
        let borders = BorderSettings {
            top: 0.1,
            bottom: 0.1,
            left: 0.05,
            right: 0.05,
        };
        let sample = Cell::new(73.0, 47.0, 20.0);

        // left padding 10: usable 63 → 3 cells back; top padding 10: usable 37 → 1 cell.
        let tl = top_left_cell(&sample, &borders, dims);
        assert_cell(&tl, 13.0, 27.0, 20.0);
        assert!(tl.x >= 10.0 && tl.x - 20.0 < 10.0);

        // remaining 107 - 10 = 97 → 4 cells; remaining 33 - 10 = 23 → 1 cell.
        let br = bottom_right_cell(&sample, &borders, dims);
        assert_cell(&br, 153.0, 67.0, 20.0);
        assert!(br.x + 20.0 <= 190.0 && br.x + 40.0 > 190.0);
    }

    #[test]
    fn sample_on_border_stays_put() {
        let dims = ImageDims::new(100, 100);
        let sample = Cell::new(0.0, 0.0, 10.0);
        let tl = top_left_cell(&sample, &no_borders(), dims);
        assert_cell(&tl, 0.0, 0.0, 10.0);
        let br = bottom_right_cell(&sample, &no_borders(), dims);
        assert_cell(&br, 90.0, 90.0, 10.0);
    }

    #[test]
    fn all_cells_share_the_sample_width() {
        let dims = ImageDims::new(1280, 800);
        let cells = anchor_cells(
            &BoundingRect::new(400, 300, 48, 40),
            &Settings::default(),
            &BorderSettings::for_image_height(dims.height),
            dims,
        );
        assert_eq!(cells.sample.width, cells.top_left.width);
        assert_eq!(cells.sample.width, cells.bottom_right.width);
        assert!(cells.top_left.x <= cells.sample.x && cells.sample.x <= cells.bottom_right.x);
        assert!(cells.top_left.y <= cells.sample.y && cells.sample.y <= cells.bottom_right.y);
    }
}
