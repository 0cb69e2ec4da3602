//! Per-cell pixel patches for the downstream cell classifier.
//!
//! A patch is the cell's square region clipped to the frame, converted to
//! RGB and resized to `target × target`: area averaging when the crop is
//! wider than the target, bilinear interpolation otherwise. A cell that
//! leaves the frame yields a truncated (possibly empty) patch rather than an
//! error.
use crate::image::rgb::to_rgb;
use crate::image::ImageRgb8;
use crate::types::GridCell;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PATCH_SIZE: u32 = 64;

/// How the crop was brought to the target resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    Area,
    Linear,
    /// Nothing to resize: the crop was empty.
    None,
}

/// Resized RGB patch of one cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPatch {
    /// Side of the square patch; 0 for an empty crop.
    pub size: u32,
    /// Row-major RGB pixels, `size * size` entries.
    pub pixels: Vec<[u8; 3]>,
    /// Width and height of the crop before resizing.
    pub source_size: (u32, u32),
    pub interpolation: Interpolation,
}

impl CellPatch {
    fn empty() -> Self {
        Self {
            size: 0,
            pixels: Vec::new(),
            source_size: (0, 0),
            interpolation: Interpolation::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// True when the cell extended past the frame and the crop was clipped.
    pub fn is_truncated(&self, cell: &GridCell) -> bool {
        self.source_size != (cell.width, cell.width)
    }

    /// Pixel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> + '_ {
        self.pixels.chunks(self.size.max(1) as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerOptions {
    pub patch_size: u32,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CellSampler {
    options: SamplerOptions,
}

impl CellSampler {
    pub fn new(options: SamplerOptions) -> Self {
        Self { options }
    }

    pub fn patch_size(&self) -> u32 {
        self.options.patch_size
    }

    pub fn sample(&self, image: &ImageRgb8<'_>, cell: &GridCell) -> CellPatch {
        let crop = match crop_rgb(image, cell) {
            Some(crop) => crop,
            None => return CellPatch::empty(),
        };
        let target = self.options.patch_size.max(1);
        let source_size = crop.dimensions();
        let (resized, interpolation) = if source_size.0 > target {
            (resize_area(&crop, target), Interpolation::Area)
        } else {
            (
                imageops::resize(&crop, target, target, FilterType::Triangle),
                Interpolation::Linear,
            )
        };
        CellPatch {
            size: target,
            pixels: resized.pixels().map(|p| p.0).collect(),
            source_size,
            interpolation,
        }
    }
}

/// Copy the cell region clipped to the frame, in RGB order.
fn crop_rgb(image: &ImageRgb8<'_>, cell: &GridCell) -> Option<RgbImage> {
    let w = i64::from(cell.width);
    let x0 = i64::from(cell.x).clamp(0, image.w as i64);
    let y0 = i64::from(cell.y).clamp(0, image.h as i64);
    let x1 = (i64::from(cell.x) + w).clamp(0, image.w as i64);
    let y1 = (i64::from(cell.y) + w).clamp(0, image.h as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    let (x0, y0) = (x0 as usize, y0 as usize);
    let (cw, ch) = (x1 as usize - x0, y1 as usize - y0);
    Some(RgbImage::from_fn(cw as u32, ch as u32, |x, y| {
        Rgb(to_rgb(
            image.get(x0 + x as usize, y0 + y as usize),
            image.order,
        ))
    }))
}

/// Box-filter downscale: each output pixel averages the source area it
/// covers, weighting partially covered source pixels by their overlap.
fn resize_area(src: &RgbImage, target: u32) -> RgbImage {
    let (sw, sh) = src.dimensions();
    let sx = f64::from(sw) / f64::from(target);
    let sy = f64::from(sh) / f64::from(target);
    let xw = overlap_weights(sw, target, sx);
    let yw = overlap_weights(sh, target, sy);

    RgbImage::from_fn(target, target, |ox, oy| {
        let mut acc = [0.0f64; 3];
        let mut total = 0.0f64;
        for &(iy, wy) in &yw[oy as usize] {
            for &(ix, wx) in &xw[ox as usize] {
                let w = wx * wy;
                let px = src.get_pixel(ix, iy).0;
                for (a, &v) in acc.iter_mut().zip(px.iter()) {
                    *a += w * f64::from(v);
                }
                total += w;
            }
        }
        let norm = if total > 0.0 { 1.0 / total } else { 0.0 };
        Rgb(acc.map(|a| (a * norm).round().clamp(0.0, 255.0) as u8))
    })
}

/// For each output index, the source indices it covers and their overlap.
fn overlap_weights(src_len: u32, target: u32, scale: f64) -> Vec<Vec<(u32, f64)>> {
    (0..target)
        .map(|o| {
            let start = f64::from(o) * scale;
            let end = (start + scale).min(f64::from(src_len));
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len).max(first + 1);
            (first..last)
                .filter_map(|i| {
                    let lo = start.max(f64::from(i));
                    let hi = end.min(f64::from(i + 1));
                    let w = hi - lo;
                    (w > 1e-12).then_some((i.min(src_len - 1), w))
                })
                .collect()
        })
        .collect()
}
