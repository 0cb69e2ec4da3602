//! Detector pipeline driving the grid detection end-to-end.
//!
//! The [`AnchorGridDetector`] exposes a simple API: feed a frame and the
//! candidate rectangles found in it, get back the lattice with a detailed
//! trace of every stage.
//!
//! Typical usage:
//! ```no_run
//! use anchor_grid::{AnchorGridDetector, BoundingRect, DetectorParams};
//! use anchor_grid::image::ImageRgb8;
//!
//! # fn example(frame: ImageRgb8<'_>, rects: &[BoundingRect]) {
//! let detector = AnchorGridDetector::new(DetectorParams::default());
//! let report = detector.process_with_diagnostics(&frame, rects);
//! if report.grid.found {
//!     println!("{} anchors, {} cells", report.grid.anchors_used, report.grid.grid.len());
//! }
//! # }
//! ```
use super::params::DetectorParams;
use crate::anchors::classify_anchor;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    AggregationStage, AnchorSample, AnchorStage, DetectionReport, InputDescriptor, PipelineTrace,
    TimingBreakdown,
};
use crate::grid::{aggregate_corners, anchor_cells, build_lattice, BorderSettings, Grid};
use crate::image::ImageRgb8;
use crate::sampler::{CellPatch, CellSampler};
use crate::types::{BoundingRect, GridCell, GridResult, ImageDims};
use log::debug;
use std::time::Instant;

/// Grid detector orchestrating anchor classification, per-anchor geometry,
/// harmonic-mean aggregation and lattice expansion.
pub struct AnchorGridDetector {
    params: DetectorParams,
    sampler: CellSampler,
}

impl AnchorGridDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: DetectorParams) -> Self {
        let sampler = CellSampler::new(params.sampler.clone());
        Self { params, sampler }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Run the detector on one frame, returning a compact result.
    pub fn process(&self, image: &ImageRgb8<'_>, rects: &[BoundingRect]) -> GridResult {
        self.process_with_diagnostics(image, rects).grid
    }

    /// Run the detector and return both the result and a detailed report.
    pub fn process_with_diagnostics(
        &self,
        image: &ImageRgb8<'_>,
        rects: &[BoundingRect],
    ) -> DetectionReport {
        let total_start = Instant::now();
        let dims = ImageDims::new(image.w, image.h);
        let borders = self.params.borders_for(dims);
        debug!(
            "AnchorGridDetector::process start w={} h={} candidates={}",
            dims.width,
            dims.height,
            rects.len()
        );

        let mut timings = TimingBreakdown::default();
        let anchors = timings.measure("anchors", || {
            self.classify_candidates(image, rects, &borders, dims)
        });
        debug!(
            "anchors: accepted={}/{} aspect={} size={} brightness={} bounds={}",
            anchors.accepted,
            anchors.candidates,
            anchors.rejected_aspect,
            anchors.rejected_size,
            anchors.rejected_brightness,
            anchors.rejected_out_of_bounds
        );

        let agg_start = Instant::now();
        let estimate = aggregate_corners(&anchors.accepted_cells());
        let agg_ms = elapsed_ms(agg_start);
        timings.push("aggregation", agg_ms);

        let (top_left, bottom_right) = estimate.corners();
        let grid = timings.measure("lattice", || build_lattice(&top_left, &bottom_right));
        debug!(
            "lattice: rows={} cols={} width={:?} fallback={}",
            grid.n_rows(),
            grid.n_cols(),
            grid.cell_width(),
            estimate.is_fallback()
        );

        let latency_ms = elapsed_ms(total_start);
        timings.total_ms = latency_ms;

        DetectionReport {
            grid: GridResult {
                found: !estimate.is_fallback(),
                grid,
                top_left,
                bottom_right,
                anchors_used: estimate.anchors_used(),
                latency_ms,
            },
            trace: PipelineTrace {
                input: InputDescriptor {
                    width: dims.width,
                    height: dims.height,
                    candidates: rects.len(),
                    borders,
                },
                timings,
                anchors,
                aggregation: AggregationStage::new(&estimate, agg_ms),
            },
        }
    }

    /// Patch of a single cell.
    pub fn sample_cell(&self, image: &ImageRgb8<'_>, cell: &GridCell) -> CellPatch {
        self.sampler.sample(image, cell)
    }

    /// Patches of every cell, in the grid's row-major layout.
    pub fn sample_grid(&self, image: &ImageRgb8<'_>, grid: &Grid) -> Vec<Vec<CellPatch>> {
        grid.rows()
            .iter()
            .map(|row| row.iter().map(|cell| self.sampler.sample(image, cell)).collect())
            .collect()
    }

    fn classify_candidates(
        &self,
        image: &ImageRgb8<'_>,
        rects: &[BoundingRect],
        borders: &BorderSettings,
        dims: ImageDims,
    ) -> AnchorStage {
        let samples = rects
            .iter()
            .map(|rect| {
                let verdict = classify_anchor(rect, image, &self.params.anchors);
                let cells = verdict
                    .is_accepted()
                    .then(|| anchor_cells(rect, &self.params.cell, borders, dims));
                AnchorSample {
                    rect: *rect,
                    verdict,
                    cells,
                }
            })
            .collect();
        AnchorStage::from_samples(samples)
    }
}
