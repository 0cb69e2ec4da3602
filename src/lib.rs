#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod types;

// Stage modules, public for tools that run the stages one by one.
pub mod anchors;
pub mod grid;
pub mod hud;
pub mod sampler;

// Demo configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{AnchorGridDetector, DetectorParams, FrameReader, FrameReport};
pub use crate::grid::Grid;
pub use crate::sampler::{CellPatch, CellSampler};
pub use crate::types::{BoundingRect, Cell, GridCell, GridResult};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use anchor_grid::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let pixels = vec![[0u8; 3]; w * h];
/// let image = ImageRgb8::new(w, h, ChannelOrder::Rgb, &pixels);
///
/// let detector = AnchorGridDetector::new(DetectorParams::default());
/// let rects = [BoundingRect::new(100, 100, 24, 20)];
/// let result = detector.process(&image, &rects);
/// println!("found={} latency_ms={:.3}", result.found, result.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelOrder, ImageRgb8};
    pub use crate::{AnchorGridDetector, BoundingRect, DetectorParams, GridResult};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage functions in pipeline order.
    pub use crate::anchors::{classify_anchor, AnchorCriteria, AnchorVerdict};
    pub use crate::grid::{
        aggregate_corners, anchor_cells, build_lattice, AnchorCells, BorderSettings,
        CornerEstimate, Settings,
    };
    pub use crate::sampler::SamplerOptions;

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        AggregationStage, AnchorSample, AnchorStage, InputDescriptor, StageTiming,
        TimingBreakdown,
    };
}
