//! Diagnostics data model exposed by the detector.
//!
//! `DetectionReport` is the main entry point returned by
//! [`AnchorGridDetector::process_with_diagnostics`](crate::AnchorGridDetector),
//! bundling the result (`GridResult`) with a `PipelineTrace` describing how
//! each stage treated the frame's candidates.

pub mod aggregation;
pub mod anchors;
pub mod pipeline;
pub mod timing;

pub use aggregation::AggregationStage;
pub use anchors::{AnchorSample, AnchorStage};
pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use timing::{StageTiming, TimingBreakdown};
