use crate::diagnostics::{AggregationStage, AnchorStage, TimingBreakdown};
use crate::grid::BorderSettings;
use crate::types::GridResult;
use serde::Serialize;

/// Result produced by [`AnchorGridDetector::process_with_diagnostics`](crate::AnchorGridDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub grid: GridResult,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub anchors: AnchorStage,
    pub aggregation: AggregationStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub candidates: usize,
    /// Borders in effect for this frame, after resolving defaults.
    pub borders: BorderSettings,
}
