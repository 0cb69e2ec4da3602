use crate::grid::CornerEstimate;
use crate::types::Cell;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStage {
    pub fallback: bool,
    pub anchors_used: usize,
    pub anchors_skipped: usize,
    pub top_left: Cell,
    pub bottom_right: Cell,
    pub elapsed_ms: f64,
}

impl AggregationStage {
    pub fn new(estimate: &CornerEstimate, elapsed_ms: f64) -> Self {
        let (top_left, bottom_right) = estimate.corners();
        Self {
            fallback: estimate.is_fallback(),
            anchors_used: estimate.anchors_used(),
            anchors_skipped: estimate.anchors_skipped(),
            top_left,
            bottom_right,
            elapsed_ms,
        }
    }
}
