use crate::anchors::AnchorVerdict;
use crate::grid::AnchorCells;
use crate::types::BoundingRect;
use serde::Serialize;

/// One candidate rectangle and what the classifier made of it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorSample {
    pub rect: BoundingRect,
    pub verdict: AnchorVerdict,
    /// Geometry inferred for accepted anchors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<AnchorCells>,
}

/// Classification summary for all candidates of one frame.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorStage {
    pub candidates: usize,
    pub accepted: usize,
    pub rejected_degenerate: usize,
    pub rejected_aspect: usize,
    pub rejected_size: usize,
    pub rejected_out_of_bounds: usize,
    pub rejected_brightness: usize,
    pub samples: Vec<AnchorSample>,
}

impl AnchorStage {
    pub fn from_samples(samples: Vec<AnchorSample>) -> Self {
        let mut stage = AnchorStage {
            candidates: samples.len(),
            ..Default::default()
        };
        for sample in &samples {
            let counter = match sample.verdict {
                AnchorVerdict::Accepted => &mut stage.accepted,
                AnchorVerdict::Degenerate => &mut stage.rejected_degenerate,
                AnchorVerdict::WrongAspect => &mut stage.rejected_aspect,
                AnchorVerdict::WrongSize => &mut stage.rejected_size,
                AnchorVerdict::ProbeOutOfBounds => &mut stage.rejected_out_of_bounds,
                AnchorVerdict::NotTopLit => &mut stage.rejected_brightness,
            };
            *counter += 1;
        }
        stage.samples = samples;
        stage
    }

    pub fn rejected(&self) -> usize {
        self.candidates - self.accepted
    }

    /// Geometry of the accepted anchors, in candidate order.
    pub fn accepted_cells(&self) -> Vec<AnchorCells> {
        self.samples.iter().filter_map(|s| s.cells).collect()
    }
}
