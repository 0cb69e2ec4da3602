//! Parameter types configuring the detector stages.
//!
//! Defaults are tuned for Mini Motorways window captures. Borders
//! are usually left unset so they are derived from each frame's height.

use crate::anchors::AnchorCriteria;
use crate::grid::{BorderSettings, Settings};
use crate::sampler::SamplerOptions;
use crate::types::ImageDims;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters. Immutable for the lifetime of a detector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Anchor box → cell footprint mapping.
    pub cell: Settings,
    /// Fixed playable-area borders. `None` derives them from the frame height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<BorderSettings>,
    /// Anchor classification thresholds.
    pub anchors: AnchorCriteria,
    /// Cell patch resolution.
    pub sampler: SamplerOptions,
}

impl DetectorParams {
    /// Borders in effect for a frame of the given size.
    pub fn borders_for(&self, dims: ImageDims) -> BorderSettings {
        self.borders
            .clone()
            .unwrap_or_else(|| BorderSettings::for_image_height(dims.height))
    }
}
