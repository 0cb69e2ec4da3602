use crate::image::ImageRgb8;
use crate::types::BoundingRect;
use serde::{Deserialize, Serialize};

/// Thresholds used by the anchor tests.
///
/// - `aspect_ratio_x10`: expected long/short side ratio times ten, compared
///   after rounding.
/// - `min_size_divisor` / `max_size_divisor`: anchor width must lie strictly
///   between `H / min_size_divisor` and `H / max_size_divisor`.
/// - `probe_fraction`: vertical distance of the brightness probes from the
///   rectangle centre, as a fraction of its height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorCriteria {
    pub aspect_ratio_x10: f64,
    pub min_size_divisor: f64,
    pub max_size_divisor: f64,
    pub probe_fraction: f64,
}

impl Default for AnchorCriteria {
    fn default() -> Self {
        Self {
            aspect_ratio_x10: 12.0,
            min_size_divisor: 30.0,
            max_size_divisor: 5.0,
            probe_fraction: 1.0 / 6.0,
        }
    }
}

/// Outcome of classifying one candidate; names the first failed test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorVerdict {
    Accepted,
    Degenerate,
    WrongAspect,
    WrongSize,
    /// A brightness probe landed outside the image.
    ProbeOutOfBounds,
    NotTopLit,
}

impl AnchorVerdict {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, AnchorVerdict::Accepted)
    }
}

pub fn classify_anchor(
    rect: &BoundingRect,
    image: &ImageRgb8<'_>,
    criteria: &AnchorCriteria,
) -> AnchorVerdict {
    if rect.is_degenerate() {
        return AnchorVerdict::Degenerate;
    }
    if !has_anchor_aspect(rect, criteria) {
        return AnchorVerdict::WrongAspect;
    }
    if !has_anchor_size(rect, image.h, criteria) {
        return AnchorVerdict::WrongSize;
    }
    match top_is_brighter(rect, image, criteria) {
        Some(true) => AnchorVerdict::Accepted,
        Some(false) => AnchorVerdict::NotTopLit,
        None => AnchorVerdict::ProbeOutOfBounds,
    }
}

#[inline]
pub fn is_anchor(rect: &BoundingRect, image: &ImageRgb8<'_>, criteria: &AnchorCriteria) -> bool {
    classify_anchor(rect, image, criteria).is_accepted()
}

fn has_anchor_aspect(rect: &BoundingRect, criteria: &AnchorCriteria) -> bool {
    let w = f64::from(rect.width);
    let h = f64::from(rect.height);
    let target = criteria.aspect_ratio_x10;
    (w / h * 10.0).round_ties_even() == target || (h / w * 10.0).round_ties_even() == target
}

fn has_anchor_size(rect: &BoundingRect, image_height: usize, criteria: &AnchorCriteria) -> bool {
    let h = image_height as f64;
    let lower = (h / criteria.min_size_divisor).round_ties_even();
    let upper = (h / criteria.max_size_divisor).round_ties_even();
    let w = f64::from(rect.width);
    w > lower && w < upper
}

/// Compares the channel sums of two probes above and below the centre.
/// Returns `None` when a probe falls outside the image.
fn top_is_brighter(
    rect: &BoundingRect,
    image: &ImageRgb8<'_>,
    criteria: &AnchorCriteria,
) -> Option<bool> {
    let w = f64::from(rect.width);
    let h = f64::from(rect.height);
    let cx = f64::from(rect.x) + w / 2.0;
    let cy = f64::from(rect.y) + h / 2.0;
    let delta = h * criteria.probe_fraction;

    let px = to_index(cx)?;
    let above = image.channel_sum(px, to_index(cy - delta)?)?;
    let below = image.channel_sum(px, to_index(cy + delta)?)?;
    Some(above > below)
}

fn to_index(v: f64) -> Option<usize> {
    let r = v.round_ties_even();
    (r.is_finite() && r >= 0.0).then_some(r as usize)
}
