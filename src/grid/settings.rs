//! Anchor→cell mapping parameters and playable-area borders.
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Maps an anchor's bounding box to the footprint of the cell it stands on.
///
/// The cell origin is shifted up-left by `offset` times the anchor size and
/// the cell width is `scale.x` times the anchor's long side. `scale.y` is
/// carried for symmetry; cells are square so only `scale.x` is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub offset: Vector2<f64>,
    pub scale: Vector2<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            offset: Vector2::new(0.12, 0.12),
            scale: Vector2::new(0.66, 0.66),
        }
    }
}

/// Padding around the playable area, as fractions of the frame size.
///
/// `top`/`bottom` scale with the frame height, `left`/`right` with its width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderSettings {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl BorderSettings {
    /// Borders tuned for the game HUD. The HUD bars keep a roughly fixed
    /// pixel height, so their share of the frame shrinks as the frame grows.
    pub fn for_image_height(height: usize) -> Self {
        let h = height as f64;
        Self {
            top: linear_conversion([480.0, 1050.0], [15.0, 50.0], h) / 1000.0,
            bottom: linear_conversion([480.0, 1050.0], [120.0, 140.0], h) / 1000.0,
            left: 30.0 / 1000.0,
            right: 30.0 / 1000.0,
        }
    }
}

/// Map `value` from `old` range to `new` range (no clamping).
pub fn linear_conversion(old: [f64; 2], new: [f64; 2], value: f64) -> f64 {
    let [old_min, old_max] = old;
    let [new_min, new_max] = new;
    ((value - old_min) * (new_max - new_min)) / (old_max - old_min) + new_min
}
