use crate::types::ImageDims;
use serde::Serialize;

/// Fixed HUD areas of the game screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HudRegion {
    /// Remaining rides counter, top right.
    Rides,
    /// Day-of-week label, top right corner.
    Day,
    /// Remaining road tiles, bottom centre.
    Roads,
    /// "Game Over" banner.
    GameOver,
    /// Weekly upgrade banner ("Woche …").
    Upgrade,
}

/// Half-open pixel window `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelWindow {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelWindow {
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }
}

impl HudRegion {
    pub const ALL: [HudRegion; 5] = [
        HudRegion::Rides,
        HudRegion::Day,
        HudRegion::Roads,
        HudRegion::GameOver,
        HudRegion::Upgrade,
    ];

    /// Region bounds for a frame of the given size.
    pub fn window(self, dims: ImageDims) -> PixelWindow {
        let w = dims.width as f64;
        let h = dims.height as f64;
        let (cx, cy) = (w / 2.0, h / 2.0);
        // [top, bottom, left, right]
        let bounds = match self {
            HudRegion::Rides => [h / 40.0, h / 15.0, w - w / 4.0, w - w / 8.7],
            HudRegion::Day => [h / 40.0, h / 15.0, w - w / 12.0, w - w / 22.0],
            HudRegion::Roads => [h - h / 16.0, h - h / 21.5, cx + w / 65.0, cx + w / 33.0],
            HudRegion::GameOver => [cy - h / 3.0, cy - h / 4.0, cx - w / 7.0, cx + w / 7.0],
            HudRegion::Upgrade => [cy - h / 4.5, cy - h / 7.0, cx - w / 4.5, cx + w / 10.0],
        };
        let [top, bottom, left, right] = bounds.map(to_px);
        PixelWindow {
            x0: left.min(dims.width),
            y0: top.min(dims.height),
            x1: right.min(dims.width),
            y1: bottom.min(dims.height),
        }
    }
}

fn to_px(v: f64) -> usize {
    v.round_ties_even().max(0.0) as usize
}
