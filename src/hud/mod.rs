//! HUD readouts surrounding the playable area.
//!
//! The game draws its counters (rides, day, roads) and its modal banners
//! (game over, weekly upgrade) at fixed positions relative to the frame. Each
//! region is cropped from the grayscale frame, thresholded, inverted so the
//! text is dark on light, and handed to a caller-supplied [`TextReader`].
//! Text recognition itself is not part of this crate.

mod reader;
mod regions;

pub use reader::{prepare_for_text, FrameStatus, HudReader, TextReader, UPGRADE_PREFIX};
pub use regions::{HudRegion, PixelWindow};
