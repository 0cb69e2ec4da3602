//! Anchor grid detector.
//!
//! Overview
//! - Classifies every candidate rectangle from the upstream contour stage and
//!   keeps the ones that look like house icons.
//! - Maps each accepted anchor to its sample cell and extrapolates it to the
//!   top-left and bottom-right cells of the playable area.
//! - Reduces the per-anchor corner cells with a harmonic mean, or falls back
//!   to a fixed placeholder when no anchor survives.
//! - Expands the corners into the lattice and, on demand, samples each cell.
//!
//! Modules
//! - [`params`] – configuration consumed by the detector and the demo binary.
//! - `pipeline` – the [`AnchorGridDetector`] implementation.
//! - [`frame`] – whole-frame reading: HUD status, counters and sampled grid.
//!
//! Every call is independent: the detector keeps no per-frame state, so the
//! same frame and parameters always produce the same report.

pub mod frame;
pub mod params;
mod pipeline;

pub use frame::{FramePart, FrameReader, FrameReport, SampledCell};
pub use params::DetectorParams;
pub use pipeline::AnchorGridDetector;
