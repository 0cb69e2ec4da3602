//! Anchor classification.
//!
//! An anchor is a house icon found by the upstream contour stage. Houses are
//! drawn with a fixed 1.2 side ratio, at a size tied to the frame height, and
//! with a roof that is brighter than the base. A candidate rectangle must pass
//! all three tests, evaluated in that order.

mod classify;

pub use classify::{classify_anchor, is_anchor, AnchorCriteria, AnchorVerdict};
