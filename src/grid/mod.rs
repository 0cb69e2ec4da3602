//! Lattice estimation from accepted anchors.
//!
//! - [`settings`]: anchor→cell mapping and playable-area borders.
//! - [`geometry`]: per-anchor sample cell and its top-left / bottom-right
//!   boundary cells.
//! - [`aggregate`]: harmonic-mean reduction of boundary cells over anchors.
//! - [`lattice`]: expand the aggregated corners into rows of cells.

pub mod aggregate;
pub mod geometry;
pub mod lattice;
pub mod settings;

pub use aggregate::{aggregate_corners, harmonic_mean, CornerEstimate, FALLBACK_CELL};
pub use geometry::{anchor_cells, AnchorCells};
pub use lattice::{build_lattice, Grid};
pub use settings::{BorderSettings, Settings};
