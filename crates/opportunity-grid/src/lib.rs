//! Opportunity grids: dense web-Mercator sub-grids of opportunity density,
//! built from point counts or polygon-weighted area shares, and persisted in
//! a compact delta-coded binary format.

pub mod grid;
pub mod io;
pub mod rasterize;

pub use grid::Grid;
pub use rasterize::{pixel_weights, rasterize_polygon};
