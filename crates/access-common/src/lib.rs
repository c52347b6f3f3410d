//! Shared types and utilities used across the accessibility aggregation
//! workspace: error enum, web-Mercator extents, rounding conventions, and
//! cooperative cancellation.

pub mod cancellation;
pub mod error;
pub mod extents;
pub mod rounding;

pub use cancellation::CancellationToken;
pub use error::{AccessError, AccessResult};
pub use extents::WebMercatorExtents;
pub use rounding::round_half_away_from_zero;

/// Sentinel marking an unreachable destination. Propagates through all
/// downstream arithmetic; never compared with ordinary travel times without
/// an explicit check against this constant.
pub const UNREACHED: i32 = i32::MAX;
