//! Linkage Cache: per-network cache of `(PointSet, StreetLayer, Mode) ->
//! Linkage`, with sub-linkage cropping, scenario-overlay derivation, and
//! per-key build serialization under concurrent access.

mod cache;
mod context;
mod key;

pub use cache::LinkageCache;
pub use context::LinkageContext;
pub use key::{LinkageKey, PointSetId, StreetLayerId, StreetMode};
