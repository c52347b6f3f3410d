use access_common::AccessResult;

use crate::key::{LinkageKey, PointSetId, StreetLayerId};

/// Supplies the relations and construction primitives the cache needs to
/// run the build policy: parent/child pointset relations, scenario
/// base relations, and the three ways to actually build a linkage. The
/// routing engine that does the real work is an external collaborator;
/// this trait is the seam the core calls into.
pub trait LinkageContext<L>: Send + Sync {
    /// The parent grid of `pointset`, if it is a cropped sub-grid of one
    /// already known to the caller, and the two share a zoom level.
    fn parent_pointset(&self, pointset: PointSetId) -> Option<PointSetId>;

    /// The base street layer `street_layer` is a scenario copy of, if any.
    fn scenario_base(&self, street_layer: StreetLayerId) -> Option<StreetLayerId>;

    /// Build `key` with no shortcut available.
    fn build_from_scratch(&self, key: LinkageKey) -> AccessResult<L>;

    /// Crop `parent_linkage` (built for the parent pointset) down to `key`'s
    /// child grid extents.
    fn crop_sub_linkage(&self, parent_linkage: &L, key: LinkageKey) -> AccessResult<L>;

    /// Build `key` atop `base_linkage` (the linkage for the scenario's base
    /// street layer), reusing unchanged edges.
    fn build_scenario_overlay(&self, base_linkage: &L, key: LinkageKey) -> AccessResult<L>;
}
