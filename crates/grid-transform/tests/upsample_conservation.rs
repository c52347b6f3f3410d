//! Integration test: wrap a source grid at a coarser zoom with
//! `GridTransformWrapper` and check the target point set conserves total
//! opportunity mass, reading only through the `PointSet` trait the way a
//! consuming analysis would.

use access_common::WebMercatorExtents;
use grid_transform::GridTransformWrapper;
use opportunity_grid::Grid;
use pointset::PointSet;

#[test]
fn upsampling_two_zoom_levels_conserves_total_opportunities() {
    // Source grid (zoom 9) holds a single cell worth 8.0 opportunities;
    // wrapped at zoom 11 (dz=2) that cell covers a 4x4 = 16 target cell
    // block, each carrying 8.0 / 4^2 = 0.5, summing back to 8.0 exactly.
    let source_extents = WebMercatorExtents::new(9, 20, 40, 1, 1);
    let mut source = Grid::new(source_extents);
    source.accumulate(0, 0, 8.0);

    let target_extents = WebMercatorExtents::new(11, 80, 160, 4, 4);
    let wrapper = GridTransformWrapper::new(&source, target_extents).unwrap();

    let total: f64 = (0..wrapper.count()).map(|i| wrapper.opportunities(i)).sum();
    assert_eq!(total, 8.0);
}
