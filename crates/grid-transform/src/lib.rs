//! Grid Transform Wrapper: a virtual point set that re-indexes a source
//! opportunity grid through a target grid's extents, upsampling with exact
//! power-of-two conservation of opportunities.

use access_common::{AccessError, AccessResult, WebMercatorExtents};
use opportunity_grid::Grid;
use pointset::PointSet;

/// Wraps a source [`Grid`] and presents it as a point set over
/// `target_extents`, which must be at an equal or finer zoom (`dz ∈
/// [0, 3]`, upsample only — downsampling through this wrapper is
/// unsupported).
pub struct GridTransformWrapper<'g> {
    source: &'g Grid,
    target_extents: WebMercatorExtents,
    dz: u32,
}

impl<'g> GridTransformWrapper<'g> {
    /// Construct the wrapper, validating `dz = target.zoom - source.zoom`
    /// is in `[0, 3]`.
    pub fn new(source: &'g Grid, target_extents: WebMercatorExtents) -> AccessResult<Self> {
        let source_zoom = source.zoom() as i16;
        let target_zoom = target_extents.zoom as i16;
        let dz = target_zoom - source_zoom;
        if !(0..=3).contains(&dz) {
            return Err(AccessError::BadConfig(format!(
                "grid transform requires dz in [0,3], got dz={dz} (source zoom {source_zoom}, target zoom {target_zoom})"
            )));
        }

        Ok(Self {
            source,
            target_extents,
            dz: dz as u32,
        })
    }

    /// Map a flat target index to source-grid local coordinates, or `None`
    /// if the mapped cell falls outside the source grid.
    fn source_xy(&self, ti: usize) -> Option<(i64, i64)> {
        let target_width = self.target_extents.width as i64;
        let tx = (ti as i64) % target_width;
        let ty = (ti as i64) / target_width;

        let source_west_scaled = (self.source.extents.west as i64) << self.dz;
        let source_north_scaled = (self.source.extents.north as i64) << self.dz;

        let sx = (tx + self.target_extents.west as i64 - source_west_scaled) >> self.dz;
        let sy = (ty + self.target_extents.north as i64 - source_north_scaled) >> self.dz;

        Some((sx, sy))
    }
}

impl PointSet for GridTransformWrapper<'_> {
    fn count(&self) -> usize {
        self.target_extents.len()
    }

    fn lat(&self, i: usize) -> f64 {
        let width = self.target_extents.width as i64;
        let (x, y) = ((i as i64) % width, (i as i64) / width);
        let (_, world_y) = self.target_extents.world_pixel(x as u32, y as u32);
        mercator::pixel_to_center_lat(world_y, self.target_extents.zoom)
    }

    fn lon(&self, i: usize) -> f64 {
        let width = self.target_extents.width as i64;
        let (x, y) = ((i as i64) % width, (i as i64) / width);
        let (world_x, _) = self.target_extents.world_pixel(x as u32, y as u32);
        mercator::pixel_to_center_lon(world_x, self.target_extents.zoom)
    }

    fn opportunities(&self, i: usize) -> f64 {
        let Some((sx, sy)) = self.source_xy(i) else {
            return 0.0;
        };
        match self.source.extents.index_of(sx, sy) {
            Some(source_i) => {
                let scale = 4f64.powi(self.dz as i32);
                self.source.opportunities(source_i) / scale
            }
            None => 0.0,
        }
    }

    fn extents(&self) -> Option<WebMercatorExtents> {
        Some(self.target_extents)
    }
}
