//! The opportunity grid: a rectangular sub-grid of the worldwide web-Mercator
//! pyramid holding scalar opportunity densities per pixel.

use access_common::WebMercatorExtents;

/// A dense opportunity-density grid. Built once from point/polygon data or
/// read from binary, and never mutated after publish (aggregation into the
/// density array happens only during construction/rasterization).
#[derive(Debug, Clone)]
pub struct Grid {
    pub extents: WebMercatorExtents,
    /// Row-major (x inner, y outer) opportunity densities.
    density: Vec<f64>,
}

impl Grid {
    /// Allocate a zeroed grid over the given extents.
    pub fn new(extents: WebMercatorExtents) -> Self {
        let density = vec![0.0; extents.len()];
        Self { extents, density }
    }

    /// Construct extents (and an empty grid) from WGS84 bounds at `zoom`,
    /// matching the north/west pixel-origin convention used throughout this
    /// workspace.
    pub fn from_bounds(north: f64, east: f64, south: f64, west: f64, zoom: u8) -> Self {
        let west_px = mercator::lon_to_pixel(west, zoom);
        let north_px = mercator::lat_to_pixel(north, zoom);
        let east_px = mercator::lon_to_pixel(east, zoom);
        let south_px = mercator::lat_to_pixel(south, zoom);

        let width = (east_px - west_px).max(0) as u32;
        let height = (south_px - north_px).max(0) as u32;

        Self::new(WebMercatorExtents::new(
            zoom,
            west_px as i32,
            north_px as i32,
            width,
            height,
        ))
    }

    pub fn width(&self) -> u32 {
        self.extents.width
    }

    pub fn height(&self) -> u32 {
        self.extents.height
    }

    pub fn zoom(&self) -> u8 {
        self.extents.zoom
    }

    /// Opportunity density at flat row-major index `i`.
    pub fn opportunities(&self, i: usize) -> f64 {
        self.density[i]
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn density_mut(&mut self) -> &mut [f64] {
        &mut self.density
    }

    /// Sum of all opportunity mass in the grid.
    pub fn total(&self) -> f64 {
        self.density.iter().sum()
    }

    /// Increment the cell containing (lat, lon) by `amount`. Out-of-bounds
    /// points are silently ignored (a diagnostic is logged at debug level,
    /// not a warning: a point falling outside a regional grid is expected,
    /// not anomalous).
    pub fn increment_point(&mut self, lat: f64, lon: f64, amount: f64) {
        let world_x = mercator::lon_to_pixel(lon, self.extents.zoom);
        let world_y = mercator::lat_to_pixel(lat, self.extents.zoom);
        let local_x = world_x - self.extents.west as i64;
        let local_y = world_y - self.extents.north as i64;

        match self.extents.index_of(local_x, local_y) {
            Some(i) => self.density[i] += amount,
            None => {
                tracing::debug!(
                    lat,
                    lon,
                    local_x,
                    local_y,
                    "point falls outside grid extents, ignored"
                );
            }
        }
    }

    /// Add `weight * value` into cell `(x, y)` local to this grid, if in
    /// bounds. Used by the polygon rasterizer to accumulate pycnophylactic
    /// shares.
    pub fn accumulate(&mut self, x: u32, y: u32, amount: f64) {
        if let Some(i) = self.extents.index_of(x as i64, y as i64) {
            self.density[i] += amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_zeroed() {
        let extents = WebMercatorExtents::new(5, 0, 0, 3, 2);
        let grid = Grid::new(extents);
        assert_eq!(grid.total(), 0.0);
        assert_eq!(grid.density().len(), 6);
    }

    #[test]
    fn increment_point_in_bounds() {
        let extents = WebMercatorExtents::new(10, 100, 100, 10, 10);
        let mut grid = Grid::new(extents);
        let (lat, lon) = (
            mercator::pixel_to_center_lat(105, 10),
            mercator::pixel_to_center_lon(105, 10),
        );
        grid.increment_point(lat, lon, 3.0);
        assert_eq!(grid.total(), 3.0);
    }

    #[test]
    fn increment_point_out_of_bounds_is_ignored() {
        let extents = WebMercatorExtents::new(10, 100, 100, 10, 10);
        let mut grid = Grid::new(extents);
        grid.increment_point(89.9, -179.9, 5.0);
        assert_eq!(grid.total(), 0.0);
    }

    #[test]
    fn from_bounds_has_positive_dimensions() {
        let grid = Grid::from_bounds(40.8, -73.9, 40.6, -74.1, 11);
        assert!(grid.width() > 0);
        assert!(grid.height() > 0);
    }
}
