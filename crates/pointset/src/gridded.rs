use access_common::WebMercatorExtents;
use opportunity_grid::Grid;

use crate::PointSet;

/// A point set backed directly by an [`opportunity_grid::Grid`]: every pixel
/// in the grid is a destination, with coordinates at the pixel center.
pub struct GriddedPointSet<'g> {
    grid: &'g Grid,
}

impl<'g> GriddedPointSet<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self { grid }
    }

    fn local_xy(&self, i: usize) -> (i64, i64) {
        let width = self.grid.width() as usize;
        ((i % width) as i64, (i / width) as i64)
    }
}

impl PointSet for GriddedPointSet<'_> {
    fn count(&self) -> usize {
        (self.grid.width() as usize) * (self.grid.height() as usize)
    }

    fn lat(&self, i: usize) -> f64 {
        let (x, y) = self.local_xy(i);
        let (_, world_y) = self.grid.extents.world_pixel(x as u32, y as u32);
        mercator::pixel_to_center_lat(world_y, self.grid.zoom())
    }

    fn lon(&self, i: usize) -> f64 {
        let (x, y) = self.local_xy(i);
        let (world_x, _) = self.grid.extents.world_pixel(x as u32, y as u32);
        mercator::pixel_to_center_lon(world_x, self.grid.zoom())
    }

    fn opportunities(&self, i: usize) -> f64 {
        self.grid.opportunities(i)
    }

    fn extents(&self) -> Option<WebMercatorExtents> {
        Some(self.grid.extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_grid_dimensions() {
        let extents = WebMercatorExtents::new(10, 0, 0, 4, 3);
        let grid = Grid::new(extents);
        let ps = GriddedPointSet::new(&grid);
        assert_eq!(ps.count(), 12);
        assert_eq!(ps.extents(), Some(extents));
    }

    #[test]
    fn opportunities_pass_through() {
        let extents = WebMercatorExtents::new(10, 0, 0, 2, 2);
        let mut grid = Grid::new(extents);
        grid.accumulate(1, 0, 5.0);
        let ps = GriddedPointSet::new(&grid);
        assert_eq!(ps.opportunities(1), 5.0);
    }
}
