//! Pycnophylactic rasterization: distributing a polygon's total opportunity
//! value onto a pixel grid in proportion to area overlap, so that summing
//! the rasterized cells recovers the original polygon total exactly (modulo
//! floating-point error), never double-counting or losing mass.

use std::collections::HashMap;

use access_common::{AccessError, AccessResult};
use geo::{Area, BooleanOps, BoundingRect};
use geo_types::Polygon;

use crate::grid::Grid;

/// Area-weighted share of `polygon` falling into each pixel it overlaps,
/// keyed by local `(x, y)` grid coordinates. Weights sum to 1.0 over all
/// returned pixels (barring polygons that extend outside the grid, in which
/// case they sum to the in-grid fraction).
///
/// Returns `InvalidGeometry` if the polygon's area is degenerate (below
/// `1e-12` square degrees): such a polygon cannot be proportionally split.
pub fn pixel_weights(
    grid: &Grid,
    polygon: &Polygon<f64>,
) -> AccessResult<HashMap<(u32, u32), f64>> {
    let total_area = polygon.unsigned_area();
    if total_area < 1e-12 {
        return Err(AccessError::InvalidGeometry(format!(
            "polygon area {total_area} is degenerate"
        )));
    }

    let bounds = match polygon.bounding_rect() {
        Some(b) => b,
        None => {
            return Err(AccessError::InvalidGeometry(
                "polygon has no bounding rect".into(),
            ))
        }
    };

    let zoom = grid.zoom();
    let min_world_x = mercator::lon_to_pixel(bounds.min().x, zoom);
    let max_world_x = mercator::lon_to_pixel(bounds.max().x, zoom);
    let min_world_y = mercator::lat_to_pixel(bounds.max().y, zoom);
    let max_world_y = mercator::lat_to_pixel(bounds.min().y, zoom);

    let mut weights = HashMap::new();

    for world_y in min_world_y..=max_world_y {
        for world_x in min_world_x..=max_world_x {
            let local_x = world_x - grid.extents.west as i64;
            let local_y = world_y - grid.extents.north as i64;
            if grid.extents.index_of(local_x, local_y).is_none() {
                continue;
            }

            let pixel_poly = mercator::pixel_geometry(world_x, world_y, zoom);
            let overlap = polygon.intersection(&pixel_poly);
            let overlap_area = overlap.unsigned_area();
            if overlap_area <= 0.0 {
                continue;
            }

            let share = overlap_area / total_area;
            weights.insert((local_x as u32, local_y as u32), share);
        }
    }

    Ok(weights)
}

/// Rasterize `polygon`'s `total_value` onto `grid` in place, distributing
/// proportionally to area overlap per [`pixel_weights`].
pub fn rasterize_polygon(grid: &mut Grid, polygon: &Polygon<f64>, total_value: f64) -> AccessResult<()> {
    let weights = pixel_weights(grid, polygon)?;
    for ((x, y), share) in weights {
        grid.accumulate(x, y, share * total_value);
    }
    Ok(())
}
