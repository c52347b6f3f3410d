//! Isochrone contour extraction from a travel-time grid.
//!
//! Marching squares over a `+inf`-padded raster ([`trace`]) produces closed
//! rings in padded-raster vertex space; [`classify`] sorts those rings into
//! shells and holes; this module converts vertex coordinates to WGS84 and
//! assembles one [`MultiPolygon`] per cutoff, simplified with
//! [`geo::SimplifyVwPreserve`] to keep output size bounded without changing
//! topology.

mod classify;
mod trace;

use access_common::{AccessResult, WebMercatorExtents};
use geo::SimplifyVwPreserve;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

/// Degrees of longitude/latitude below which a simplified vertex is
/// considered redundant. Chosen to discard sub-pixel wiggle at the zoom
/// levels this crate operates at without visibly altering contour shape.
const SIMPLIFY_TOLERANCE_DEGREES: f64 = 1e-3;

/// Extract one [`MultiPolygon`] per cutoff (seconds) from a travel-time
/// raster. `times` is row-major over `extents`, UNREACHED-sentineled.
/// `cutoffs_seconds` need not be sorted; output order matches input order.
pub fn extract_isochrones(
    times: &[i32],
    extents: &WebMercatorExtents,
    cutoffs_seconds: &[f64],
) -> AccessResult<Vec<MultiPolygon<f64>>> {
    let raster = trace::PaddedRaster::new(times, extents.width as usize, extents.height as usize);

    let mut out = Vec::with_capacity(cutoffs_seconds.len());
    for &cutoff in cutoffs_seconds {
        out.push(extract_one(&raster, extents, cutoff));
    }
    Ok(out)
}

fn extract_one(
    raster: &trace::PaddedRaster,
    extents: &WebMercatorExtents,
    cutoff: f64,
) -> MultiPolygon<f64> {
    let rings = trace::trace_rings(raster, cutoff);

    let mut shells = Vec::new();
    let mut holes = Vec::new();
    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        if classify::is_shell(&ring) {
            shells.push(ring);
        } else {
            holes.push(ring);
        }
    }

    let assigned = classify::assign_holes_to_shells(shells, holes);

    let polygons: Vec<Polygon<f64>> = assigned
        .into_iter()
        .map(|(shell, holes)| {
            let exterior = ring_to_wgs84(&shell, extents);
            let interiors = holes
                .iter()
                .map(|h| ring_to_wgs84(h, extents))
                .collect::<Vec<_>>();
            Polygon::new(exterior, interiors)
        })
        .collect();

    MultiPolygon::new(polygons).simplify_vw_preserve(&SIMPLIFY_TOLERANCE_DEGREES)
}

/// Convert a closed ring of padded-raster vertex coordinates to a closed
/// WGS84 `LineString`. Padded vertex `(vx, vy)` corresponds to world pixel
/// `(extents.west + vx - 1, extents.north + vy - 1)` — the `-1` undoes the
/// single-cell border `PaddedRaster` adds around the grid.
fn ring_to_wgs84(ring: &[Coord<f64>], extents: &WebMercatorExtents) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = ring
        .iter()
        .map(|c| {
            let world_x = extents.west as f64 + c.x - 1.0;
            let world_y = extents.north as f64 + c.y - 1.0;
            Coord {
                x: mercator::pixel_to_lon(world_x, extents.zoom),
                y: mercator::pixel_to_lat(world_y, extents.zoom),
            }
        })
        .collect();

    if coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    LineString::new(coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_common::UNREACHED;

    /// A 5x5 grid with a single reachable blob in the middle should yield
    /// exactly one polygon at a cutoff that excludes the corners.
    #[test]
    fn single_blob_produces_one_polygon() {
        let w = 5usize;
        let h = 5usize;
        let mut times = vec![UNREACHED; w * h];
        for y in 1..4 {
            for x in 1..4 {
                times[y * w + x] = 100;
            }
        }
        let extents = WebMercatorExtents::new(10, 0, 0, w as u32, h as u32);
        let result = extract_isochrones(&times, &extents, &[200.0]).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn fully_unreachable_grid_yields_empty_multipolygon() {
        let w = 4usize;
        let h = 4usize;
        let times = vec![UNREACHED; w * h];
        let extents = WebMercatorExtents::new(10, 0, 0, w as u32, h as u32);
        let result = extract_isochrones(&times, &extents, &[600.0]).unwrap();
        assert_eq!(result[0].0.len(), 0);
    }

    #[test]
    fn multiple_cutoffs_preserve_order() {
        let w = 5usize;
        let h = 5usize;
        let mut times = vec![UNREACHED; w * h];
        for y in 1..4 {
            for x in 1..4 {
                times[y * w + x] = 100;
            }
        }
        let extents = WebMercatorExtents::new(10, 0, 0, w as u32, h as u32);
        let result = extract_isochrones(&times, &extents, &[50.0, 600.0]).unwrap();
        assert_eq!(result.len(), 2);
        // cutoff below every reachable time: no contour.
        assert_eq!(result[0].0.len(), 0);
        // cutoff above every reachable time: the blob's ring.
        assert_eq!(result[1].0.len(), 1);
    }
}
