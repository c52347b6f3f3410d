//! Pure, idempotent web-Mercator pixel geometry primitives.
//!
//! No I/O, no state. Every function here is a closed-form conversion between
//! (lat, lon), fractional pixel coordinates, and pixel envelope polygons at a
//! given zoom level. Implementations favor the closed-form `f64::ln`/`tan`
//! math directly; a fast-path approximation would need to agree with these
//! to within 1 ULP of the inputs it's exercised on, which isn't worth the
//! complexity at the data volumes this crate sees (one call per destination
//! pixel per analysis, not per request).

use std::f64::consts::PI;

use geo_types::{Coord, LineString, Polygon};

const TILE_SIZE: f64 = 256.0;

fn world_pixels(zoom: u8) -> f64 {
    2f64.powi(zoom as i32) * TILE_SIZE
}

/// Longitude in degrees to fractional world-pixel x at `zoom`.
pub fn lon_to_pixel_fractional(lon: f64, zoom: u8) -> f64 {
    ((lon + 180.0) / 360.0) * world_pixels(zoom)
}

/// Longitude in degrees to integer world-pixel x at `zoom` (floored).
pub fn lon_to_pixel(lon: f64, zoom: u8) -> i64 {
    lon_to_pixel_fractional(lon, zoom).floor() as i64
}

/// Latitude in degrees to fractional world-pixel y at `zoom`.
pub fn lat_to_pixel_fractional(lat: f64, zoom: u8) -> f64 {
    let lat_rad = lat.to_radians();
    let scale = 2f64.powi(zoom as i32 - 1) * TILE_SIZE;
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) * scale
}

/// Latitude in degrees to integer world-pixel y at `zoom` (floored).
pub fn lat_to_pixel(lat: f64, zoom: u8) -> i64 {
    lat_to_pixel_fractional(lat, zoom).floor() as i64
}

/// Inverse of [`lon_to_pixel_fractional`]: world-pixel x to longitude degrees.
pub fn pixel_to_lon(x: f64, zoom: u8) -> f64 {
    (x / world_pixels(zoom)) * 360.0 - 180.0
}

/// Inverse of [`lat_to_pixel_fractional`]: world-pixel y to latitude degrees.
pub fn pixel_to_lat(y: f64, zoom: u8) -> f64 {
    let scale = 2f64.powi(zoom as i32 - 1) * TILE_SIZE;
    let a = PI * (1.0 - y / scale);
    (2.0 * a.exp().atan() - PI / 2.0).to_degrees()
}

/// Longitude of the center of the pixel column `x` (offsets by +0.5 pixel).
pub fn pixel_to_center_lon(x: i64, zoom: u8) -> f64 {
    pixel_to_lon(x as f64 + 0.5, zoom)
}

/// Latitude of the center of the pixel row `y` (offsets by +0.5 pixel).
pub fn pixel_to_center_lat(y: i64, zoom: u8) -> f64 {
    pixel_to_lat(y as f64 + 0.5, zoom)
}

/// The closed 5-vertex envelope rectangle of pixel `(x, y)` at `zoom`, in
/// (lon, lat) WGS84 degrees. Winds (minLon,minLat) -> (minLon,maxLat) ->
/// (maxLon,maxLat) -> (maxLon,minLat) -> close. Note +y is south: the pixel's
/// south edge is at `y + 1`.
pub fn pixel_geometry(x: i64, y: i64, zoom: u8) -> Polygon<f64> {
    let min_lon = pixel_to_lon(x as f64, zoom);
    let max_lon = pixel_to_lon(x as f64 + 1.0, zoom);
    let max_lat = pixel_to_lat(y as f64, zoom);
    let min_lat = pixel_to_lat(y as f64 + 1.0, zoom);

    let ring = LineString::new(vec![
        Coord {
            x: min_lon,
            y: min_lat,
        },
        Coord {
            x: min_lon,
            y: max_lat,
        },
        Coord {
            x: max_lon,
            y: max_lat,
        },
        Coord {
            x: max_lon,
            y: min_lat,
        },
        Coord {
            x: min_lon,
            y: min_lat,
        },
    ]);

    Polygon::new(ring, vec![])
}
