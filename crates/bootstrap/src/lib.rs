//! Bootstrap Hypothesis Test: consumes two access grids sharing extents and
//! produces a pairwise p-value grid, per origin pixel.

use access_common::{AccessError, AccessResult};
use access_grid::AccessGrid;
use rayon::prelude::*;

/// `(1 - p) * 1e5`, rounded to integer, one value per origin pixel,
/// row-major over the shared extents.
pub fn bootstrap(a: &AccessGrid, b: &AccessGrid) -> AccessResult<Vec<i64>> {
    if a.extents != b.extents {
        return Err(AccessError::BadConfig(format!(
            "bootstrap requires matching extents: {:?} vs {:?}",
            a.extents, b.extents
        )));
    }

    let width = a.extents.width;
    let height = a.extents.height;
    let n_pixels = (width as usize) * (height as usize);

    let results: Vec<i64> = (0..n_pixels)
        .into_par_iter()
        .map(|i| {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            bootstrap_pixel(a.iterations_at(x, y), b.iterations_at(x, y))
        })
        .collect();

    Ok(results)
}

/// Bootstrap a single origin pixel's pairwise p-value. `series_a`/
/// `series_b` hold the point estimate at index 0 followed by the bootstrap
/// replicates.
fn bootstrap_pixel(series_a: &[i32], series_b: &[i32]) -> i64 {
    let delta = series_b[0] - series_a[0];
    if delta == 0 {
        return 0;
    }

    let replicates_a = &series_a[1..];
    let replicates_b = &series_b[1..];
    let n_a = replicates_a.len();
    let n_b = replicates_b.len();

    let mut n_pos = 0u64;
    let mut n_neg = 0u64;
    let mut n_zero = 0u64;

    for &bi in replicates_b {
        for &aj in replicates_a {
            let diff = bi - aj;
            match diff.cmp(&0) {
                std::cmp::Ordering::Greater => n_pos += 1,
                std::cmp::Ordering::Less => n_neg += 1,
                std::cmp::Ordering::Equal => n_zero += 1,
            }
        }
    }

    let total = (n_a as u64) * (n_b as u64);
    let p = if delta < 0 {
        2.0 * (n_zero + n_pos) as f64 / total as f64
    } else {
        2.0 * (n_zero + n_neg) as f64 / total as f64
    }
    .clamp(0.0, 1.0);

    ((1.0 - p) * 1e5).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_common::WebMercatorExtents;

    fn grid_with_series(series: &[i32]) -> AccessGrid {
        let extents = WebMercatorExtents::new(9, 0, 0, 1, 1);
        let mut grid = AccessGrid::new(extents, series.len());
        for (i, &v) in series.iter().enumerate() {
            grid.set(0, 0, i, v);
        }
        grid
    }

    #[test]
    fn zero_delta_emits_zero() {
        let a = grid_with_series(&[10, 10, 10, 10]);
        let b = grid_with_series(&[10, 10, 10, 10]);
        let result = bootstrap(&a, &b).unwrap();
        assert_eq!(result[0], 0);
    }

    #[test]
    fn all_positive_differences_emit_100000() {
        let a = grid_with_series(&[5, 4, 5, 6]);
        let b = grid_with_series(&[10, 9, 10, 11]);
        let result = bootstrap(&a, &b).unwrap();
        assert_eq!(result[0], 100_000);
    }

    #[test]
    fn mismatched_extents_is_rejected() {
        let a = grid_with_series(&[1, 2]);
        let mut b = grid_with_series(&[1, 2]);
        b.extents = WebMercatorExtents::new(10, 0, 0, 1, 1);
        assert!(bootstrap(&a, &b).is_err());
    }
}
