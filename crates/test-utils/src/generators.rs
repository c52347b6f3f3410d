//! Synthetic, deterministic data generators for accessibility workspace
//! tests: opportunity grids, travel-time arrays, and decay-friendly
//! percentile inputs.

use access_common::UNREACHED;

/// A dense opportunity density grid with a predictable gradient, in
/// row-major order. `grid[row*width+col] == (col * 1000 + row) as f64`,
/// mirroring the col/row-encoded pattern used across this workspace's
/// binary format round-trip tests.
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// A uniform opportunity grid where every cell holds `value`. Useful for
/// mass-conservation tests where the total is easy to check by hand.
pub fn create_uniform_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// A synthetic travel-time raster radiating outward from `(origin_x,
/// origin_y)` at `seconds_per_pixel` per Chebyshev-distance step, with a
/// ring of unreachable cells beyond `reach_radius` pixels. Produces
/// concentric square isochrones, which is enough to exercise marching
/// squares without needing a real routing engine.
pub fn create_radial_travel_times(
    width: usize,
    height: usize,
    origin_x: usize,
    origin_y: usize,
    seconds_per_pixel: i32,
    reach_radius: usize,
) -> Vec<i32> {
    let mut times = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = (x as i64 - origin_x as i64).unsigned_abs() as usize;
            let dy = (y as i64 - origin_y as i64).unsigned_abs() as usize;
            let dist = dx.max(dy);
            if dist > reach_radius {
                times.push(UNREACHED);
            } else {
                times.push(dist as i32 * seconds_per_pixel);
            }
        }
    }
    times
}

/// `n_iterations` travel times per target, one row per target. Row `i`
/// holds `base_seconds[i]` plus a deterministic per-iteration jitter that
/// cycles through `jitter_pattern`, simulating Monte Carlo departure-time
/// variation without an actual router.
pub fn create_travel_time_iterations(
    base_seconds: &[i32],
    n_iterations: usize,
    jitter_pattern: &[i32],
) -> Vec<Vec<i32>> {
    base_seconds
        .iter()
        .map(|&base| {
            (0..n_iterations)
                .map(|i| {
                    if base == UNREACHED {
                        UNREACHED
                    } else {
                        base + jitter_pattern[i % jitter_pattern.len()]
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_encodes_col_row() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[1], 1000.0);
        assert_eq!(grid[10], 1.0);
    }

    #[test]
    fn uniform_grid_sums_exactly() {
        let grid = create_uniform_grid(4, 4, 2.5);
        let total: f64 = grid.iter().sum();
        assert_eq!(total, 16.0 * 2.5);
    }

    #[test]
    fn radial_travel_times_ring_out_from_origin() {
        let times = create_radial_travel_times(5, 5, 2, 2, 60, 1);
        assert_eq!(times[2 * 5 + 2], 0);
        assert_eq!(times[2 * 5 + 1], 60);
        assert_eq!(times[0], UNREACHED);
    }

    #[test]
    fn travel_time_iterations_preserve_unreachable() {
        let iters = create_travel_time_iterations(&[100, UNREACHED], 3, &[0, 10, -10]);
        assert_eq!(iters[0], vec![100, 110, 90]);
        assert_eq!(iters[1], vec![UNREACHED, UNREACHED, UNREACHED]);
    }
}
