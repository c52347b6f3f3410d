//! Integration test: build a grid through the public `Grid` constructor,
//! round-trip it through the binary codec, and check the values survive
//! rounding and delta-coding exactly.

use access_common::WebMercatorExtents;
use opportunity_grid::{io, Grid};

#[test]
fn three_by_two_grid_round_trips_to_rounded_integers() {
    let extents = WebMercatorExtents::new(9, 0, 0, 2, 3);
    let mut grid = Grid::new(extents);
    let values = [[1.4, 0.6], [0.0, 2.7], [3.5, 4.2]];
    for (y, row) in values.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            grid.accumulate(x as u32, y as u32, v);
        }
    }

    let mut buf = Vec::new();
    io::write(&mut buf, &grid).unwrap();
    let decoded = io::read(&buf[..]).unwrap();

    let expected = [[1i64, 1], [0, 3], [4, 4]];
    for y in 0..3 {
        for x in 0..2 {
            let i = y * 2 + x;
            assert_eq!(decoded.opportunities(i) as i64, expected[y][x]);
        }
    }
}
