//! Marching-squares ring tracing with linear interpolation of crossing
//! points and entry-direction disambiguation of saddle cells (cases 5, 10).

use std::collections::HashSet;

use access_common::UNREACHED;
use geo_types::Coord;

/// Which side of a cell an edge crossing sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A padded time raster: one cell of `+inf` border on every side so
/// contours never leave the window.
pub(crate) struct PaddedRaster {
    width: usize,
    height: usize,
    inner_width: usize,
    values: Vec<f64>,
}

impl PaddedRaster {
    pub(crate) fn new(times: &[i32], inner_width: usize, inner_height: usize) -> Self {
        let width = inner_width + 2;
        let height = inner_height + 2;
        let mut values = vec![f64::INFINITY; width * height];
        for y in 0..inner_height {
            for x in 0..inner_width {
                let t = times[y * inner_width + x];
                let v = if t == UNREACHED {
                    f64::INFINITY
                } else {
                    t as f64
                };
                values[(y + 1) * width + (x + 1)] = v;
            }
        }
        Self {
            width,
            height,
            inner_width,
            values,
        }
    }

    fn value(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Number of cells along x (one fewer than padded vertex columns).
    pub(crate) fn cells_x(&self) -> usize {
        self.width - 1
    }

    /// Number of cells along y.
    pub(crate) fn cells_y(&self) -> usize {
        self.height - 1
    }

    /// Case index for cell `(cx, cy)`: bits 8/4/2/1 for TL/TR/BR/BL, lit
    /// when the corner value is `< cutoff`.
    fn case(&self, cx: usize, cy: usize, cutoff: f64) -> u8 {
        let tl = self.value(cx, cy) < cutoff;
        let tr = self.value(cx + 1, cy) < cutoff;
        let br = self.value(cx + 1, cy + 1) < cutoff;
        let bl = self.value(cx, cy + 1) < cutoff;
        (tl as u8) << 3 | (tr as u8) << 2 | (br as u8) << 1 | (bl as u8)
    }

    /// Interpolated (column, row) position — in padded raster vertex
    /// coordinates, `f64` — of the cutoff crossing on edge `edge` of cell
    /// `(cx, cy)`.
    fn interpolate(&self, cx: usize, cy: usize, edge: Edge, cutoff: f64) -> (f64, f64) {
        let (x0, y0, v0, x1, y1, v1) = match edge {
            Edge::Top => (
                cx as f64,
                cy as f64,
                self.value(cx, cy),
                cx as f64 + 1.0,
                cy as f64,
                self.value(cx + 1, cy),
            ),
            Edge::Right => (
                cx as f64 + 1.0,
                cy as f64,
                self.value(cx + 1, cy),
                cx as f64 + 1.0,
                cy as f64 + 1.0,
                self.value(cx + 1, cy + 1),
            ),
            Edge::Bottom => (
                cx as f64,
                cy as f64 + 1.0,
                self.value(cx, cy + 1),
                cx as f64 + 1.0,
                cy as f64 + 1.0,
                self.value(cx + 1, cy + 1),
            ),
            Edge::Left => (
                cx as f64,
                cy as f64,
                self.value(cx, cy),
                cx as f64,
                cy as f64 + 1.0,
                self.value(cx, cy + 1),
            ),
        };

        if !v0.is_finite() && !v1.is_finite() {
            return ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        }
        // Exactly one corner unreached: (cutoff - v0) / (v1 - v0) is a
        // finite-over-infinite ratio, not the both-infinite NaN case above,
        // but the division still sends t to the limit of the finite corner
        // (t -> 1 as v0 -> inf, t -> 0 as v1 -> inf) rather than computing
        // cleanly, so take that limit directly.
        if !v0.is_finite() {
            return (x1, y1);
        }
        if !v1.is_finite() {
            return (x0, y0);
        }
        let t = ((cutoff - v0) / (v1 - v0)).clamp(0.0, 1.0);
        (x0 + t * (x1 - x0), y0 + t * (y1 - y0))
    }

    fn step(&self, cx: usize, cy: usize, exit: Edge) -> Option<(usize, usize, Edge)> {
        match exit {
            Edge::Top => {
                if cy == 0 {
                    None
                } else {
                    Some((cx, cy - 1, Edge::Bottom))
                }
            }
            Edge::Bottom => {
                if cy + 1 >= self.cells_y() {
                    None
                } else {
                    Some((cx, cy + 1, Edge::Top))
                }
            }
            Edge::Left => {
                if cx == 0 {
                    None
                } else {
                    Some((cx - 1, cy, Edge::Right))
                }
            }
            Edge::Right => {
                if cx + 1 >= self.cells_x() {
                    None
                } else {
                    Some((cx + 1, cy, Edge::Left))
                }
            }
        }
    }
}

/// The two (entry, exit) edge pairs present in a marching-squares case,
/// listed as undirected connections. Cases 5 and 10 carry two disjoint
/// pairs (the saddle ambiguity); every other non-trivial case carries one.
fn case_segments(case: u8) -> &'static [(Edge, Edge)] {
    use Edge::*;
    match case {
        1 | 14 => &[(Left, Bottom)],
        2 | 13 => &[(Bottom, Right)],
        3 | 12 => &[(Left, Right)],
        4 | 11 => &[(Top, Right)],
        6 | 9 => &[(Top, Bottom)],
        7 | 8 => &[(Top, Left)],
        5 => &[(Top, Left), (Right, Bottom)],
        10 => &[(Top, Right), (Left, Bottom)],
        _ => &[],
    }
}

/// Resolve the exit edge for a cell entered via `entry`, given its case —
/// for saddle cases this disambiguates by the direction of entry rather
/// than an average-corner-value heuristic.
fn exit_for_entry(case: u8, entry: Edge) -> Option<Edge> {
    for &(a, b) in case_segments(case) {
        if a == entry {
            return Some(b);
        }
        if b == entry {
            return Some(a);
        }
    }
    None
}

pub(crate) const MAX_RING_SIZE: usize = 25_000;
pub(crate) const MIN_RING_SIZE: usize = 12;

/// Trace every closed ring at `cutoff` in `raster`, returning rings as
/// sequences of `(lon_pixel, lat_pixel)`-space points in padded raster
/// vertex coordinates (the caller converts to WGS84 and offsets for
/// padding). Rings starting at a saddle cell are never initiated — saddle
/// crossings must be picked up by a ring that enters from a non-saddle
/// cell elsewhere.
pub(crate) fn trace_rings(raster: &PaddedRaster, cutoff: f64) -> Vec<Vec<Coord<f64>>> {
    let mut visited: HashSet<(usize, usize, Edge)> = HashSet::new();
    let mut rings = Vec::new();

    for start_cy in 0..raster.cells_y() {
        for start_cx in 0..raster.cells_x() {
            let start_case = raster.case(start_cx, start_cy, cutoff);
            if start_case == 0 || start_case == 15 || start_case == 5 || start_case == 10 {
                continue;
            }

            for &(entry, _) in case_segments(start_case) {
                if visited.contains(&(start_cx, start_cy, entry)) {
                    continue;
                }

                if let Some(ring) = walk_ring(raster, cutoff, start_cx, start_cy, entry, &mut visited) {
                    rings.push(ring);
                }
            }
        }
    }

    rings
}

fn walk_ring(
    raster: &PaddedRaster,
    cutoff: f64,
    start_cx: usize,
    start_cy: usize,
    start_entry: Edge,
    visited: &mut HashSet<(usize, usize, Edge)>,
) -> Option<Vec<Coord<f64>>> {
    let mut points = Vec::new();
    let (mut cx, mut cy, mut entry) = (start_cx, start_cy, start_entry);

    loop {
        if points.len() > MAX_RING_SIZE {
            tracing::warn!(cx, cy, "ring exceeds MAX_RING_SIZE, truncating");
            break;
        }

        let case = raster.case(cx, cy, cutoff);
        let Some(exit) = exit_for_entry(case, entry) else {
            tracing::warn!(cx, cy, ?entry, "ring entered from unexpected direction, terminating");
            return None;
        };

        if visited.contains(&(cx, cy, entry)) {
            tracing::warn!(cx, cy, ?entry, "ring revisited a crossing before closing, terminating");
            return None;
        }
        visited.insert((cx, cy, entry));
        visited.insert((cx, cy, exit));

        let (px, py) = raster.interpolate(cx, cy, exit, cutoff);
        points.push(Coord { x: px, y: py });

        match raster.step(cx, cy, exit) {
            Some((next_cx, next_cy, next_entry)) => {
                if (next_cx, next_cy, next_entry) == (start_cx, start_cy, start_entry) {
                    break;
                }
                cx = next_cx;
                cy = next_cy;
                entry = next_entry;
            }
            None => {
                tracing::warn!("ring walked off the padded raster; this indicates the padding border was not all-infinite");
                return None;
            }
        }
    }

    if let Some(&first) = points.first() {
        points.push(first);
    }

    if points.len() < MIN_RING_SIZE {
        return None;
    }

    Some(points)
}
