//! Shell/hole classification via signed-area winding, and hole-to-shell
//! assignment by point-in-polygon containment.

use geo_types::Coord;

/// Signed area using `Σ (x_{i+1} - x_i) * (y_{i+1} + y_i)`.
/// Positive is the shell winding in this raster's y-flipped (south-down)
/// coordinate convention.
pub(crate) fn signed_area(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum
}

pub(crate) fn is_shell(ring: &[Coord<f64>]) -> bool {
    signed_area(ring) > 0.0
}

/// Even-odd ray-casting point-in-polygon test against a ring's vertices.
pub(crate) fn contains_point(ring: &[Coord<f64>], point: Coord<f64>) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_intersect = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_intersect {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Assign each hole ring to the smallest shell ring that contains it.
/// Shells are checked largest-first (by absolute area) to reduce the
/// expected number of containment tests. Holes with no containing shell
/// are dropped with a warning.
pub(crate) fn assign_holes_to_shells(
    mut shells: Vec<Vec<Coord<f64>>>,
    holes: Vec<Vec<Coord<f64>>>,
) -> Vec<(Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>)> {
    shells.sort_by(|a, b| {
        signed_area(b)
            .abs()
            .partial_cmp(&signed_area(a).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut assigned: Vec<Vec<Vec<Coord<f64>>>> = vec![Vec::new(); shells.len()];

    for hole in holes {
        let Some(sample) = hole.first().copied() else {
            continue;
        };
        // Holes are nested in their immediate containing shell, not
        // necessarily the globally largest one, so check smallest-to-largest
        // among the shells that actually contain the sample point and keep
        // the tightest fit.
        let mut best: Option<usize> = None;
        for (i, shell) in shells.iter().enumerate() {
            if contains_point(shell, sample) {
                let better = match best {
                    None => true,
                    Some(b) => signed_area(shell).abs() < signed_area(&shells[b]).abs(),
                };
                if better {
                    best = Some(i);
                }
            }
        }

        match best {
            Some(i) => assigned[i].push(hole),
            None => {
                tracing::warn!("isochrone hole ring has no containing shell, dropping");
            }
        }
    }

    shells.into_iter().zip(assigned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Vec<Coord<f64>> {
        vec![
            Coord { x: min, y: min },
            Coord { x: min, y: max },
            Coord { x: max, y: max },
            Coord { x: max, y: min },
        ]
    }

    #[test]
    fn point_in_polygon_basic() {
        let square = square(0.0, 10.0);
        assert!(contains_point(&square, Coord { x: 5.0, y: 5.0 }));
        assert!(!contains_point(&square, Coord { x: 15.0, y: 5.0 }));
    }

    #[test]
    fn assigns_hole_to_containing_shell() {
        let shell = square(0.0, 10.0);
        let hole = square(3.0, 6.0);
        let result = assign_holes_to_shells(vec![shell.clone()], vec![hole.clone()]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].1.len(), 1);
    }

    #[test]
    fn unassignable_hole_is_dropped() {
        let shell = square(0.0, 10.0);
        let hole = square(20.0, 25.0);
        let result = assign_holes_to_shells(vec![shell], vec![hole]);
        assert_eq!(result[0].1.len(), 0);
    }
}
