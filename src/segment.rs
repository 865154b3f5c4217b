use geo::{
    kernels::{HasKernel, Kernel, Orientation},
    Coordinate, GeoFloat, Line,
};

use crate::mask::EdgeMask;

/// Tolerance band for the parametric crossing test.
///
/// A crossing is only reported when both intersection parameters lie
/// in the open interval `(EPS, 1 - EPS)`. This keeps shared endpoints
/// and near-endpoint numerical noise from registering as crossings:
/// two edges meeting at a common vertex must never count as crossing
/// there.
pub const CROSSING_EPS: f64 = 1e-7;

/// Orientation of `c` relative to the directed segment from `b` to `a`.
///
/// This is the sign of the 2-D cross product of `(a - b)` and
/// `(c - b)`, evaluated with the robust predicate kernel.
/// `Collinear` is treated as "not crossing" by all callers.
#[inline]
pub fn orientation<T: GeoFloat>(
    a: Coordinate<T>,
    b: Coordinate<T>,
    c: Coordinate<T>,
) -> Orientation {
    // orient2d(p, q, r) is the sign of (q - p) x (r - p).
    <T as HasKernel>::Ker::orient2d(b, a, c)
}

#[inline]
fn cross<T: GeoFloat>(a: Coordinate<T>, b: Coordinate<T>) -> T {
    a.x * b.y - a.y * b.x
}

/// Checks whether two open segments cross at a point strictly
/// interior to both.
///
/// The segments are parametrized as `p.start + t * Δp` and
/// `q.start + u * Δq`; a crossing is reported iff the unique solution
/// has both `t` and `u` inside `(CROSSING_EPS, 1 - CROSSING_EPS)`.
/// Parallel and collinear pairs (zero cross product of the deltas)
/// never cross, regardless of overlap; neither do segments touching
/// only at or near an endpoint.
///
/// This is the hot primitive of the crate; see
/// [`crosses_interior_oracle`] for the slower reference predicate
/// used to validate it.
#[inline]
pub fn crosses_interior<T: GeoFloat>(p: &Line<T>, q: &Line<T>) -> bool {
    let dp = p.end - p.start;
    let dq = q.end - q.start;
    let mag = cross(dp, dq);
    if mag == T::zero() {
        return false;
    }
    let l = q.start - p.start;
    let t = cross(l, dq) / mag;
    let u = cross(l, dp) / mag;

    let eps = T::from(CROSSING_EPS).unwrap();
    let hi = T::one() - eps;
    t > eps && t < hi && u > eps && u < hi
}

/// Scans `target` against every segment in `lines`, setting bit `i`
/// of the returned mask iff `lines[i]` crosses `target` interiorly.
///
/// `skip` is the index of `target` itself within `lines`; an edge
/// never crosses itself. Plain indexed loop over a dense slice, so
/// the compiler is free to vectorize the arithmetic.
pub fn crossings_with<T: GeoFloat>(target: &Line<T>, lines: &[Line<T>], skip: usize) -> EdgeMask {
    let mut mask = EdgeMask::new(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i != skip && crosses_interior(target, line) {
            mask.set(i);
        }
    }
    mask
}

/// Orientation-based interior-crossing predicate (reference only).
///
/// Four robust orientation tests, no division: the segments cross
/// interiorly iff each segment's endpoints lie strictly on opposite
/// sides of the other's supporting line. Collinear cases (including
/// an endpoint lying exactly on the other segment) report `false`,
/// matching [`crosses_interior`].
///
/// Slower than the parametric test and kept off the hot path; tests
/// use it as a correctness oracle.
pub fn crosses_interior_oracle<T: GeoFloat>(p: &Line<T>, q: &Line<T>) -> bool {
    let o1 = <T as HasKernel>::Ker::orient2d(p.start, p.end, q.start);
    let o2 = <T as HasKernel>::Ker::orient2d(p.start, p.end, q.end);
    if o1 == Orientation::Collinear || o2 == Orientation::Collinear || o1 == o2 {
        return false;
    }
    let o3 = <T as HasKernel>::Ker::orient2d(q.start, q.end, p.start);
    let o4 = <T as HasKernel>::Ker::orient2d(q.start, q.end, p.end);
    o3 != Orientation::Collinear && o4 != Orientation::Collinear && o3 != o4
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use geo::{Coordinate, Line, Rect};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::random::uniform_line;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line<f64> {
        Line::new(
            Coordinate { x: x1, y: y1 },
            Coordinate { x: x2, y: y2 },
        )
    }

    #[test]
    fn orientation_signs() {
        let a = Coordinate { x: 1., y: 0. };
        let b = Coordinate { x: 0., y: 0. };
        let c = Coordinate { x: 0., y: 1. };
        assert_eq!(orientation(a, b, c), Orientation::CounterClockwise);
        assert_eq!(orientation(c, b, a), Orientation::Clockwise);
        let d = Coordinate { x: 2., y: 0. };
        assert_eq!(orientation(a, b, d), Orientation::Collinear);
    }

    #[test]
    fn plain_crossing() {
        let p = line(0., 0., 1., 1.);
        let q = line(1., 0., 0., 1.);
        assert!(crosses_interior(&p, &q));
        assert!(crosses_interior(&q, &p));
    }

    #[test]
    fn parallel_and_collinear_never_cross() {
        let p = line(0., 0., 1., 0.);
        assert!(!crosses_interior(&p, &line(0., 1., 1., 1.)));
        // Collinear with interior overlap is still not a crossing.
        assert!(!crosses_interior(&p, &line(0.5, 0., 2., 0.)));
        assert!(!crosses_interior(&p, &p));
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        let p = line(0., 0., 1., 1.);
        let q = line(0., 0., 1., -1.);
        assert!(!crosses_interior(&p, &q));
        // Touching at the far endpoint either.
        let r = line(1., 1., 2., 0.);
        assert!(!crosses_interior(&p, &r));
    }

    #[test]
    fn endpoint_on_interior_is_not_a_crossing() {
        let p = line(0., 0., 2., 0.);
        let q = line(1., 0., 1., 1.);
        assert!(!crosses_interior(&p, &q));
        assert!(!crosses_interior_oracle(&p, &q));
    }

    #[test]
    fn pencil_through_common_point_all_cross() {
        // Segments through (0.5, 0.5) at distinct angles, extending
        // past the point on both sides: every pair crosses there.
        let center = Coordinate { x: 0.5, y: 0.5 };
        let lines: Vec<_> = (0..8)
            .map(|k| {
                let angle = (k as f64 + 0.3) * PI / 8.;
                let dir = Coordinate {
                    x: angle.cos(),
                    y: angle.sin(),
                };
                Line::new(center - dir, center + dir)
            })
            .collect();
        for (i, p) in lines.iter().enumerate() {
            for (j, q) in lines.iter().enumerate() {
                if i != j {
                    assert!(crosses_interior(p, q), "pencil pair ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn radial_spokes_never_cross() {
        // Spokes share only the hub endpoint.
        let hub = Coordinate { x: 0., y: 0. };
        let spokes: Vec<_> = (0..12)
            .map(|k| {
                let angle = k as f64 * PI / 6.;
                let tip = Coordinate {
                    x: angle.cos(),
                    y: angle.sin(),
                };
                Line::new(hub, tip)
            })
            .collect();
        for (i, p) in spokes.iter().enumerate() {
            for (j, q) in spokes.iter().enumerate() {
                if i != j {
                    assert!(!crosses_interior(p, q), "spoke pair ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn batch_scan_matches_pairwise() {
        let lines = vec![
            line(0., 0., 1., 1.),
            line(1., 0., 0., 1.),
            line(0., 2., 1., 2.),
            line(0.2, 1., 0.8, 0.),
        ];
        for e in 0..lines.len() {
            let mask = crossings_with(&lines[e], &lines, e);
            for f in 0..lines.len() {
                let expect = f != e && crosses_interior(&lines[e], &lines[f]);
                assert_eq!(mask.get(f), expect, "pair ({}, {})", e, f);
            }
        }
    }

    #[test]
    fn agrees_with_oracle_on_random_lines() {
        let bbox: Rect<f64> = Rect::new([0., 0.], [100., 100.]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let p = uniform_line(&mut rng, bbox);
            let q = uniform_line(&mut rng, bbox);
            assert_eq!(
                crosses_interior(&p, &q),
                crosses_interior_oracle(&p, &q),
                "disagreement on {:?} vs {:?}",
                p,
                q
            );
        }
    }
}
