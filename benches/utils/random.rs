use geo::{Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::Standard;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
#[allow(dead_code)]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

/// Input for a random embedded graph: a uniform vertex cloud plus
/// random distinct-endpoint edges.
pub struct RandomGraph {
    pub positions: Vec<Coordinate<f64>>,
    pub edges: Vec<(usize, usize)>,
}

pub fn uniform_graph<R: Rng>(
    rng: &mut R,
    bounds: Rect<f64>,
    n_vertices: usize,
    n_edges: usize,
) -> RandomGraph {
    assert!(n_vertices >= 2, "need at least two vertices for an edge");
    let positions = (0..n_vertices).map(|_| uniform_point(rng, bounds)).collect();
    let edges = (0..n_edges)
        .map(|_| loop {
            let u = rng.gen_range(0..n_vertices);
            let v = rng.gen_range(0..n_vertices);
            if u != v {
                break (u, v);
            }
        })
        .collect();
    RandomGraph { positions, edges }
}
