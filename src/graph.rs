use geo::{Coordinate, GeoFloat, Line};
use itertools::Itertools;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    error::GraphError,
    mask::EdgeMask,
    segment::{crosses_interior, crossings_with},
};

/// Incident-edge list of a vertex. Puzzle graphs are sparse; most
/// vertices have a handful of edges.
type IncidenceList = SmallVec<[usize; 4]>;

/// A graph embedded in the plane with incrementally tracked edge
/// crossings.
///
/// The combinatorial structure (edge list, adjacency) is fixed at
/// construction; only vertex positions change, one vertex at a time,
/// via [`update_vertex_pos`](PlanarGraph::update_vertex_pos).
/// Construction pays a full O(E²) pairwise scan once; each move then
/// costs O(degree(v) · E) by recomputing only the segments whose
/// geometry changed and propagating count deltas to their crossing
/// partners.
///
/// Invariants upheld after every public call returns:
///
/// - `segment(e)` equals the segment spanned by the current endpoint
///   positions of `e`;
/// - `tangle_counts()[e]` equals the number of other edges crossing
///   `e`'s interior;
/// - `vertex_tangle_counts()[v]` equals the sum of `tangle_counts()`
///   over the edges incident to `v`;
/// - every cached crossing mask is either evicted or exactly correct.
#[derive(Debug, Clone)]
pub struct PlanarGraph<T: GeoFloat> {
    positions: Vec<Coordinate<T>>,
    edges: Vec<(usize, usize)>,
    incident: Vec<IncidenceList>,
    lines: Vec<Line<T>>,
    masks: Vec<Option<EdgeMask>>,
    edge_crossings: Vec<u32>,
    vertex_crossings: Vec<u32>,
}

impl<T: GeoFloat> PlanarGraph<T> {
    /// Builds the graph and computes all pairwise crossings.
    ///
    /// Validates the input before building any state: every
    /// coordinate must be finite, every edge must reference valid
    /// vertex indices, and self-loops are rejected.
    pub fn new(
        positions: Vec<Coordinate<T>>,
        edges: Vec<(usize, usize)>,
    ) -> Result<Self, GraphError> {
        let n_vertices = positions.len();
        let n_edges = edges.len();

        for (v, pos) in positions.iter().enumerate() {
            if !pos.x.is_finite() || !pos.y.is_finite() {
                return Err(GraphError::NonFiniteCoordinate { vertex: v });
            }
        }
        for (e, &(u, v)) in edges.iter().enumerate() {
            for &end in &[u, v] {
                if end >= n_vertices {
                    return Err(GraphError::EdgeEndpointOutOfBounds {
                        edge: e,
                        vertex: end,
                        n_vertices,
                    });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop { edge: e, vertex: u });
            }
        }

        let mut incident = vec![IncidenceList::new(); n_vertices];
        for (e, &(u, v)) in edges.iter().enumerate() {
            incident[u].push(e);
            incident[v].push(e);
        }

        let lines: Vec<_> = edges
            .iter()
            .map(|&(u, v)| Line::new(positions[u], positions[v]))
            .collect();

        // One symmetric pass over all pairs; this is the only place
        // the full quadratic cost is paid.
        let mut masks: Vec<_> = (0..n_edges).map(|_| EdgeMask::new(n_edges)).collect();
        for (i, j) in (0..n_edges).tuple_combinations() {
            if crosses_interior(&lines[i], &lines[j]) {
                masks[i].set(j);
                masks[j].set(i);
            }
        }

        let edge_crossings: Vec<u32> = masks.iter().map(|m| m.count_ones() as u32).collect();
        let vertex_crossings = (0..n_vertices)
            .map(|v| incident[v].iter().map(|&e| edge_crossings[e]).sum())
            .collect();

        debug!(
            "built graph: {} vertices, {} edges, {} crossing pairs",
            n_vertices,
            n_edges,
            edge_crossings.iter().sum::<u32>() / 2
        );

        Ok(PlanarGraph {
            positions,
            edges,
            incident,
            lines,
            masks: masks.into_iter().map(Some).collect(),
            edge_crossings,
            vertex_crossings,
        })
    }

    /// Moves vertex `v` to `new_pos` and repairs all crossing state.
    ///
    /// Only the edges incident to `v` change geometry; their masks
    /// are recomputed against every edge, and each flipped crossing
    /// relationship adjusts the partner edge's count and evicts its
    /// stale cached mask. Cost is O(degree(v) · E).
    ///
    /// Validation happens before the first write, so a returned error
    /// leaves the graph exactly as it was.
    pub fn update_vertex_pos(&mut self, v: usize, new_pos: Coordinate<T>) -> Result<(), GraphError> {
        if v >= self.positions.len() {
            return Err(GraphError::VertexOutOfBounds {
                vertex: v,
                n_vertices: self.positions.len(),
            });
        }
        if !new_pos.x.is_finite() || !new_pos.y.is_finite() {
            return Err(GraphError::NonFiniteCoordinate { vertex: v });
        }

        let incident: IncidenceList = self.incident[v].clone();

        // Pre-move masks of the incident edges, from cache or fresh.
        let mut pre = Vec::with_capacity(incident.len());
        for &e in &incident {
            pre.push(self.mask(e).clone());
        }

        self.positions[v] = new_pos;
        for &e in &incident {
            let (a, b) = self.edges[e];
            self.lines[e] = Line::new(self.positions[a], self.positions[b]);
        }

        // Vertices whose aggregate count must be rebuilt at the end.
        let mut touched: SmallVec<[usize; 16]> = SmallVec::new();
        for &e in &incident {
            let (a, b) = self.edges[e];
            touched.push(a);
            touched.push(b);
        }

        for (k, &e) in incident.iter().enumerate() {
            let post = crossings_with(&self.lines[e], &self.lines, e);
            self.edge_crossings[e] = post.count_ones() as u32;

            for e2 in pre[k].flipped(&post) {
                // Edges incident to the moved vertex share it with
                // `e`, so they cannot cross `e` interiorly; any flip
                // the epsilon band produces between them is noise.
                // They already carry fresh masks and counts, so they
                // are excluded from propagation entirely.
                if incident.contains(&e2) {
                    continue;
                }
                if post.get(e2) {
                    self.edge_crossings[e2] += 1;
                    trace!("edge {} gained crossing with {}", e2, e);
                } else {
                    assert!(
                        self.edge_crossings[e2] > 0,
                        "crossing count underflow on edge {}: cache is inconsistent",
                        e2
                    );
                    self.edge_crossings[e2] -= 1;
                    trace!("edge {} lost crossing with {}", e2, e);
                }
                // Its cached relationship to `e` is stale.
                self.masks[e2] = None;
                let (a, b) = self.edges[e2];
                touched.push(a);
                touched.push(b);
            }

            self.masks[e] = Some(post);
        }

        touched.sort_unstable();
        touched.dedup();
        for &u in &touched {
            self.vertex_crossings[u] = self.incident[u].iter().map(|&e| self.edge_crossings[e]).sum();
        }

        debug!(
            "moved vertex {}: {} incident edges, {} vertices re-aggregated",
            v,
            incident.len(),
            touched.len()
        );
        Ok(())
    }

    /// Cached crossing mask of edge `e`, recomputing it if evicted.
    fn mask(&mut self, e: usize) -> &EdgeMask {
        if self.masks[e].is_none() {
            trace!("recomputing evicted mask of edge {}", e);
            self.masks[e] = Some(crossings_with(&self.lines[e], &self.lines, e));
        }
        self.masks[e].as_ref().unwrap()
    }

    /// `true` iff no edge incident to `v` has a crossing.
    #[inline]
    pub fn is_vertex_free(&self, v: usize) -> bool {
        self.vertex_crossings[v] == 0
    }

    /// `true` iff edge `e` crosses no other edge.
    #[inline]
    pub fn is_edge_untangled(&self, e: usize) -> bool {
        self.edge_crossings[e] == 0
    }

    /// `true` iff the current embedding has no crossings at all.
    pub fn is_planar(&self) -> bool {
        self.edge_crossings.iter().all(|&c| c == 0)
    }

    /// Per-edge crossing counts.
    #[inline]
    pub fn tangle_counts(&self) -> &[u32] {
        &self.edge_crossings
    }

    /// Per-vertex aggregate crossing counts.
    #[inline]
    pub fn vertex_tangle_counts(&self) -> &[u32] {
        &self.vertex_crossings
    }

    /// The vertices connected to `v` by an edge, one per incident
    /// edge (a vertex reachable by parallel edges appears repeatedly).
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.incident[v].iter().map(move |&e| {
            let (a, b) = self.edges[e];
            if a == v {
                b
            } else {
                a
            }
        })
    }

    /// Indices of the edges incident to `v`.
    #[inline]
    pub fn vertex_edges(&self, v: usize) -> &[usize] {
        &self.incident[v]
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn position(&self, v: usize) -> Coordinate<T> {
        self.positions[v]
    }

    #[inline]
    pub fn positions(&self) -> &[Coordinate<T>] {
        &self.positions
    }

    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Current geometry of edge `e`.
    #[inline]
    pub fn segment(&self, e: usize) -> Line<T> {
        self.lines[e]
    }

    /// Indices of the edges currently crossing edge `e`, in
    /// increasing order.
    ///
    /// Reads `e`'s crossing mask, recomputing it first if a previous
    /// move evicted it; hence `&mut self`. The list length always
    /// equals `tangle_counts()[e]`.
    pub fn crossing_partners(&mut self, e: usize) -> Vec<usize> {
        self.mask(e).ones().collect()
    }
}
