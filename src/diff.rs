use geo::{Coordinate, GeoFloat};

use crate::{error::GraphError, graph::PlanarGraph};

/// Counter snapshot taken before a mutation, for classifying what a
/// move changed.
///
/// Take the snapshot, perform the move, then compare against the live
/// graph; every query is a pure comparison of the snapshotted and the
/// current counters, with no geometry work. The intended consumer is
/// UI feedback (flash edges that just became tangled, relax vertices
/// that just became free).
///
/// ```rust
/// use geo::Coordinate;
/// use graph_crossings::{PlanarGraph, TangleSnapshot};
///
/// # fn main() -> Result<(), graph_crossings::GraphError> {
/// let positions = vec![
///     Coordinate::from((0., 0.)),
///     Coordinate::from((1., 1.)),
///     Coordinate::from((1., 0.)),
///     Coordinate::from((0., 1.)),
/// ];
/// let mut graph = PlanarGraph::new(positions, vec![(0, 1), (1, 2), (2, 3), (3, 0)])?;
///
/// let snapshot = TangleSnapshot::of(&graph);
/// graph.update_vertex_pos(1, Coordinate::from((2., 0.)))?;
/// assert_eq!(snapshot.free_edges(&graph), vec![0, 2]);
/// assert!(snapshot.tangled_edges(&graph).is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TangleSnapshot {
    edge_crossings: Vec<u32>,
    vertex_crossings: Vec<u32>,
}

/// What a single tracked move changed, in terms of zero/nonzero
/// crossing-count transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Edges whose untangled status flipped either way.
    pub changed_edges: Vec<usize>,
    /// Edges that went from no crossings to at least one.
    pub tangled_edges: Vec<usize>,
    /// Edges that went from at least one crossing to none.
    pub free_edges: Vec<usize>,
    /// Vertices whose free status flipped either way.
    pub changed_vertices: Vec<usize>,
    /// Vertices that newly have a crossing incident edge.
    pub tangled_vertices: Vec<usize>,
    /// Vertices that newly have no crossing incident edge.
    pub free_vertices: Vec<usize>,
}

/// Indices that went zero → nonzero.
fn became_tangled(before: &[u32], after: &[u32]) -> Vec<usize> {
    before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (&b, &a))| b == 0 && a > 0)
        .map(|(i, _)| i)
        .collect()
}

/// Indices that went nonzero → zero.
fn became_free(before: &[u32], after: &[u32]) -> Vec<usize> {
    before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (&b, &a))| b > 0 && a == 0)
        .map(|(i, _)| i)
        .collect()
}

/// Indices whose zero/nonzero status differs.
fn status_changed(before: &[u32], after: &[u32]) -> Vec<usize> {
    before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (&b, &a))| (b == 0) != (a == 0))
        .map(|(i, _)| i)
        .collect()
}

impl TangleSnapshot {
    /// Snapshots the graph's current edge and vertex crossing counts.
    pub fn of<T: GeoFloat>(graph: &PlanarGraph<T>) -> Self {
        TangleSnapshot {
            edge_crossings: graph.tangle_counts().to_vec(),
            vertex_crossings: graph.vertex_tangle_counts().to_vec(),
        }
    }

    /// Edges whose zero/nonzero crossing status flipped either way.
    pub fn changed_edges<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        status_changed(&self.edge_crossings, graph.tangle_counts())
    }

    /// Edges that went from 0 crossings to more.
    pub fn tangled_edges<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        became_tangled(&self.edge_crossings, graph.tangle_counts())
    }

    /// Edges that went from crossing to crossing-free.
    pub fn free_edges<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        became_free(&self.edge_crossings, graph.tangle_counts())
    }

    /// Vertices whose free status flipped either way.
    pub fn changed_vertices<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        status_changed(&self.vertex_crossings, graph.vertex_tangle_counts())
    }

    /// Vertices that newly have a crossing incident edge.
    pub fn tangled_vertices<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        became_tangled(&self.vertex_crossings, graph.vertex_tangle_counts())
    }

    /// Vertices that newly became free of crossings.
    pub fn free_vertices<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> Vec<usize> {
        became_free(&self.vertex_crossings, graph.vertex_tangle_counts())
    }

    /// Bundles all six classifications against the live graph.
    pub fn report<T: GeoFloat>(&self, graph: &PlanarGraph<T>) -> MoveReport {
        MoveReport {
            changed_edges: self.changed_edges(graph),
            tangled_edges: self.tangled_edges(graph),
            free_edges: self.free_edges(graph),
            changed_vertices: self.changed_vertices(graph),
            tangled_vertices: self.tangled_vertices(graph),
            free_vertices: self.free_vertices(graph),
        }
    }
}

impl<T: GeoFloat> PlanarGraph<T> {
    /// Moves a vertex and reports which edges and vertices changed
    /// tangled status, in one call.
    ///
    /// Equivalent to wrapping [`update_vertex_pos`] between a
    /// [`TangleSnapshot`] and its [`report`]; this is the per-drag
    /// call shape a UI layer makes.
    ///
    /// [`update_vertex_pos`]: PlanarGraph::update_vertex_pos
    /// [`report`]: TangleSnapshot::report
    pub fn update_vertex_pos_tracked(
        &mut self,
        v: usize,
        new_pos: Coordinate<T>,
    ) -> Result<MoveReport, GraphError> {
        let snapshot = TangleSnapshot::of(self);
        self.update_vertex_pos(v, new_pos)?;
        Ok(snapshot.report(self))
    }
}
