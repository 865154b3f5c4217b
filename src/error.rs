use std::{error::Error, fmt};

/// Rejection of malformed caller input.
///
/// All variants are detected by validation before any state is
/// mutated; a failed constructor builds nothing and a failed
/// `update_vertex_pos` leaves the graph untouched. Internal
/// inconsistencies (e.g. a crossing-count underflow) are logic
/// defects, not input errors, and panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a vertex index outside `0..n_vertices`.
    EdgeEndpointOutOfBounds {
        edge: usize,
        vertex: usize,
        n_vertices: usize,
    },
    /// An edge connects a vertex to itself.
    SelfLoop { edge: usize, vertex: usize },
    /// A vertex index passed to a query or mutation is out of range.
    VertexOutOfBounds { vertex: usize, n_vertices: usize },
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate { vertex: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphError::EdgeEndpointOutOfBounds {
                edge,
                vertex,
                n_vertices,
            } => write!(
                f,
                "edge {} references vertex {} but the graph has {} vertices",
                edge, vertex, n_vertices
            ),
            GraphError::SelfLoop { edge, vertex } => {
                write!(f, "edge {} is a self-loop at vertex {}", edge, vertex)
            }
            GraphError::VertexOutOfBounds { vertex, n_vertices } => write!(
                f,
                "vertex index {} out of bounds for graph with {} vertices",
                vertex, n_vertices
            ),
            GraphError::NonFiniteCoordinate { vertex } => {
                write!(f, "vertex {} has a non-finite coordinate", vertex)
            }
        }
    }
}

impl Error for GraphError {}
