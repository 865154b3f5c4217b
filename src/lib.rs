//! Incremental crossing tracking for graphs embedded in the plane.
//!
//! Supports untangle-style puzzles: a graph has fixed vertices and
//! edges, the player drags one vertex at a time, and after every drag
//! the UI needs to know which edges cross and which vertices touch a
//! crossing edge. Recomputing all pairwise segment intersections per
//! drag is O(E²); [`PlanarGraph`] pays that cost once at construction
//! and then repairs its crossing counters in O(degree(v) · E) per
//! move by recomputing only the segments whose geometry changed.
//!
//! # Usage
//!
//! Construct a [`PlanarGraph`] from vertex coordinates and an edge
//! list, then move vertices with
//! [`update_vertex_pos`](PlanarGraph::update_vertex_pos):
//!
//! ```rust
//! use geo::Coordinate;
//! use graph_crossings::PlanarGraph;
//!
//! # fn main() -> Result<(), graph_crossings::GraphError> {
//! // A 4-cycle visiting the unit square corners in "bowtie" order:
//! // the two diagonals cross.
//! let positions = vec![
//!     Coordinate::from((0., 0.)),
//!     Coordinate::from((1., 1.)),
//!     Coordinate::from((1., 0.)),
//!     Coordinate::from((0., 1.)),
//! ];
//! let edges = vec![(0, 1), (1, 2), (2, 3), (3, 0)];
//! let mut graph = PlanarGraph::new(positions, edges)?;
//! assert!(!graph.is_planar());
//! assert_eq!(graph.tangle_counts(), &[1, 0, 1, 0]);
//!
//! // Drag the tangled corner out of the way.
//! graph.update_vertex_pos(1, Coordinate::from((2., 0.)))?;
//! assert!(graph.is_planar());
//! # Ok(())
//! # }
//! ```
//!
//! For UI feedback on what a drag changed (edges to flash, vertices
//! to relax), wrap the move with a [`TangleSnapshot`] or call
//! [`update_vertex_pos_tracked`](PlanarGraph::update_vertex_pos_tracked).
//!
//! Crossing means a single intersection point strictly interior to
//! both segments: edges sharing a vertex, parallel overlaps, and
//! endpoint touches never count. See [`segment`] for the exact
//! numerical contract.
mod error;
pub use error::GraphError;

mod mask;
pub use mask::EdgeMask;

pub mod segment;
pub use segment::{crosses_interior, crossings_with, orientation};

mod graph;
pub use graph::PlanarGraph;

mod diff;
pub use diff::{MoveReport, TangleSnapshot};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
