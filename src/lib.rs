//! Frontier Path - label-setting shortest paths on weighted undirected graphs
//!
//! The core is a Dijkstra-style search that keeps a table of distance records
//! for every discovered node and an indexed binary heap (the priority frontier)
//! of the nodes that are discovered but not yet settled. The graph itself is an
//! external collaborator: anything implementing [`graph::Graph`] can be searched.
//!
//! Edge weights must be non-negative. The engine does not validate this; a
//! graph with negative weights produces unspecified (not merely suboptimal)
//! results. [`UndirectedGraph`] rejects negative weights at insertion time.
//!
//! ```
//! use frontier_path::{Dijkstra, ShortestPathAlgorithm, UndirectedGraph};
//! use frontier_path::graph::MutableGraph;
//!
//! let mut graph: UndirectedGraph<u32> = UndirectedGraph::with_capacity(4);
//! graph.add_edge(0, 1, 1).unwrap();
//! graph.add_edge(1, 3, 5).unwrap();
//! graph.add_edge(0, 2, 2).unwrap();
//! graph.add_edge(2, 3, 2).unwrap();
//!
//! let dijkstra = Dijkstra::new();
//! let path = dijkstra.shortest_path(&graph, 0, 3).unwrap();
//! assert_eq!(path, vec![0, 2, 3]);
//! assert_eq!(dijkstra.path_sum(&graph, &path).unwrap(), 4);
//! ```

pub mod algorithm;
pub mod data_structures;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;
pub mod web;

pub use algorithm::{
    batch::shortest_paths_parallel,
    dijkstra::{Dijkstra, DijkstraSearch},
    path::{path_sum, path_sum_shared},
    ShortestPathAlgorithm,
};
pub use data_structures::PriorityFrontier;
/// Re-export main types for convenient use
pub use graph::undirected::UndirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(String),

    #[error("Edge weight must be finite: {0}")]
    NonFiniteWeight(String),

    #[error("Path length overflows the weight type at edge {0} - {1}")]
    DistanceOverflow(String, String),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Destination vertex not found in graph")]
    DestinationNotFound,

    #[error("Node {0} is already in the frontier")]
    DuplicateFrontierEntry(String),

    #[error("Cannot sum the weights of an empty path")]
    EmptyPath,

    #[error("Path is not a walk: no edge between {0} and {1}")]
    NotAWalk(String, String),

    #[error("Path lock poisoned by a panicked writer")]
    LockPoisoned,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
