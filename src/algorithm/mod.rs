pub mod traits;
pub mod dijkstra;
pub mod path;
pub mod batch;

pub use traits::ShortestPathAlgorithm;
