pub mod traits;
pub mod undirected;
pub mod generators;

pub use traits::{Edge, Graph, MutableGraph, Weight};
pub use undirected::{UndirectedEdge, UndirectedGraph};
