use crate::algorithm::path::path_sum;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Trait for point-to-point shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute a minimum-weight path from `source` to `destination`.
    ///
    /// The path runs from `source` to `destination` inclusive. An empty
    /// vector means `destination` is unreachable; callers must check for
    /// emptiness rather than assume the result contains `source`.
    fn shortest_path(
        &self,
        graph: &G,
        source: G::Node,
        destination: G::Node,
    ) -> Result<Vec<G::Node>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Sum the edge weights along `path`
    fn path_sum(&self, graph: &G, path: &[G::Node]) -> Result<W> {
        path_sum(graph, path)
    }
}
