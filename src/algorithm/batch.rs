use log::debug;
use rayon::prelude::*;

use crate::algorithm::ShortestPathAlgorithm;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Answers independent `(source, destination)` queries in parallel.
///
/// Every query runs its own search with its own table and frontier; the only
/// shared state is the read-only graph. Results come back in query order.
pub fn shortest_paths_parallel<W, G, A>(
    algorithm: &A,
    graph: &G,
    queries: &[(G::Node, G::Node)],
) -> Vec<Result<Vec<G::Node>>>
where
    W: Weight + Send + Sync,
    G: Graph<W> + Sync,
    G::Node: Send + Sync,
    A: ShortestPathAlgorithm<W, G> + Sync,
{
    debug!(
        "Running {} {} queries on {} threads",
        queries.len(),
        algorithm.name(),
        rayon::current_num_threads()
    );

    queries
        .par_iter()
        .map(|&(source, destination)| algorithm.shortest_path(graph, source, destination))
        .collect()
}
