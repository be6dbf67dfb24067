use std::sync::RwLock;

use crate::graph::{Edge, Graph, Weight};
use crate::{Error, Result};

/// Returns the sum of the edge weights along `path`.
///
/// A single-node path has sum zero. Between consecutive nodes the lightest
/// joining edge is used, which is the one any shortest path would take.
///
/// # Errors
///
/// [`Error::EmptyPath`] for an empty slice, [`Error::NotAWalk`] if two
/// consecutive nodes are not joined by an edge, and [`Error::DistanceOverflow`]
/// if the total does not fit in `W`.
pub fn path_sum<W, G>(graph: &G, path: &[G::Node]) -> Result<W>
where
    W: Weight,
    G: Graph<W>,
{
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let mut sum = W::zero();
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let edge = graph.edge_between(from, to).ok_or_else(|| {
            Error::NotAWalk(format!("{:?}", from), format!("{:?}", to))
        })?;
        sum = sum.checked_add(edge.weight()).ok_or_else(|| {
            Error::DistanceOverflow(format!("{:?}", from), format!("{:?}", to))
        })?;
    }
    Ok(sum)
}

/// [`path_sum`] over a path other threads may be writing to.
///
/// The read guard is held for the whole summation, so writers wait until
/// the total has been computed from a stable sequence.
pub fn path_sum_shared<W, G>(graph: &G, path: &RwLock<Vec<G::Node>>) -> Result<W>
where
    W: Weight,
    G: Graph<W>,
{
    let guard = path.read().map_err(|_| Error::LockPoisoned)?;
    path_sum(graph, &guard)
}
