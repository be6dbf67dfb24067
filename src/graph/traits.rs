use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{CheckedAdd, Zero};
use ordered_float::OrderedFloat;

use crate::Result;

/// Numeric edge weight.
///
/// Implemented for the primitive integers, `f32`/`f64` and their
/// `OrderedFloat` wrappers. Weights are assumed non-negative.
pub trait Weight: Copy + Debug + PartialOrd + Zero {
    /// Adds two weights, returning `None` if the sum cannot be represented.
    ///
    /// For floats that means two finite operands summing to infinity.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &rhs)
                }
            }
        )*
    };
}

macro_rules! float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    let sum = self + rhs;
                    if sum.is_infinite() && self.is_finite() && rhs.is_finite() {
                        None
                    } else {
                        Some(sum)
                    }
                }
            }
        )*
    };
}

integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
float_weight!(f32, f64, OrderedFloat<f32>, OrderedFloat<f64>);

/// An undirected, weighted connection between two nodes
pub trait Edge<N, W>
where
    N: Copy + Eq,
    W: Weight,
{
    /// Returns both endpoints of the edge
    fn endpoints(&self) -> (N, N);

    /// Returns the length of the edge
    fn weight(&self) -> W;

    /// Given one endpoint, returns the other one.
    ///
    /// Returns `None` if `node` is not an endpoint. A self-loop returns `node`.
    fn other(&self, node: N) -> Option<N> {
        let (a, b) = self.endpoints();
        if a == node {
            Some(b)
        } else if b == node {
            Some(a)
        } else {
            None
        }
    }
}

/// Trait representing a weighted undirected graph as seen by the search.
///
/// Nodes are identified by a cheap, stable key; the search never takes
/// ownership of anything the graph owns.
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Stable identity of a node
    type Node: Copy + Eq + Hash + Debug;

    /// Edge handle yielded by [`Graph::incident_edges`]
    type Edge: Edge<Self::Node, W>;

    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: Self::Node) -> bool;

    /// Returns an iterator over the edges touching `node`, in a fixed order
    fn incident_edges(&self, node: Self::Node) -> Box<dyn Iterator<Item = Self::Edge> + '_>;

    /// Returns the lightest edge joining `a` and `b`, if any
    fn edge_between(&self, a: Self::Node, b: Self::Node) -> Option<Self::Edge> {
        let mut best: Option<Self::Edge> = None;
        for edge in self.incident_edges(a) {
            if edge.other(a) != Some(b) {
                continue;
            }
            let lighter = match &best {
                Some(current) => edge.weight() < current.weight(),
                None => true,
            };
            if lighter {
                best = Some(edge);
            }
        }
        best
    }

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, a: Self::Node, b: Self::Node) -> bool {
        self.incident_edges(a).any(|edge| edge.other(a) == Some(b))
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Weight,
{
    /// Adds a node to the graph and returns its ID
    fn add_node(&mut self) -> Self::Node;

    /// Adds an undirected edge between two nodes with the given weight
    fn add_edge(&mut self, a: Self::Node, b: Self::Node, weight: W) -> Result<()>;

    /// Removes every edge joining `a` and `b`
    fn remove_edge(&mut self, a: Self::Node, b: Self::Node) -> bool;

    /// Updates the weight of every edge joining `a` and `b`
    fn update_edge_weight(&mut self, a: Self::Node, b: Self::Node, weight: W) -> bool;
}
