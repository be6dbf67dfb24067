use ordered_float::OrderedFloat;

use crate::graph::traits::{Edge, Graph, MutableGraph, Weight};
use crate::{Error, Result};

/// An undirected edge as stored in the adjacency lists
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndirectedEdge<W> {
    pub a: usize,
    pub b: usize,
    pub weight: W,
}

impl<W> UndirectedEdge<W> {
    pub fn new(a: usize, b: usize, weight: W) -> Self {
        UndirectedEdge { a, b, weight }
    }

    fn joins(&self, x: usize, y: usize) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

impl<W: Weight> Edge<usize, W> for UndirectedEdge<W> {
    fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    fn weight(&self) -> W {
        self.weight
    }
}

/// An undirected graph implementation using adjacency lists.
///
/// Every edge is stored in the list of both endpoints (once for a self-loop),
/// so enumerating the incident edges of a node is a slice walk.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<W> {
    /// Incident edges for each node, indexed by node ID
    adjacency: Vec<Vec<UndirectedEdge<W>>>,

    /// Number of distinct edges (not adjacency entries)
    edge_count: usize,
}

impl<W: Weight> Default for UndirectedGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> UndirectedGraph<W> {
    /// Creates a new empty undirected graph
    pub fn new() -> Self {
        UndirectedGraph {
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a new undirected graph with the specified number of nodes
    pub fn with_capacity(nodes: usize) -> Self {
        UndirectedGraph {
            adjacency: vec![Vec::new(); nodes],
            edge_count: 0,
        }
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.adjacency
            .iter()
            .flatten()
            .all(|edge| edge.weight >= W::zero())
    }

    /// Returns the neighbours of `node` with the weight of the connecting edge
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(move |edge| edge.other(node).map(|other| (other, edge.weight)))
    }

    /// Returns every edge exactly once, in insertion order per lower endpoint
    pub fn edges(&self) -> impl Iterator<Item = UndirectedEdge<W>> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(node, edges)| {
            edges
                .iter()
                .filter(move |edge| edge.a.min(edge.b) == node)
                .copied()
        })
    }
}

impl UndirectedGraph<OrderedFloat<f64>> {
    /// Adds an edge from a raw `f64` weight, rejecting NaN and infinities
    pub fn add_finite_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight(weight.to_string()));
        }
        self.add_edge(a, b, OrderedFloat(weight))
    }
}

impl<W: Weight> Graph<W> for UndirectedGraph<W> {
    type Node = usize;
    type Edge = UndirectedEdge<W>;

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn has_node(&self, node: usize) -> bool {
        node < self.adjacency.len()
    }

    fn incident_edges(&self, node: usize) -> Box<dyn Iterator<Item = UndirectedEdge<W>> + '_> {
        match self.adjacency.get(node) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<W: Weight> MutableGraph<W> for UndirectedGraph<W> {
    fn add_node(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn add_edge(&mut self, a: usize, b: usize, weight: W) -> Result<()> {
        if !self.has_node(a) || !self.has_node(b) {
            return Err(Error::InvalidEdge(a, b));
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight(format!("{:?}", weight)));
        }

        let edge = UndirectedEdge::new(a, b, weight);
        self.adjacency[a].push(edge);
        if a != b {
            self.adjacency[b].push(edge);
        }
        self.edge_count += 1;
        Ok(())
    }

    fn remove_edge(&mut self, a: usize, b: usize) -> bool {
        if !self.has_node(a) || !self.has_node(b) {
            return false;
        }

        let len_before = self.adjacency[a].len();
        self.adjacency[a].retain(|edge| !edge.joins(a, b));
        let removed = len_before - self.adjacency[a].len();
        if a != b {
            self.adjacency[b].retain(|edge| !edge.joins(a, b));
        }

        self.edge_count -= removed;
        removed > 0
    }

    fn update_edge_weight(&mut self, a: usize, b: usize, weight: W) -> bool {
        if !self.has_node(a) || !self.has_node(b) || weight < W::zero() {
            return false;
        }

        let mut updated = false;
        for node in [a, b] {
            for edge in self.adjacency[node].iter_mut().filter(|edge| edge.joins(a, b)) {
                edge.weight = weight;
                updated = true;
            }
        }
        updated
    }
}
