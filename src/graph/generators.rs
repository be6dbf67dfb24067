use crate::graph::{MutableGraph, UndirectedGraph};
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Generates an Erdős–Rényi style G(n, p) graph with integer weights in `1..=max_weight`.
///
/// Every unordered pair of distinct nodes is joined with probability `p`.
pub fn random_graph<R: Rng>(
    n: usize,
    p: f64,
    max_weight: u32,
    rng: &mut R,
) -> UndirectedGraph<u32> {
    assert!((0.0..=1.0).contains(&p), "p must be a probability");
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = UndirectedGraph::with_capacity(n);
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(p) {
                let weight = rng.gen_range(1..=max_weight);
                graph
                    .add_edge(a, b, weight)
                    .expect("generated edge joins existing nodes");
            }
        }
    }
    graph
}

/// Generates a connected random graph: a random spanning tree plus `extra_edges` chords.
pub fn random_connected_graph<R: Rng>(
    n: usize,
    extra_edges: usize,
    max_weight: u32,
    rng: &mut R,
) -> UndirectedGraph<u32> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = UndirectedGraph::with_capacity(n);
    append_connected_component(&mut graph, 0, n, extra_edges, max_weight, rng);
    graph
}

/// Generates a graph made of two disjoint connected components.
///
/// Component A owns nodes `0..n_a`, component B owns `n_a..n_a + n_b`.
pub fn two_components<R: Rng>(
    n_a: usize,
    n_b: usize,
    max_weight: u32,
    rng: &mut R,
) -> UndirectedGraph<u32> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut graph = UndirectedGraph::with_capacity(n_a + n_b);
    append_connected_component(&mut graph, 0, n_a, n_a, max_weight, rng);
    append_connected_component(&mut graph, n_a, n_b, n_b, max_weight, rng);
    graph
}

fn append_connected_component<R: Rng>(
    graph: &mut UndirectedGraph<u32>,
    offset: usize,
    len: usize,
    extra_edges: usize,
    max_weight: u32,
    rng: &mut R,
) {
    // Attach each node to a random earlier one so the component is a tree first.
    for i in 1..len {
        let parent = rng.gen_range(0..i);
        let weight = rng.gen_range(1..=max_weight);
        graph
            .add_edge(offset + i, offset + parent, weight)
            .expect("generated edge joins existing nodes");
    }
    if len < 2 {
        return;
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..len);
        let b = rng.gen_range(0..len);
        if a != b {
            let weight = rng.gen_range(1..=max_weight);
            graph
                .add_edge(offset + a, offset + b, weight)
                .expect("generated edge joins existing nodes");
        }
    }
}

/// Generates a 2D grid graph with 4-connectivity and unit weights.
///
/// Node `(x, y)` has ID `y * width + x`.
///
/// # Panics
///
/// Panics if `width * height` overflows `usize`.
pub fn grid_graph(width: usize, height: usize) -> UndirectedGraph<OrderedFloat<f64>> {
    let nodes = width
        .checked_mul(height)
        .expect("grid dimensions overflow usize");
    let mut graph = UndirectedGraph::with_capacity(nodes);
    let index = |x: usize, y: usize| y * width + x;

    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                graph
                    .add_edge(index(x, y), index(x + 1, y), OrderedFloat(1.0))
                    .expect("grid neighbours exist");
            }
            if y + 1 < height {
                graph
                    .add_edge(index(x, y), index(x, y + 1), OrderedFloat(1.0))
                    .expect("grid neighbours exist");
            }
        }
    }
    graph
}

/// Generates a random geometric graph in the unit square
/// n: number of nodes
/// r: connection radius (nodes within distance r are connected)
pub fn random_geometric<R: Rng>(
    n: usize,
    r: f64,
    rng: &mut R,
) -> UndirectedGraph<OrderedFloat<f64>> {
    let mut graph = UndirectedGraph::with_capacity(n);

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[j];
            let dist = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
            if dist <= r {
                graph
                    .add_edge(i, j, OrderedFloat(dist))
                    .expect("generated edge joins existing nodes");
            }
        }
    }
    graph
}
