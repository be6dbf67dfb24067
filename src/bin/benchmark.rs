use std::time::{Duration, Instant};

use frontier_path::graph::generators::random_connected_graph;
use frontier_path::graph::{Graph, UndirectedGraph};
use frontier_path::{shortest_paths_parallel, Dijkstra, ShortestPathAlgorithm};
use log::info;
use rand::prelude::*;

const QUERIES_PER_GRAPH: usize = 200;

// Time sequential queries and return the total plus the number of reachable pairs
fn run_sequential(graph: &UndirectedGraph<u32>, queries: &[(usize, usize)]) -> (Duration, usize) {
    let dijkstra = Dijkstra::new();
    let start = Instant::now();
    let mut reachable = 0;
    for &(source, destination) in queries {
        match dijkstra.shortest_path(graph, source, destination) {
            Ok(path) if !path.is_empty() => reachable += 1,
            Ok(_) => {}
            Err(e) => eprintln!("  query {} -> {} failed: {}", source, destination, e),
        }
    }
    (start.elapsed(), reachable)
}

fn run_parallel(graph: &UndirectedGraph<u32>, queries: &[(usize, usize)]) -> Duration {
    let start = Instant::now();
    let results = shortest_paths_parallel(&Dijkstra::new(), graph, queries);
    let elapsed = start.elapsed();
    info!("{} parallel results collected", results.len());
    elapsed
}

fn main() {
    env_logger::init();

    // Define graph sizes to test
    let graph_sizes = vec![1_000, 10_000, 50_000, 100_000];

    // Edge factor: extra chords per node on top of the spanning tree
    let edge_factor = 2;

    println!("=====================================================");
    println!("Benchmark: point-to-point Dijkstra, sequential vs parallel");
    println!("{} queries per graph, ~{} chords per node", QUERIES_PER_GRAPH, edge_factor);
    println!("=====================================================");

    let mut rng = StdRng::seed_from_u64(2025);
    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating connected graph with {} nodes...", size);
        let graph = random_connected_graph(size, size * edge_factor, 100, &mut rng);
        println!("Graph has {} nodes and {} edges", graph.node_count(), graph.edge_count());

        let queries: Vec<(usize, usize)> = (0..QUERIES_PER_GRAPH)
            .map(|_| (rng.gen_range(0..size), rng.gen_range(0..size)))
            .collect();

        let (sequential, reachable) = run_sequential(&graph, &queries);
        let parallel = run_parallel(&graph, &queries);
        println!("  - {} of {} pairs reachable", reachable, queries.len());
        println!("  - sequential: {:?}, parallel: {:?}", sequential, parallel);

        results.push((size, sequential, parallel));
    }

    // Print summary table
    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15} | {:<10}", "Nodes", "Sequential (ms)", "Parallel (ms)", "Speedup");
    println!("-----------------------------------------------------");

    for (size, sequential, parallel) in &results {
        let speedup = sequential.as_secs_f64() / parallel.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<10} | {:<15} | {:<15} | {:<10.2}",
            size,
            sequential.as_millis(),
            parallel.as_millis(),
            speedup
        );
    }
}
