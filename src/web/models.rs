use std::sync::Arc;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::{Graph, UndirectedGraph};

/// Represents a node in the graph for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
}

/// Represents an undirected edge for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// Explicit graph upload
#[derive(Debug, Deserialize)]
pub struct GraphCreateRequest {
    pub node_count: usize,
    #[serde(default)]
    pub edges: Vec<WebEdge>,
}

/// Parameters for graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub graph_type: String,
    pub node_count: usize,
    #[serde(default = "default_edge_probability")]
    pub edge_probability: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub grid_dimensions: Option<(usize, usize)>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_edge_probability() -> f64 { 0.1 }
fn default_radius() -> f64 { 0.2 }

/// A single point-to-point query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathRequest {
    pub source: usize,
    pub destination: usize,
}

/// Several independent queries against the same graph
#[derive(Debug, Deserialize)]
pub struct BatchPathRequest {
    pub queries: Vec<PathRequest>,
}

/// Result of a path query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub query_id: Uuid,
    pub source: usize,
    pub destination: usize,
    pub reachable: bool,
    pub path: Vec<usize>,
    pub total_weight: Option<f64>,
    pub nodes_settled: usize,
    pub edges_relaxed: usize,
    pub execution_time_ms: f64,
}

#[derive(Debug, Deserialize)]
pub struct PathSumRequest {
    pub path: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PathSumResponse {
    pub total_weight: f64,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session holding an uploaded or generated graph
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub node_count: usize,
    pub edge_count: usize,
    pub queries_served: usize,
    pub created_at: DateTime<Utc>,
    /// Searchable form of `graph`, shared with in-flight queries
    #[serde(skip)]
    pub search_graph: Arc<UndirectedGraph<OrderedFloat<f64>>>,
}

impl Session {
    pub fn new(graph: UndirectedGraph<OrderedFloat<f64>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph: WebGraph::from(&graph),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            queries_served: 0,
            created_at: Utc::now(),
            search_graph: Arc::new(graph),
        }
    }
}

impl From<&UndirectedGraph<OrderedFloat<f64>>> for WebGraph {
    fn from(graph: &UndirectedGraph<OrderedFloat<f64>>) -> Self {
        let nodes = (0..graph.node_count())
            .map(|id| WebNode {
                id,
                label: format!("Node {}", id),
            })
            .collect();
        let links = graph
            .edges()
            .map(|edge| WebEdge {
                source: edge.a,
                target: edge.b,
                weight: edge.weight.into_inner(),
            })
            .collect();

        WebGraph { nodes, links }
    }
}
