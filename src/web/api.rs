use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::{info, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::path::path_sum;
use crate::graph::generators::{grid_graph, random_geometric, random_graph};
use crate::graph::{MutableGraph, UndirectedGraph};
use crate::web::models::*;
use crate::web::server::ServerConfig;
use crate::Error;

type SearchGraph = UndirectedGraph<OrderedFloat<f64>>;

/// Rejection returned by every handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            details: None,
        }),
    )
}

fn query_error(err: Error) -> ApiError {
    let code = match &err {
        Error::SourceNotFound | Error::DestinationNotFound | Error::InvalidVertex(_) => {
            "unknown_node"
        }
        Error::InvalidEdge(..) => "invalid_edge",
        Error::NegativeWeight(_) => "negative_weight",
        Error::NonFiniteWeight(_) => "invalid_weight",
        Error::DistanceOverflow(..) => "distance_overflow",
        Error::EmptyPath => "empty_path",
        Error::NotAWalk(..) => "not_a_walk",
        Error::DuplicateFrontierEntry(_) | Error::LockPoisoned => {
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "search_failed", err.to_string());
        }
    };
    api_error(StatusCode::BAD_REQUEST, code, err.to_string())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "state_poisoned",
                "Session store is unavailable",
            )
        })
    }

    /// Stores a session after evicting expired ones
    fn insert_session(&self, session: Session) -> Result<(), ApiError> {
        let mut sessions = self.sessions()?;

        let timeout = chrono::Duration::minutes(self.config.session_timeout_minutes as i64);
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, existing| now - existing.created_at < timeout);
        if sessions.len() < before {
            info!("Evicted {} expired sessions", before - sessions.len());
        }

        if sessions.len() >= self.config.max_sessions {
            warn!("Session limit of {} reached", self.config.max_sessions);
            return Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "session_limit",
                format!("At most {} sessions may be open", self.config.max_sessions),
            ));
        }

        sessions.insert(session.id, session);
        Ok(())
    }

    fn search_graph(&self, session_id: Uuid) -> Result<Arc<SearchGraph>, ApiError> {
        let sessions = self.sessions()?;
        sessions
            .get(&session_id)
            .map(|session| Arc::clone(&session.search_graph))
            .ok_or_else(session_not_found)
    }

    fn record_queries(&self, session_id: Uuid, count: usize) -> Result<(), ApiError> {
        let mut sessions = self.sessions()?;
        if let Some(session) = sessions.get_mut(&session_id) {
            session.queries_served += count;
        }
        Ok(())
    }
}

fn session_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found")
}

fn check_node_count(config: &ServerConfig, node_count: Option<usize>) -> Result<usize, ApiError> {
    match node_count {
        Some(n) if n <= config.max_nodes => Ok(n),
        _ => {
            warn!("Rejected graph larger than {} nodes", config.max_nodes);
            Err(api_error(
                StatusCode::BAD_REQUEST,
                "too_many_nodes",
                format!("Graphs may have at most {} nodes", config.max_nodes),
            ))
        }
    }
}

fn search_failed(err: tokio::task::JoinError) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "search_failed", err.to_string())
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/path", post(find_path))
        .route("/api/graphs/:session_id/paths", post(find_paths))
        .route("/api/graphs/:session_id/path-sum", post(sum_path))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

/// Upload a graph as an explicit edge list
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphCreateRequest>,
) -> Result<Json<Session>, ApiError> {
    let node_count = check_node_count(&state.config, Some(request.node_count))?;
    let mut graph: SearchGraph = UndirectedGraph::with_capacity(node_count);
    for edge in &request.edges {
        graph
            .add_finite_edge(edge.source, edge.target, edge.weight)
            .map_err(query_error)?;
    }

    let session = Session::new(graph);
    state.insert_session(session.clone())?;
    info!(
        "Created session {} with {} nodes and {} edges",
        session.id, session.node_count, session.edge_count
    );
    Ok(Json(session))
}

/// Generate a new graph
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> Result<Json<Session>, ApiError> {
    let grid = match request.grid_dimensions {
        Some((width, height)) => (width, height),
        None => {
            let side = (request.node_count as f64).sqrt().ceil() as usize;
            (side, side)
        }
    };
    let node_count = if request.graph_type == "grid" {
        grid.0.checked_mul(grid.1)
    } else {
        Some(request.node_count)
    };
    let node_count = check_node_count(&state.config, node_count)?;

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let graph = match request.graph_type.as_str() {
        "random" => {
            if !(0.0..=1.0).contains(&request.edge_probability) {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_probability",
                    "edge_probability must lie in [0, 1]",
                ));
            }
            to_float_weights(&random_graph(
                node_count,
                request.edge_probability,
                100,
                &mut rng,
            ))
            .map_err(query_error)?
        }
        "grid" => grid_graph(grid.0, grid.1),
        "geometric" => random_geometric(node_count, request.radius, &mut rng),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_type",
                format!("Unknown graph type: {}", request.graph_type),
            ));
        }
    };

    let session = Session::new(graph);
    state.insert_session(session.clone())?;
    info!(
        "Generated {} graph for session {} ({} nodes, {} edges)",
        request.graph_type, session.id, session.node_count, session.edge_count
    );
    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let sessions = state.sessions()?;
    sessions
        .get(&session_id)
        .map(|session| Json(session.graph.clone()))
        .ok_or_else(session_not_found)
}

/// Answer one shortest path query
pub async fn find_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let graph = state.search_graph(session_id)?;
    let response = tokio::task::spawn_blocking(move || run_query(&graph, request))
        .await
        .map_err(search_failed)?
        .map_err(query_error)?;
    state.record_queries(session_id, 1)?;
    Ok(Json(response))
}

/// Answer several independent queries in parallel
pub async fn find_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<BatchPathRequest>,
) -> Result<Json<Vec<PathResponse>>, ApiError> {
    let graph = state.search_graph(session_id)?;
    let responses = tokio::task::spawn_blocking(move || {
        request
            .queries
            .par_iter()
            .map(|query| run_query(&graph, *query))
            .collect::<crate::Result<Vec<_>>>()
    })
    .await
    .map_err(search_failed)?
    .map_err(query_error)?;
    state.record_queries(session_id, responses.len())?;
    Ok(Json(responses))
}

/// Sum the edge weights along a client-supplied path
pub async fn sum_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathSumRequest>,
) -> Result<Json<PathSumResponse>, ApiError> {
    let graph = state.search_graph(session_id)?;
    let total = path_sum::<OrderedFloat<f64>, _>(graph.as_ref(), &request.path)
        .map_err(query_error)?;
    Ok(Json(PathSumResponse {
        total_weight: total.into_inner(),
    }))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<Uuid>>, ApiError> {
    let sessions = state.sessions()?;
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    let sessions = state.sessions()?;
    sessions
        .get(&session_id)
        .map(|session| Json(session.clone()))
        .ok_or_else(session_not_found)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Helper functions

fn run_query(graph: &SearchGraph, request: PathRequest) -> crate::Result<PathResponse> {
    let start = Instant::now();
    let (path, stats) = Dijkstra::new().shortest_path_with_stats::<OrderedFloat<f64>, _>(
        graph,
        request.source,
        request.destination,
    )?;
    let total_weight = if path.is_empty() {
        None
    } else {
        Some(path_sum::<OrderedFloat<f64>, _>(graph, &path)?.into_inner())
    };

    Ok(PathResponse {
        query_id: Uuid::new_v4(),
        source: request.source,
        destination: request.destination,
        reachable: !path.is_empty(),
        path,
        total_weight,
        nodes_settled: stats.nodes_settled,
        edges_relaxed: stats.edges_relaxed,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

fn to_float_weights(graph: &UndirectedGraph<u32>) -> crate::Result<SearchGraph> {
    use crate::graph::Graph;

    let mut converted: SearchGraph = UndirectedGraph::with_capacity(graph.node_count());
    for edge in graph.edges() {
        converted.add_edge(edge.a, edge.b, OrderedFloat(f64::from(edge.weight)))?;
    }
    Ok(converted)
}
