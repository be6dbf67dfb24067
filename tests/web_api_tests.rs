use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use frontier_path::web::{build_app, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn diamond() -> Value {
    json!({
        "node_count": 4,
        "edges": [
            { "source": 0, "target": 1, "weight": 1.0 },
            { "source": 1, "target": 3, "weight": 5.0 },
            { "source": 0, "target": 2, "weight": 2.0 },
            { "source": 2, "target": 3, "weight": 2.0 }
        ]
    })
}

async fn create_session(app: &Router, graph: Value) -> String {
    let (status, session) = send(app, Method::POST, "/api/graphs", Some(graph)).await;
    assert_eq!(status, StatusCode::OK);
    session["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = build_app(ServerConfig::default());
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn uploaded_graph_answers_path_queries() {
    let app = build_app(ServerConfig::default());
    let id = create_session(&app, diamond()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/path", id),
        Some(json!({ "source": 0, "destination": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], json!([0, 2, 3]));
    assert_eq!(body["total_weight"], json!(4.0));
    assert_eq!(body["reachable"], json!(true));

    let (_, session) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(session["queries_served"], json!(1));
    assert_eq!(session["edge_count"], json!(4));
}

#[tokio::test]
async fn unreachable_destination_is_not_an_error() {
    let app = build_app(ServerConfig::default());
    let id = create_session(
        &app,
        json!({ "node_count": 3, "edges": [{ "source": 0, "target": 1, "weight": 1.0 }] }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/path", id),
        Some(json!({ "source": 0, "destination": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], json!([]));
    assert_eq!(body["reachable"], json!(false));
    assert!(body["total_weight"].is_null());
}

#[tokio::test]
async fn batch_queries_come_back_in_order() {
    let app = build_app(ServerConfig::default());
    let id = create_session(&app, diamond()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/paths", id),
        Some(json!({ "queries": [
            { "source": 0, "destination": 3 },
            { "source": 3, "destination": 1 },
            { "source": 2, "destination": 2 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let responses = body.as_array().unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["path"], json!([0, 2, 3]));
    assert_eq!(responses[1]["total_weight"], json!(5.0));
    assert_eq!(responses[2]["path"], json!([2]));
}

#[tokio::test]
async fn path_sum_validates_the_walk() {
    let app = build_app(ServerConfig::default());
    let id = create_session(&app, diamond()).await;
    let uri = format!("/api/graphs/{}/path-sum", id);

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "path": [0, 1, 3] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_weight"], json!(6.0));

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "path": [0, 3] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "not_a_walk");

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "path": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty_path");
}

#[tokio::test]
async fn bad_uploads_and_queries_are_rejected() {
    let app = build_app(ServerConfig::default());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "node_count": 2, "edges": [{ "source": 0, "target": 1, "weight": -1.0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "negative_weight");

    let id = create_session(&app, diamond()).await;
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/path", id),
        Some(json!({ "source": 0, "destination": 40 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_node");

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/api/graphs/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn seeded_generation_is_reproducible() {
    let app = build_app(ServerConfig::default());
    let request = json!({ "graph_type": "random", "node_count": 30, "edge_probability": 0.2, "seed": 11 });

    let (status, first) = send(&app, Method::POST, "/api/graphs/generate", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, Method::POST, "/api/graphs/generate", Some(request)).await;
    assert_eq!(first["graph"], second["graph"]);
    assert_ne!(first["id"], second["id"]);

    let (status, grid) = send(
        &app,
        Method::POST,
        "/api/graphs/generate",
        Some(json!({ "graph_type": "grid", "node_count": 0, "grid_dimensions": [3, 2] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid["node_count"], json!(6));
    assert_eq!(grid["edge_count"], json!(7));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs/generate",
        Some(json!({ "graph_type": "hypercube", "node_count": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_graph_type");
}

#[tokio::test]
async fn session_limit_is_enforced() {
    let app = build_app(ServerConfig {
        max_sessions: 2,
        ..ServerConfig::default()
    });
    create_session(&app, diamond()).await;
    create_session(&app, diamond()).await;

    let (status, body) = send(&app, Method::POST, "/api/graphs", Some(diamond())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "session_limit");

    let (_, sessions) = send(&app, Method::GET, "/api/sessions", None).await;
    assert_eq!(sessions.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn oversized_graphs_are_rejected_before_building() {
    let app = build_app(ServerConfig {
        max_nodes: 1_000,
        ..ServerConfig::default()
    });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs/generate",
        Some(json!({ "graph_type": "grid", "node_count": 0, "grid_dimensions": [4294967296u64, 4294967296u64] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_many_nodes");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs/generate",
        Some(json!({ "graph_type": "grid", "node_count": 0, "grid_dimensions": [40, 40] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_many_nodes");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs/generate",
        Some(json!({ "graph_type": "geometric", "node_count": 1_000_000_000u64 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_many_nodes");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graphs",
        Some(json!({ "node_count": usize::MAX, "edges": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "too_many_nodes");

    let (_, sessions) = send(&app, Method::GET, "/api/sessions", None).await;
    assert!(sessions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unrepresentable_path_length_is_a_bad_request() {
    let app = build_app(ServerConfig::default());
    let id = create_session(
        &app,
        json!({
            "node_count": 3,
            "edges": [
                { "source": 0, "target": 1, "weight": f64::MAX },
                { "source": 1, "target": 2, "weight": f64::MAX }
            ]
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/path", id),
        Some(json!({ "source": 0, "destination": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "distance_overflow");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/graphs/{}/path-sum", id),
        Some(json!({ "path": [0, 1, 2] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "distance_overflow");
}
