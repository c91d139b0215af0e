//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server.
//! The Gotify upstream is a `wiremock` server started per test.
//!
//! ```bash
//! cargo test -p widgets-api --test integration -- --nocapture
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use widgets_api::routes::create_router;
use widgets_api::state::AppState;
use widgets_common::config::{AppConfig, GotifyConfig};

// ============================================================
// Helpers
// ============================================================

fn test_config(gotify_url: String) -> AppConfig {
    AppConfig {
        gotify: GotifyConfig::new(gotify_url, "test-key"),
        api_port: 0,
    }
}

fn build_app(server: &MockServer) -> Router {
    let state = AppState::new(test_config(server.uri())).unwrap();
    create_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn mount_listing(server: &MockServer, endpoint: &str, n: usize) {
    let list: Vec<serde_json::Value> = (0..n).map(|i| serde_json::json!({"id": i})).collect();
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(list))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, cursor: u64, size: u64, next: u64) {
    Mock::given(method("GET"))
        .and(path("/message"))
        .and(query_param("since", cursor.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [],
            "paging": {"size": size, "since": next, "limit": 200}
        })))
        .mount(server)
        .await;
}

// ============================================================
// Routes
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let (status, json) = get_json(build_app(&server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "widgets-gateway-api");
}

#[tokio::test]
async fn test_gotify_counts() {
    let server = MockServer::start().await;
    mount_listing(&server, "/application", 3).await;
    mount_listing(&server, "/client", 1).await;
    mount_page(&server, 0, 200, 88).await;
    mount_page(&server, 88, 88, 0).await;

    let (status, json) = get_json(build_app(&server), "/api/gotify").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"applications": 3, "clients": 1, "messages": 288})
    );
}

#[tokio::test]
async fn test_gotify_listing_shapes() {
    let server = MockServer::start().await;
    mount_listing(&server, "/application", 2).await;
    mount_listing(&server, "/client", 0).await;
    mount_page(&server, 0, 4, 0).await;

    let (status, json) = get_json(build_app(&server), "/api/gotify/application").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([{}, {}]));

    let (status, json) = get_json(build_app(&server), "/api/gotify/client").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));

    let (status, json) = get_json(build_app(&server), "/api/gotify/message").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["messages"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_upstream_status_maps_to_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/application"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (status, json) = get_json(build_app(&server), "/api/gotify/application").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("401 Unauthorized")
    );
}

#[tokio::test]
async fn test_malformed_upstream_maps_to_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/client"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (status, json) = get_json(build_app(&server), "/api/gotify/client").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("/client"));
}

#[tokio::test]
async fn test_unknown_route() {
    let server = MockServer::start().await;
    let response = build_app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
