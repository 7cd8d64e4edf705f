use super::*;
use crate::config::ContentConfig;
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;


/// Config pointing the catalog client at `server`
fn test_config(server: &MockServer) -> Config {
    Config {
        content: ContentConfig {
            base_url: format!("{}/products", server.uri()),
            request_timeout: Duration::from_millis(500),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Router backed by a catalog client aimed at `server`
fn create_test_router(server: &MockServer) -> (Router, Arc<CatalogClient>) {
    let config = Arc::new(test_config(server));
    let client = Arc::new(CatalogClient::new(&config.content).unwrap());
    (create_router(client.clone(), config), client)
}

fn live_document() -> Value {
    json!({
        "slug": "ielts-course",
        "id": 153,
        "title": "IELTS Course by Munzereen Shahid",
        "description": "<p>Live</p>",
        "media": [],
        "checklist": [],
        "seo": {
            "title": "IELTS Course | 10 Minute School",
            "description": "Live SEO description",
            "keywords": ["IELTS", "Speaking"],
            "og_image": "https://cdn.example.com/og.jpg"
        },
        "cta_text": {"primary": "Enroll", "price": 3850, "currency": "BDT"},
        "sections": []
    })
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let server = MockServer::start().await;
    let mut config = test_config(&server);
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);
    let client = Arc::new(CatalogClient::new(&config.content).unwrap());

    let api_handle = tokio::spawn({
        let client = client.clone();
        let config = config.clone();
        async move { start_api_server(client, config).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished(), "server should still be running");

    api_handle.abort();
}

#[tokio::test]
async fn test_api_server_rejects_invalid_config() {
    let server = MockServer::start().await;
    let mut config = test_config(&server);
    config.content.request_timeout = Duration::ZERO;
    let config = Arc::new(config);
    let client = Arc::new(CatalogClient::new(&config.content).unwrap());

    let result = start_api_server(client, config).await;
    assert!(matches!(result, Err(crate::Error::Config { .. })));
}

#[tokio::test]
async fn test_cors_enabled() {
    let server = MockServer::start().await;
    let (app, _client) = create_test_router(&server);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS headers should be present"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let server = MockServer::start().await;
    let mut config = test_config(&server);
    config.server.api.cors_enabled = false;
    let config = Arc::new(config);
    let client = Arc::new(CatalogClient::new(&config.content).unwrap());
    let app = create_router(client, config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let cors = build_cors_layer(&["https://app.example.com".to_string()]);
    let app = Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .layer(cors);

    let request = Request::builder()
        .uri("/")
        .header("Origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://app.example.com"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = MockServer::start().await;
    let (app, _client) = create_test_router(&server);

    let response = send(app, get_request("/downloads")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
