#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use helpdesk_api::config::ServerConfig;
use helpdesk_api::router::build_app_router;
use helpdesk_api::state::AppState;
use helpdesk_db::DbPool;

/// Build a test `ServerConfig` from the testing profile: any CORS origin,
/// 30-second request timeout. The pool itself comes from `#[sqlx::test]`.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "APP_ENV" => Some("testing".to_string()),
        _ => None,
    })
    .expect("testing profile must load")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: DbPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body.to_string())).await
}

/// Build a request with a raw (possibly malformed) JSON body.
pub fn json_request(method: Method, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Create a ticket through the API and return its JSON representation.
pub async fn create_ticket(pool: &DbPool, title: &str, description: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/tickets",
        serde_json::json!({ "title": title, "description": description }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
