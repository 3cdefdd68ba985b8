//! Shared helpers for the API integration tests.
//!
//! Every test builds the production router over a fresh in-memory data
//! service and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rollcall_api::auth::jwt::JwtConfig;
use rollcall_api::auth::password::hash_password;
use rollcall_api::config::{CorsOrigins, DataServiceKind, ServerConfig};
use rollcall_api::router::build_app_router;
use rollcall_api::state::AppState;
use rollcall_db::memory::MemoryDataService;
use rollcall_db::models::user::{CreateUser, User};
use rollcall_db::DataService;

pub const TEST_PASSWORD: &str = "test-password-123";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_path: "/api".to_string(),
        cors_origins: CorsOrigins::List(vec!["http://localhost:3000".to_string()]),
        request_timeout_secs: 30,
        data_service: DataServiceKind::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_days: 30,
        },
    }
}

/// The application router over `data`, with the full middleware stack.
pub fn build_test_app(data: Arc<MemoryDataService>) -> Router {
    build_app_router(AppState::new(data, test_config()))
}

/// A fresh store plus a router over it.
pub fn setup() -> (Router, Arc<MemoryDataService>) {
    let data = Arc::new(MemoryDataService::new());
    (build_test_app(Arc::clone(&data)), data)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a user directly into the store. The password is [`TEST_PASSWORD`].
pub async fn create_user(data: &MemoryDataService, email: &str, name: &str, is_admin: bool) -> User {
    data.create_user(&CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        name: name.to_string(),
        is_admin,
    })
    .await
    .expect("user creation should succeed")
}

/// Log in through the API and return the bearer token.
pub async fn login(app: &Router, email: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login for {email} failed");
    body_json(response).await["token"]
        .as_str()
        .expect("login response must carry a token")
        .to_string()
}

/// Seed a user and log them in.
pub async fn user_with_token(
    app: &Router,
    data: &MemoryDataService,
    email: &str,
    name: &str,
    is_admin: bool,
) -> (User, String) {
    let user = create_user(data, email, name, is_admin).await;
    let token = login(app, email).await;
    (user, token)
}

/// Create an event through the API as `admin_token` and return its id.
pub async fn create_event(app: &Router, admin_token: &str, title: &str, date: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/events",
        json!({
            "title": title,
            "date": date,
            "time_from": "18:00",
            "time_to": "20:00",
            "location": "Field A",
        }),
        admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["event"]["id"]
        .as_i64()
        .expect("event id")
}

/// All listed events, keyed out of the `{events}` envelope.
pub async fn list_events(app: &Router, token: &str) -> Vec<Value> {
    let response = get_auth(app, "/api/events", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["events"]
        .as_array()
        .cloned()
        .expect("events array")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn patch_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
