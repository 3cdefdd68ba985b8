//! A real API server on an ephemeral port, backed by the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::task::JoinHandle;

use rollcall_api::auth::jwt::JwtConfig;
use rollcall_api::auth::password::hash_password;
use rollcall_api::config::{CorsOrigins, DataServiceKind, ServerConfig};
use rollcall_api::router::build_app_router;
use rollcall_api::state::AppState;
use rollcall_client::types::NewEvent;
use rollcall_client::ApiClient;
use rollcall_db::memory::MemoryDataService;
use rollcall_db::models::user::CreateUser;
use rollcall_db::DataService;

pub const PASSWORD: &str = "client-test-pass";

pub struct TestServer {
    pub base_url: String,
    pub data: Arc<MemoryDataService>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// Insert a user directly. The password is [`PASSWORD`].
    pub async fn seed_user(&self, email: &str, name: &str, is_admin: bool) -> i64 {
        self.data
            .create_user(&CreateUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
                name: name.to_string(),
                is_admin,
            })
            .await
            .expect("user creation should succeed")
            .id
    }

    /// A client already holding a token for `email`.
    pub async fn signed_in(&self, email: &str) -> ApiClient {
        let client = self.client();
        let auth = client.login(email, PASSWORD).await.expect("login should succeed");
        client.set_token(Some(auth.token));
        client
    }
}

fn config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_path: "/api".to_string(),
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        data_service: DataServiceKind::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "client-test-secret".to_string(),
            expiry_days: 30,
        },
    }
}

pub async fn spawn_server() -> TestServer {
    let data = Arc::new(MemoryDataService::new());
    let app = build_app_router(AppState::new(data.clone(), config()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("listener has an address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    TestServer {
        base_url: format!("http://{addr}/api"),
        data,
        handle,
    }
}

pub fn training(day: u32) -> NewEvent {
    NewEvent {
        title: "Training".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date"),
        time_from: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
        time_to: NaiveTime::from_hms_opt(19, 30, 0).expect("valid time"),
        location: "Field A".to_string(),
    }
}
