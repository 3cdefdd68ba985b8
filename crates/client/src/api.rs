//! Typed HTTP client for the Rollcall API.

use std::sync::{Arc, RwLock};

use reqwest::{Method, Response};
use rollcall_core::summary::EquipmentSummary;
use rollcall_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::types::{
    Attendance, AttendanceEnvelope, AttendanceRequest, AuthResponse, Credentials,
    EquipmentEnvelope, Event, EventEnvelope, EventPatch, EventsEnvelope, Message, NewEvent,
    Registration, User, UserEnvelope, UsersEnvelope,
};

/// Default API location, matching the server's default port and base path.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Shared HTTP client. Clones share the connection pool and the token slot.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Serialize)]
struct StatusChange {
    is_active: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    // --- auth ---

    /// Sent without a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.call(Method::POST, "/auth/login", Some(&Credentials { email, password }), false)
            .await
    }

    /// Sent without a bearer token.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ClientResult<AuthResponse> {
        let body = Registration {
            email,
            password,
            name,
        };
        self.call(Method::POST, "/auth/register", Some(&body), false)
            .await
    }

    pub async fn me(&self) -> ClientResult<User> {
        let envelope: UserEnvelope = self.get("/auth/me").await?;
        Ok(envelope.user)
    }

    // --- users ---

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let envelope: UsersEnvelope = self.get("/users").await?;
        Ok(envelope.users)
    }

    pub async fn set_user_active(&self, user_id: DbId, is_active: bool) -> ClientResult<User> {
        let envelope: UserEnvelope = self
            .call(
                Method::PATCH,
                &format!("/users/{user_id}/status"),
                Some(&StatusChange { is_active }),
                true,
            )
            .await?;
        Ok(envelope.user)
    }

    // --- events ---

    pub async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let envelope: EventsEnvelope = self.get("/events").await?;
        Ok(envelope.events)
    }

    pub async fn create_event(&self, event: &NewEvent) -> ClientResult<Event> {
        let envelope: EventEnvelope = self.call(Method::POST, "/events", Some(event), true).await?;
        Ok(envelope.event)
    }

    pub async fn update_event(&self, event_id: DbId, patch: &EventPatch) -> ClientResult<Event> {
        let envelope: EventEnvelope = self
            .call(Method::PATCH, &format!("/events/{event_id}"), Some(patch), true)
            .await?;
        Ok(envelope.event)
    }

    pub async fn delete_event(&self, event_id: DbId) -> ClientResult<Message> {
        self.call::<(), _>(Method::DELETE, &format!("/events/{event_id}"), None, true)
            .await
    }

    pub async fn event_equipment(&self, event_id: DbId) -> ClientResult<EquipmentSummary> {
        let envelope: EquipmentEnvelope = self.get(&format!("/events/{event_id}/equipment")).await?;
        Ok(envelope.equipment)
    }

    // --- attendance ---

    pub async fn submit_attendance(
        &self,
        event_id: DbId,
        request: &AttendanceRequest,
    ) -> ClientResult<Attendance> {
        let envelope: AttendanceEnvelope = self
            .call(Method::POST, &format!("/attendance/{event_id}"), Some(request), true)
            .await?;
        Ok(envelope.attendance)
    }

    pub async fn delete_attendance(&self, event_id: DbId) -> ClientResult<Message> {
        self.call::<(), _>(Method::DELETE, &format!("/attendance/{event_id}"), None, true)
            .await
    }

    // --- plumbing ---

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call::<(), _>(Method::GET, path, None, true).await
    }

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        with_auth: bool,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if with_auth {
            if let Some(token) = self.token() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "API request");
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Request failed".to_string());
        tracing::debug!(%status, %message, "API error");
        Err(ClientError::Api { status, message })
    }
}
