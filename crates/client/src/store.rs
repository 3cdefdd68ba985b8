//! Session and data holders for the front end.
//!
//! Mutations never patch local state; they call the API and then re-fetch.

use rollcall_core::summary::EquipmentSummary;
use rollcall_core::types::DbId;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::storage::TokenStorage;
use crate::types::{Attendance, AttendanceRequest, Event, EventPatch, NewEvent, User};

/// Who is signed in, backed by a persisted token.
pub struct AuthStore<S> {
    api: ApiClient,
    storage: S,
    pub user: Option<User>,
    pub token: Option<String>,
    /// True until [`AuthStore::load_user`] has run once.
    pub is_loading: bool,
}

impl<S: TokenStorage> AuthStore<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self {
            api,
            storage,
            user: None,
            token: None,
            is_loading: true,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&User> {
        let response = self.api.login(email, password).await?;
        self.accept(response.token, response.user)
    }

    pub async fn register(&mut self, email: &str, password: &str, name: &str) -> ClientResult<&User> {
        let response = self.api.register(email, password, name).await?;
        self.accept(response.token, response.user)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.user = None;
        self.token = None;
        self.api.set_token(None);
        self.storage.clear()
    }

    /// Restore a session from storage. A token the server no longer accepts
    /// is discarded; only transport failures are returned as errors.
    pub async fn load_user(&mut self) -> ClientResult<Option<&User>> {
        let Some(token) = self.storage.load()? else {
            self.is_loading = false;
            return Ok(None);
        };

        self.api.set_token(Some(token.clone()));
        let result = self.api.me().await;
        self.is_loading = false;

        match result {
            Ok(user) => {
                self.token = Some(token);
                self.user = Some(user);
                Ok(self.user.as_ref())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Stored token rejected");
                self.logout()?;
                match e {
                    ClientError::Api { .. } => Ok(None),
                    other => Err(other),
                }
            }
        }
    }

    fn accept(&mut self, token: String, user: User) -> ClientResult<&User> {
        self.storage.save(&token)?;
        self.api.set_token(Some(token.clone()));
        self.token = Some(token);
        Ok(self.user.insert(user))
    }
}

/// Events and users as last fetched.
pub struct AppStore {
    api: ApiClient,
    pub events: Vec<Event>,
    pub users: Vec<User>,
    pub is_loading: bool,
}

impl AppStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            events: Vec::new(),
            users: Vec::new(),
            is_loading: false,
        }
    }

    pub async fn fetch_events(&mut self) -> ClientResult<&[Event]> {
        self.is_loading = true;
        let result = self.api.list_events().await;
        self.is_loading = false;
        self.events = result?;
        Ok(&self.events)
    }

    pub async fn fetch_users(&mut self) -> ClientResult<&[User]> {
        self.users = self.api.list_users().await?;
        Ok(&self.users)
    }

    /// Events and users together, as the dashboard needs both.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.fetch_events().await?;
        self.fetch_users().await?;
        Ok(())
    }

    pub fn event(&self, event_id: DbId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub async fn create_event(&mut self, event: &NewEvent) -> ClientResult<Event> {
        let created = self.api.create_event(event).await?;
        self.fetch_events().await?;
        Ok(created)
    }

    pub async fn update_event(&mut self, event_id: DbId, patch: &EventPatch) -> ClientResult<Event> {
        let updated = self.api.update_event(event_id, patch).await?;
        self.fetch_events().await?;
        Ok(updated)
    }

    pub async fn delete_event(&mut self, event_id: DbId) -> ClientResult<()> {
        self.api.delete_event(event_id).await?;
        self.fetch_events().await?;
        Ok(())
    }

    pub async fn submit_attendance(
        &mut self,
        event_id: DbId,
        request: &AttendanceRequest,
    ) -> ClientResult<Attendance> {
        let attendance = self.api.submit_attendance(event_id, request).await?;
        self.fetch_events().await?;
        Ok(attendance)
    }

    pub async fn delete_attendance(&mut self, event_id: DbId) -> ClientResult<()> {
        self.api.delete_attendance(event_id).await?;
        self.fetch_events().await?;
        Ok(())
    }

    pub async fn toggle_user_status(&mut self, user_id: DbId, is_active: bool) -> ClientResult<User> {
        let user = self.api.set_user_active(user_id, is_active).await?;
        self.fetch_users().await?;
        Ok(user)
    }

    pub async fn equipment(&self, event_id: DbId) -> ClientResult<EquipmentSummary> {
        self.api.event_equipment(event_id).await
    }
}
