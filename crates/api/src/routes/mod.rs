use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{attendance, auth, events, health, users};
use crate::state::AppState;

/// The route table, mounted under the configured base path.
///
/// Access is enforced by each handler's extractor (`RequireAuth`,
/// `RequireAdmin`, or none).
///
/// ```text
/// GET    /health                    health_check            public
///
/// POST   /auth/login                login                   public
/// POST   /auth/register             register                public
/// GET    /auth/me                   me                      bearer
///
/// GET    /events                    list_events             bearer
/// POST   /events                    create_event            admin
/// PATCH  /events/{id}               update_event            admin
/// DELETE /events/{id}               delete_event            admin
/// GET    /events/{id}/equipment     event_equipment         bearer
///
/// POST   /attendance/{eventId}      submit_attendance       bearer
/// DELETE /attendance/{eventId}      delete_attendance       bearer
///
/// GET    /users                     list_users              bearer
/// PATCH  /users/{id}/status         update_user_status      admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        // Events
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/{id}",
            patch(events::update_event).delete(events::delete_event),
        )
        .route("/events/{id}/equipment", get(events::event_equipment))
        // Attendance
        .route(
            "/attendance/{event_id}",
            post(attendance::submit_attendance).delete(attendance::delete_attendance),
        )
        // Users
        .route("/users", get(users::list_users))
        .route("/users/{id}/status", patch(users::update_user_status))
}
