mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use rollcall_client::error::NETWORK_ERROR_MESSAGE;
use rollcall_client::types::{AttendanceRequest, EventPatch};
use rollcall_client::{ApiClient, ClientError};
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;

use common::{spawn_server, training, PASSWORD};

#[tokio::test]
async fn login_then_me_returns_own_profile() {
    let server = spawn_server().await;
    server.seed_user("ann@example.com", "Ann", false).await;

    let client = server.client();
    let auth = client.login("ann@example.com", PASSWORD).await.unwrap();
    assert_eq!(auth.user.name, "Ann");

    client.set_token(Some(auth.token));
    let me = client.me().await.unwrap();
    assert_eq!(me.email.as_deref(), Some("ann@example.com"));
    assert!(!me.is_admin);
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let server = spawn_server().await;
    server.seed_user("ann@example.com", "Ann", false).await;

    let err = server
        .client()
        .login("ann@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_matches!(
        &err,
        ClientError::Api { status, message }
            if *status == StatusCode::UNAUTHORIZED && message == "Invalid credentials"
    );

    let err = server.client().list_events().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn register_signs_the_user_in() {
    let server = spawn_server().await;
    let client = server.client();

    let auth = client
        .register("new@example.com", "long-enough-pw", "Newbie")
        .await
        .unwrap();
    assert_eq!(auth.user.email.as_deref(), Some("new@example.com"));

    let err = client
        .register("new@example.com", "long-enough-pw", "Again")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
}

#[tokio::test]
async fn error_body_without_message_falls_back() {
    let app = Router::new().route(
        "/api/events",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let err = ApiClient::new(format!("http://{addr}/api"))
        .list_events()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.to_string(), "Request failed");
    handle.abort();
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(format!("http://{addr}/api"))
        .list_events()
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Http(_));
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn event_and_attendance_round() {
    let server = spawn_server().await;
    server.seed_user("coach@example.com", "Coach", true).await;
    let ann_id = server.seed_user("ann@example.com", "Ann", false).await;
    let admin = server.signed_in("coach@example.com").await;
    let ann = server.signed_in("ann@example.com").await;

    let event = admin.create_event(&training(1)).await.unwrap();
    assert_eq!(event.title, "Training");

    let attendance = ann
        .submit_attendance(
            event.id,
            &AttendanceRequest {
                status: AttendanceStatus::Confirmed,
                additional_players: 2,
                comment: Some("late".into()),
                equipment: vec![EquipmentType::Ball],
            },
        )
        .await
        .unwrap();
    assert_eq!(attendance.user_id, ann_id);
    assert_eq!(attendance.equipment_types(), [EquipmentType::Ball]);

    let events = ann.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].total_participants, 3);
    assert!(events[0].attendance_of(ann_id).is_some());

    let summary = admin.event_equipment(event.id).await.unwrap();
    assert_eq!(summary[&EquipmentType::Ball][0].user_name, "Ann");
    assert!(!summary.contains_key(&EquipmentType::Pump));

    let updated = admin
        .update_event(
            event.id,
            &EventPatch {
                location: Some("Field B".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.location, "Field B");
    assert_eq!(updated.title, "Training");

    let err = ann.delete_event(event.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    assert_eq!(
        ann.delete_attendance(event.id).await.unwrap().message,
        "Attendance deleted"
    );
    assert_eq!(
        admin.delete_event(event.id).await.unwrap().message,
        "Event deleted"
    );
    assert!(admin.list_events().await.unwrap().is_empty());
}
