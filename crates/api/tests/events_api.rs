//! Event listing, admin management and the equipment overview.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_event, delete_auth, get_auth, list_events, patch_json_auth,
    post_json_auth, setup, user_with_token,
};
use serde_json::json;

#[tokio::test]
async fn training_scenario() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let (user_a, token_a) = user_with_token(&app, &data, "a@example.com", "User A", false).await;

    // Admin creates the event.
    let response = post_json_auth(
        &app,
        "/api/events",
        json!({
            "title": "Training",
            "date": "2024-06-01",
            "time_from": "18:00",
            "time_to": "20:00",
            "location": "Field A",
        }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event = body_json(response).await["event"].clone();
    assert!(event["id"].is_i64());
    assert_eq!(event["title"], "Training");
    assert_eq!(event["date"], "2024-06-01");
    assert_eq!(event["time_from"], "18:00");
    assert_eq!(event["time_to"], "20:00");
    assert_eq!(event["location"], "Field A");
    let event_id = event["id"].as_i64().unwrap();

    // User A confirms with one extra player and a ball.
    let response = post_json_auth(
        &app,
        &format!("/api/attendance/{event_id}"),
        json!({ "status": "confirmed", "additional_players": 1, "equipment": ["ball"] }),
        &token_a,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let events = list_events(&app, &token_a).await;
    assert_eq!(events[0]["total_participants"], 2);

    let response = get_auth(&app, &format!("/api/events/{event_id}/equipment"), &token_a).await;
    let equipment = body_json(response).await["equipment"].clone();
    assert_eq!(equipment["ball"][0]["user_id"], user_a.id);
    assert_eq!(equipment["ball"][0]["user_name"], "User A");

    // User A declines.
    let response = post_json_auth(
        &app,
        &format!("/api/attendance/{event_id}"),
        json!({ "status": "declined" }),
        &token_a,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let events = list_events(&app, &token_a).await;
    assert_eq!(events[0]["total_participants"], 0);

    let response = get_auth(&app, &format!("/api/events/{event_id}/equipment"), &token_a).await;
    let equipment = body_json(response).await["equipment"].clone();
    assert!(equipment.get("ball").is_none());
}

#[tokio::test]
async fn events_are_listed_by_date_with_nested_attendances() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let (user, token) = user_with_token(&app, &data, "a@example.com", "User A", false).await;

    let later = create_event(&app, &admin_token, "Match", "2024-07-15").await;
    let earlier = create_event(&app, &admin_token, "Training", "2024-06-01").await;

    post_json_auth(
        &app,
        &format!("/api/attendance/{later}"),
        json!({ "status": "confirmed", "comment": "  bringing snacks ", "equipment": ["pump"] }),
        &token,
    )
    .await;

    let events = list_events(&app, &token).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["id"], earlier);
    assert_eq!(events[1]["id"], later);
    assert_eq!(events[0]["attendances"], json!([]));

    let attendance = &events[1]["attendances"][0];
    assert_eq!(attendance["user"], json!({ "id": user.id, "name": "User A" }));
    assert_eq!(attendance["status"], "confirmed");
    assert_eq!(attendance["additional_players"], 0);
    assert_eq!(attendance["comment"], "bringing snacks");
    assert_eq!(attendance["equipment"][0]["type"], "pump");
    assert_eq!(events[1]["total_participants"], 1);
}

#[tokio::test]
async fn total_participants_sums_confirmed_plus_extras() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let event_id = create_event(&app, &admin_token, "Training", "2024-06-01").await;

    let submissions = [
        ("a@example.com", "confirmed", 2),
        ("b@example.com", "confirmed", 0),
        ("c@example.com", "declined", 3),
        ("d@example.com", "confirmed", 1),
    ];
    for (email, status, extra) in submissions {
        let (_user, token) = user_with_token(&app, &data, email, email, false).await;
        let response = post_json_auth(
            &app,
            &format!("/api/attendance/{event_id}"),
            json!({ "status": status, "additional_players": extra }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let events = list_events(&app, &admin_token).await;
    // 3 confirmed + (2 + 0 + 1) extras; the declined row counts for nothing.
    assert_eq!(events[0]["total_participants"], 6);
}

#[tokio::test]
async fn non_admins_are_forbidden_from_event_management() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let (_user, token) = user_with_token(&app, &data, "a@example.com", "User A", false).await;
    let event_id = create_event(&app, &admin_token, "Training", "2024-06-01").await;

    let create = post_json_auth(
        &app,
        "/api/events",
        json!({
            "title": "Sneaky",
            "date": "2024-06-02",
            "time_from": "10:00",
            "time_to": "11:00",
            "location": "Park",
        }),
        &token,
    )
    .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(create).await["error"], "Admin access required");

    let delete = delete_auth(&app, &format!("/api/events/{event_id}"), &token).await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    let update = patch_json_auth(
        &app,
        &format!("/api/events/{event_id}"),
        json!({ "title": "Renamed" }),
        &token,
    )
    .await;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);

    assert_eq!(list_events(&app, &token).await.len(), 1);
}

#[tokio::test]
async fn create_validates_fields() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;

    let inverted = post_json_auth(
        &app,
        "/api/events",
        json!({
            "title": "Training",
            "date": "2024-06-01",
            "time_from": "20:00",
            "time_to": "18:00",
            "location": "Field A",
        }),
        &admin_token,
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(inverted).await["code"], "VALIDATION_ERROR");

    let blank_title = post_json_auth(
        &app,
        "/api/events",
        json!({
            "title": "   ",
            "date": "2024-06-01",
            "time_from": "18:00",
            "time_to": "20:00",
            "location": "Field A",
        }),
        &admin_token,
    )
    .await;
    assert_eq!(blank_title.status(), StatusCode::BAD_REQUEST);

    let bad_time = post_json_auth(
        &app,
        "/api/events",
        json!({
            "title": "Training",
            "date": "2024-06-01",
            "time_from": "6pm",
            "time_to": "20:00",
            "location": "Field A",
        }),
        &admin_token,
    )
    .await;
    assert_eq!(bad_time.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_partial_fields() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let event_id = create_event(&app, &admin_token, "Training", "2024-06-01").await;

    let response = patch_json_auth(
        &app,
        &format!("/api/events/{event_id}"),
        json!({ "location": "Field B", "time_to": "21:30" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let event = body_json(response).await["event"].clone();
    assert_eq!(event["title"], "Training");
    assert_eq!(event["location"], "Field B");
    assert_eq!(event["time_from"], "18:00");
    assert_eq!(event["time_to"], "21:30");

    // Moving the end before the stored start is rejected.
    let response = patch_json_auth(
        &app,
        &format!("/api/events/{event_id}"),
        json!({ "time_to": "17:00" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = patch_json_auth(
        &app,
        "/api/events/9999",
        json!({ "title": "Ghost" }),
        &admin_token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_event_and_its_attendances() {
    let (app, data) = setup();
    let (_admin, admin_token) =
        user_with_token(&app, &data, "coach@example.com", "Coach", true).await;
    let (user, token) = user_with_token(&app, &data, "a@example.com", "User A", false).await;
    let event_id = create_event(&app, &admin_token, "Training", "2024-06-01").await;

    post_json_auth(
        &app,
        &format!("/api/attendance/{event_id}"),
        json!({ "status": "confirmed", "equipment": ["ball", "pump"] }),
        &token,
    )
    .await;

    let response = delete_auth(&app, &format!("/api/events/{event_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Event deleted");

    assert!(list_events(&app, &token).await.is_empty());
    assert!(rollcall_db::DataService::find_attendance(&*data, user.id, event_id)
        .await
        .unwrap()
        .is_none());

    let again = delete_auth(&app, &format!("/api/events/{event_id}"), &admin_token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn equipment_for_unknown_event_is_404() {
    let (app, data) = setup();
    let (_user, token) = user_with_token(&app, &data, "a@example.com", "User A", false).await;

    let response = get_auth(&app, "/api/events/4242/equipment", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_event_id_is_400() {
    let (app, data) = setup();
    let (_user, token) = user_with_token(&app, &data, "a@example.com", "User A", false).await;

    let response = get_auth(&app, "/api/events/abc/equipment", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
