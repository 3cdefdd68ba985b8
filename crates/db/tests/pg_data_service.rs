//! `PgDataService` against a real database.
//!
//! Ignored by default; run with `DATABASE_URL` set and `cargo test -- --ignored`.

use chrono::{NaiveDate, NaiveTime};
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;
use rollcall_db::models::attendance::UpsertAttendance;
use rollcall_db::models::event::{CreateEvent, UpdateEvent};
use rollcall_db::models::user::CreateUser;
use rollcall_db::{DataService, DbError, PgDataService};
use sqlx::PgPool;

fn new_user(email: &str, name: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        name: name.to_string(),
        is_admin: false,
    }
}

fn training(date: (i32, u32, u32)) -> CreateEvent {
    CreateEvent {
        title: "Training".to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        time_from: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        time_to: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        location: "Field A".to_string(),
        created_by: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_maps_to_unique_violation(pool: PgPool) {
    let service = PgDataService::new(pool);
    service.create_user(&new_user("a@example.com", "Ada")).await.unwrap();

    let err = service
        .create_user(&new_user("a@example.com", "Other"))
        .await
        .unwrap_err();
    match err {
        DbError::UniqueViolation { constraint } => assert_eq!(constraint, "uq_users_email"),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn mixed_case_email_is_stored_lowercase(pool: PgPool) {
    let service = PgDataService::new(pool);
    let user = service
        .create_user(&new_user("Ada@Example.com", "Ada"))
        .await
        .unwrap();
    assert_eq!(user.email, "ada@example.com");

    let found = service.find_user_by_email("ADA@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let err = service
        .create_user(&new_user("ada@EXAMPLE.com", "Other"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_replaces_equipment_in_place(pool: PgPool) {
    let service = PgDataService::new(pool);
    let user = service.create_user(&new_user("a@example.com", "Ada")).await.unwrap();
    let event = service.create_event(&training((2024, 6, 1))).await.unwrap();

    let mut input = UpsertAttendance {
        user_id: user.id,
        event_id: event.id,
        status: AttendanceStatus::Confirmed,
        additional_players: 1,
        comment: None,
        equipment: vec![EquipmentType::Ball, EquipmentType::Pump],
    };
    let first = service.upsert_attendance(&input).await.unwrap();

    input.status = AttendanceStatus::Declined;
    input.equipment.clear();
    let second = service.upsert_attendance(&input).await.unwrap();

    assert_eq!(first.attendance.id, second.attendance.id);
    assert_eq!(first.equipment.len(), 2);
    assert!(second.equipment.is_empty());
    assert_eq!(second.user.name, "Ada");
    assert!(service.confirmed_attendances(event.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn events_list_by_date_and_delete_cascades(pool: PgPool) {
    let service = PgDataService::new(pool);
    let user = service.create_user(&new_user("a@example.com", "Ada")).await.unwrap();
    let late = service.create_event(&training((2024, 7, 1))).await.unwrap();
    let early = service.create_event(&training((2024, 6, 1))).await.unwrap();

    service
        .upsert_attendance(&UpsertAttendance {
            user_id: user.id,
            event_id: late.id,
            status: AttendanceStatus::Confirmed,
            additional_players: 0,
            comment: Some("on my way".into()),
            equipment: vec![EquipmentType::Overboots],
        })
        .await
        .unwrap();

    let listed = service.list_events().await.unwrap();
    assert_eq!(listed[0].event.id, early.id);
    assert_eq!(listed[1].event.id, late.id);
    assert_eq!(listed[1].attendances.len(), 1);
    assert_eq!(listed[1].attendances[0].equipment_types(), [EquipmentType::Overboots]);

    assert!(service.delete_event(late.id).await.unwrap());
    assert!(service.find_attendance(user.id, late.id).await.unwrap().is_none());
    assert!(!service.delete_event(late.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn partial_update_keeps_untouched_fields(pool: PgPool) {
    let service = PgDataService::new(pool);
    let event = service.create_event(&training((2024, 6, 1))).await.unwrap();

    let updated = service
        .update_event(
            event.id,
            &UpdateEvent {
                location: Some("Field B".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Training");
    assert_eq!(updated.location, "Field B");
    assert!(service.update_event(9999, &UpdateEvent::default()).await.unwrap().is_none());
}
