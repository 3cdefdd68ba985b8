//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads take `&PgPool`; writes that must share a transaction take
//! `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod attendance_repo;
pub mod equipment_repo;
pub mod event_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use equipment_repo::EquipmentRepo;
pub use event_repo::EventRepo;
pub use user_repo::UserRepo;
