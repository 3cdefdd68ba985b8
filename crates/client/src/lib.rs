//! Client SDK and terminal front end for the Rollcall API.
//!
//! - [`api::ApiClient`] -- typed HTTP calls with normalized errors.
//! - [`store`] -- auth and app state holders that re-fetch after mutations.
//! - [`views`] -- dashboard grid, attendance form and admin panels as plain
//!   view models with terminal renderings.

pub mod api;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;
pub mod views;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
