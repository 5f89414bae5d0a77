//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Staff token validation and the scheduled trigger guard
//! - `http` - REST API surface
//! - `postgres` - Database-backed persistence

pub mod auth;
pub mod http;
pub mod postgres;

pub use auth::{MockStaffAuth, SharedSecretTriggerGuard};
pub use postgres::{PostgresScheduleReader, PostgresSessionInstanceStore};
