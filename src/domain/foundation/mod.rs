//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier newtypes, the UTC timestamp value object, and the
//! error vocabulary shared across the Rollbook domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, StaffIdentity};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClassId, CoachId, SessionInstanceId, TenantId, UserId};
pub use timestamp::Timestamp;
