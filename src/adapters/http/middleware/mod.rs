//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `staff_auth` - Staff authentication middleware and extractors

pub mod staff_auth;

pub use staff_auth::{staff_auth_middleware, RequireStaff, StaffAuthState, StaffRejection};
