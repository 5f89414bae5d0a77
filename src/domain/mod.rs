//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `scheduling` - Recurring schedule rules, exception calendars, and the
//!   session materializer that expands them into concrete instances

pub mod foundation;
pub mod scheduling;
