//! Scheduling module - Recurring class-session generation.
//!
//! The types here model one class's weekly recurrence ([`ScheduleRule`] with
//! a [`WeekdaySet`]), the dates it does not meet ([`ExceptionCalendar`]), and
//! the concrete occurrences generation produces ([`SessionInstance`]). The
//! [`SessionMaterializer`] ties them together: it expands a validated
//! [`GenerationWindow`] into instances, idempotently.

mod errors;
mod exception;
mod materializer;
mod schedule_rule;
mod session_instance;
mod weekday_set;
mod window;

pub use errors::ScheduleError;
pub use exception::{ExceptionCalendar, ExceptionKind, ScheduleException};
pub use materializer::{MaterializationOutcome, SessionMaterializer, SkippedDate};
pub use schedule_rule::ScheduleRule;
pub use session_instance::{SessionInstance, SessionStatus};
pub use weekday_set::WeekdaySet;
pub use window::GenerationWindow;
