//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Schedule Ports
//!
//! - `ScheduleReader` - Read access to rules and exception calendars
//! - `SessionInstanceStore` - Conflict-safe persistence of generated sessions
//!
//! ## Auth Ports
//!
//! - `ScheduledTriggerGuard` - Authorization of the scheduled run trigger
//! - `StaffAuth` - Staff bearer token validation for manual triggers

mod schedule_reader;
mod session_instance_store;
mod staff_auth;
mod trigger_auth;

pub use schedule_reader::{ClassSchedule, ScheduleReader};
pub use session_instance_store::SessionInstanceStore;
pub use staff_auth::StaffAuth;
pub use trigger_auth::{ScheduledTriggerGuard, TriggerAuthError};
