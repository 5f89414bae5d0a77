//! Authentication adapters.
//!
//! Implementations of the `StaffAuth` and `ScheduledTriggerGuard` ports:
//!
//! - `shared_secret` - Constant-time shared-secret guard for the scheduler
//! - `mock` - Test implementations that don't require external services

mod mock;
mod shared_secret;

pub use mock::MockStaffAuth;
pub use shared_secret::SharedSecretTriggerGuard;
