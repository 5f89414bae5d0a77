//! ScheduledTriggerGuard port - Authorization for the scheduled run endpoint.
//!
//! The nightly batch is fired by the platform scheduler over HTTP, not by a
//! logged-in person, so the usual staff authentication does not apply. This
//! port names that capability: "may this caller start a generation run".
//! The production adapter compares a shared secret in constant time; swapping
//! in mTLS or a signed-token check later only touches the adapter.

use async_trait::async_trait;
use thiserror::Error;

/// Why a scheduled trigger was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerAuthError {
    /// No bearer credential was presented.
    #[error("Missing trigger credential")]
    MissingCredential,

    /// The presented credential does not match.
    #[error("Invalid trigger credential")]
    InvalidCredential,
}

/// Port guarding the scheduled generation trigger.
#[async_trait]
pub trait ScheduledTriggerGuard: Send + Sync {
    /// Authorizes a scheduled trigger attempt.
    ///
    /// `bearer` is the credential stripped from the Authorization header, or
    /// `None` when the header was absent or not a bearer scheme.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerAuthError`] when the caller may not start a run. Both
    /// variants map to 401; they are distinct so logs can tell a misconfigured
    /// scheduler (missing) from a wrong secret (invalid).
    async fn authorize(&self, bearer: Option<&str>) -> Result<(), TriggerAuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn scheduled_trigger_guard_is_object_safe() {
        fn _accepts_dyn(_guard: &dyn ScheduledTriggerGuard) {}
    }

    #[test]
    fn errors_display_distinctly() {
        assert_eq!(
            format!("{}", TriggerAuthError::MissingCredential),
            "Missing trigger credential"
        );
        assert_eq!(
            format!("{}", TriggerAuthError::InvalidCredential),
            "Invalid trigger credential"
        );
    }
}
