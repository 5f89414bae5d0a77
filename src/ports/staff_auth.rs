//! StaffAuth port - Interface for validating staff bearer tokens.
//!
//! Manual materialization is a staff action, so its endpoint authenticates a
//! person rather than the platform scheduler. Token issuance and the identity
//! provider live elsewhere in the platform; this port only turns a presented
//! token into a [`StaffIdentity`] or an error.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, StaffIdentity};

/// Port for validating staff session tokens.
#[async_trait]
pub trait StaffAuth: Send + Sync {
    /// Validates a bearer token and resolves the staff member behind it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for unknown or expired tokens,
    /// [`AuthError::InsufficientPermissions`] for valid tokens that do not
    /// belong to staff, and [`AuthError::ServiceUnavailable`] when the
    /// identity provider cannot be reached.
    async fn validate(&self, token: &str) -> Result<StaffIdentity, AuthError>;
}
