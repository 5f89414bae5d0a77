//! Authentication types for the domain layer.
//!
//! These types represent an authenticated staff member extracted from a
//! bearer token. They have **no provider dependencies** - any identity
//! provider can populate them via the `StaffAuth` port.

use super::{TenantId, UserId};
use thiserror::Error;

/// Staff member authenticated for manual scheduling operations.
///
/// The `tenant_id` scopes every manual operation: a staff member can only
/// reach classes of their own academy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffIdentity {
    /// The staff member's user id at the identity provider.
    pub user_id: UserId,

    /// Tenant the staff member belongs to.
    pub tenant_id: TenantId,
}

impl StaffIdentity {
    /// Creates a new staff identity.
    ///
    /// Typically called by a `StaffAuth` adapter after validating a token.
    pub fn new(user_id: UserId, tenant_id: TenantId) -> Self {
        Self { user_id, tenant_id }
    }
}

/// Authentication errors that can occur during token validation.
///
/// These errors are **domain-centric** - they describe what went wrong from
/// the application's perspective, not the identity provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, expired, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token is valid but does not belong to a staff member.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The identity provider is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_identity_carries_tenant_scope() {
        let user_id = UserId::new();
        let tenant_id = TenantId::new();
        let identity = StaffIdentity::new(user_id, tenant_id);

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.tenant_id, tenant_id);
    }

    #[test]
    fn auth_error_invalid_token_displays_correctly() {
        let err = AuthError::InvalidToken;
        assert_eq!(format!("{}", err), "Invalid or expired token");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(
            format!("{}", err),
            "Auth service unavailable: Connection refused"
        );
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert!(!AuthError::InsufficientPermissions.is_transient());
    }
}
