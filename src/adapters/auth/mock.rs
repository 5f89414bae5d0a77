//! Mock authentication adapters for testing.
//!
//! These adapters implement the `StaffAuth` port for use in tests and local
//! development, avoiding the need for the platform's real identity provider.
//!
//! # Example
//!
//! ```ignore
//! use rollbook::adapters::auth::MockStaffAuth;
//! use rollbook::domain::foundation::{StaffIdentity, TenantId, UserId};
//!
//! // Create a validator that accepts specific tokens
//! let auth = MockStaffAuth::new()
//!     .with_staff("valid-token", StaffIdentity::new(UserId::new(), TenantId::new()));
//!
//! // Use in tests
//! let result = auth.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, StaffIdentity, TenantId, UserId};
use crate::ports::StaffAuth;

/// Mock staff validator for testing.
///
/// Stores a map of tokens to staff identities. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockStaffAuth {
    /// Map of valid tokens to their associated staff identities
    tokens: RwLock<HashMap<String, StaffIdentity>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockStaffAuth {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a staff identity.
    ///
    /// When `validate()` is called with this token, it returns the identity.
    pub fn with_staff(self, token: impl Into<String>, staff: StaffIdentity) -> Self {
        self.tokens.write().unwrap().insert(token.into(), staff);
        self
    }

    /// Adds a valid token with a fresh staff identity in the given tenant.
    pub fn with_tenant_staff(self, token: impl Into<String>, tenant_id: TenantId) -> Self {
        self.with_staff(token, StaffIdentity::new(UserId::new(), tenant_id))
    }

    /// Forces all validations to return the specified error.
    ///
    /// Useful for testing error handling paths.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, staff: StaffIdentity) {
        self.tokens.write().unwrap().insert(token.into(), staff);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl StaffAuth for MockStaffAuth {
    async fn validate(&self, token: &str) -> Result<StaffIdentity, AuthError> {
        // Check for forced error
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        // Look up the token
        self.tokens
            .read()
            .unwrap()
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}
