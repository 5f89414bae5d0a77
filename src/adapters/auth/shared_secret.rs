//! Shared-secret guard for the scheduled trigger endpoint.
//!
//! The platform scheduler calls the generation endpoint with a bearer token
//! that must match the configured secret exactly. Comparison is constant
//! time so the token cannot be guessed byte by byte.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::ports::{ScheduledTriggerGuard, TriggerAuthError};

/// Guard that compares the presented bearer token against one shared secret.
pub struct SharedSecretTriggerGuard {
    secret: SecretString,
}

impl SharedSecretTriggerGuard {
    /// Creates a guard around the configured trigger secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl ScheduledTriggerGuard for SharedSecretTriggerGuard {
    async fn authorize(&self, bearer: Option<&str>) -> Result<(), TriggerAuthError> {
        let token = bearer.ok_or(TriggerAuthError::MissingCredential)?;

        let expected = self.secret.expose_secret().as_bytes();
        if token.as_bytes().ct_eq(expected).unwrap_u8() != 1 {
            return Err(TriggerAuthError::InvalidCredential);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> SharedSecretTriggerGuard {
        SharedSecretTriggerGuard::new(SecretString::new(
            "correct-horse-battery-staple-0123456789".to_string(),
        ))
    }

    #[tokio::test]
    async fn accepts_the_exact_secret() {
        let result = guard()
            .authorize(Some("correct-horse-battery-staple-0123456789"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_a_missing_token() {
        let result = guard().authorize(None).await;

        assert_eq!(result, Err(TriggerAuthError::MissingCredential));
    }

    #[tokio::test]
    async fn rejects_a_wrong_token() {
        let result = guard().authorize(Some("wrong-secret")).await;

        assert_eq!(result, Err(TriggerAuthError::InvalidCredential));
    }

    #[tokio::test]
    async fn rejects_the_secret_with_a_suffix() {
        let result = guard()
            .authorize(Some("correct-horse-battery-staple-0123456789x"))
            .await;

        assert_eq!(result, Err(TriggerAuthError::InvalidCredential));
    }

    #[tokio::test]
    async fn rejects_an_empty_token() {
        let result = guard().authorize(Some("")).await;

        assert_eq!(result, Err(TriggerAuthError::InvalidCredential));
    }
}
