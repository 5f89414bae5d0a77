//! Staff authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `staff_auth_middleware` - Layer that validates Bearer tokens and injects the staff identity into extensions
//! - `RequireStaff` - Extractor that requires an authenticated staff member
//!
//! # Architecture
//!
//! The middleware uses the `StaffAuth` port, keeping it provider-agnostic.
//! Whether backed by the platform identity service or a mock for testing,
//! the middleware doesn't change.
//!
//! ```text
//! Request → staff_auth_middleware → injects StaffIdentity into extensions
//!                                          ↓
//!                                  Handler → RequireStaff extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, StaffIdentity};
use crate::ports::StaffAuth;

/// Staff auth middleware state - wraps the token validator.
pub type StaffAuthState = Arc<dyn StaffAuth>;

/// Authentication middleware that validates staff Bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `StaffAuth` port
/// 3. On success, injects `StaffIdentity` into request extensions
/// 4. On missing token, continues without injecting (for optional auth routes)
/// 5. On invalid token, returns 401 Unauthorized
///
/// # Token Extraction
///
/// Expects the token in the `Authorization` header with `Bearer` prefix:
/// ```text
/// Authorization: Bearer <token>
/// ```
pub async fn staff_auth_middleware(
    State(auth): State<StaffAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Bearer token from Authorization header
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => {
            // Validate the token
            match auth.validate(token).await {
                Ok(staff) => {
                    // Inject staff identity into request extensions
                    request.extensions_mut().insert(staff);
                    next.run(request).await
                }
                Err(e) => {
                    // Token validation failed
                    let (status, message) = match &e {
                        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                        AuthError::InsufficientPermissions => {
                            (StatusCode::FORBIDDEN, "Insufficient permissions")
                        }
                        AuthError::ServiceUnavailable(msg) => {
                            tracing::error!("Auth service unavailable: {}", msg);
                            (
                                StatusCode::SERVICE_UNAVAILABLE,
                                "Authentication service unavailable",
                            )
                        }
                    };

                    (
                        status,
                        Json(serde_json::json!({
                            "error": message,
                            "code": "AUTH_ERROR"
                        })),
                    )
                        .into_response()
                }
            }
        }
        None => {
            // No token provided - continue without auth
            // Handlers can use RequireStaff to enforce authentication
            next.run(request).await
        }
    }
}

/// Extractor that requires an authenticated staff member.
///
/// Use this extractor in handlers that require staff authentication.
/// If no identity is in the request extensions (i.e., the middleware didn't
/// successfully validate a token), returns 401 Unauthorized.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireStaff(staff): RequireStaff) -> impl IntoResponse {
///     format!("Hello, {}!", staff.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireStaff(pub StaffIdentity);

impl<S> axum::extract::FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<StaffIdentity>()
                .copied()
                .map(RequireStaff)
                .ok_or(StaffRejection::Unauthenticated)
        })
    }
}

/// Rejection type for staff authentication failures.
#[derive(Debug, Clone)]
pub enum StaffRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for StaffRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StaffRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}
