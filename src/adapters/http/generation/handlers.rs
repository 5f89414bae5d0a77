//! HTTP handlers for session generation endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireStaff;
use crate::application::handlers::{
    MaterializeClassCommand, MaterializeClassHandler, RunGenerationHandler,
};
use crate::domain::foundation::ClassId;
use crate::domain::scheduling::ScheduleError;
use crate::ports::ScheduledTriggerGuard;

use super::dto::{ErrorResponse, MaterializeRequest, MaterializeResponse, RunResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GenerationHandlers {
    run_handler: Arc<RunGenerationHandler>,
    materialize_handler: Arc<MaterializeClassHandler>,
    trigger_guard: Arc<dyn ScheduledTriggerGuard>,
}

impl GenerationHandlers {
    pub fn new(
        run_handler: Arc<RunGenerationHandler>,
        materialize_handler: Arc<MaterializeClassHandler>,
        trigger_guard: Arc<dyn ScheduledTriggerGuard>,
    ) -> Self {
        Self {
            run_handler,
            materialize_handler,
            trigger_guard,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/generation/run - Scheduled trigger for the batch run
///
/// Authenticated with the shared trigger secret rather than a staff token,
/// so the guard is checked here instead of in middleware. A run with
/// per-class failures still returns 200; the failures ride in the body.
pub async fn run_generation(
    State(handlers): State<GenerationHandlers>,
    headers: HeaderMap,
) -> Response {
    let bearer = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Err(e) = handlers.trigger_guard.authorize(bearer).await {
        tracing::warn!(error = %e, "scheduled trigger rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Invalid trigger credential")),
        )
            .into_response();
    }

    match handlers.run_handler.run().await {
        Ok(summary) => {
            let response: RunResponse = summary.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/generation/materialize - Manual staff trigger for one class
pub async fn materialize_class(
    State(handlers): State<GenerationHandlers>,
    RequireStaff(staff): RequireStaff,
    Json(req): Json<MaterializeRequest>,
) -> Response {
    let class_id = match req.class_id.parse::<ClassId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid class ID")),
            )
                .into_response()
        }
    };

    let cmd = MaterializeClassCommand {
        class_id,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    match handlers.materialize_handler.handle(cmd, staff).await {
        Ok(result) => {
            let response: MaterializeResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_schedule_error(error: ScheduleError) -> Response {
    let status = match &error {
        ScheduleError::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
        ScheduleError::RangeTooLarge { .. } => StatusCode::BAD_REQUEST,
        ScheduleError::ClassHasNoWeekday(_) => StatusCode::BAD_REQUEST,
        ScheduleError::ClassNotFound(_) => StatusCode::NOT_FOUND,
        ScheduleError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorResponse::from_schedule_error(&error))).into_response()
}
