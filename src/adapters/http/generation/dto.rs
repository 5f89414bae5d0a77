//! HTTP DTOs for session generation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{ManualMaterialization, RunSummary};
use crate::domain::scheduling::ScheduleError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to materialize one class over an explicit window.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterializeRequest {
    pub class_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Summary of one scheduled generation run.
///
/// `errors_count` is what alerting keys on; the `errors` map carries the
/// per-class detail for operators.
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub tenants_processed: u64,
    pub classes_processed: u64,
    pub sessions_generated: u64,
    pub sessions_skipped: u64,
    pub errors_count: usize,
    /// Failed classes keyed by class id, empty when the run was clean.
    pub errors: BTreeMap<String, String>,
}

impl From<RunSummary> for RunResponse {
    fn from(summary: RunSummary) -> Self {
        Self {
            tenants_processed: summary.tenants_processed,
            classes_processed: summary.classes_processed,
            sessions_generated: summary.sessions_generated,
            sessions_skipped: summary.sessions_skipped,
            errors_count: summary.errors.len(),
            errors: summary
                .errors
                .into_iter()
                .map(|(class_id, message)| (class_id.to_string(), message))
                .collect(),
        }
    }
}

/// A pattern date skipped for an exception, with the reason shown to staff.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDateResponse {
    pub date: NaiveDate,
    pub reason: String,
}

/// Result of a manual materialization.
#[derive(Debug, Clone, Serialize)]
pub struct MaterializeResponse {
    pub class_id: String,
    pub class_name: String,
    pub created: Vec<NaiveDate>,
    pub skipped_exceptions: Vec<SkippedDateResponse>,
    pub skipped_existing: Vec<NaiveDate>,
}

impl From<ManualMaterialization> for MaterializeResponse {
    fn from(result: ManualMaterialization) -> Self {
        Self {
            class_id: result.class_id.to_string(),
            class_name: result.class_name,
            created: result.outcome.created,
            skipped_exceptions: result
                .outcome
                .skipped_exceptions
                .into_iter()
                .map(|s| SkippedDateResponse {
                    date: s.date,
                    reason: s.reason,
                })
                .collect(),
            skipped_existing: result.outcome.skipped_existing,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }

    /// Carries the error's own wire code, e.g. `INVALID_DATE_RANGE`.
    pub fn from_schedule_error(error: &ScheduleError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message(),
        }
    }
}
