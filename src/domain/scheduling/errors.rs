//! Scheduling-specific error types.

use crate::domain::foundation::{ClassId, DomainError, ErrorCode};
use chrono::NaiveDate;

/// Errors raised while materializing sessions or orchestrating a run.
///
/// The first three variants reject a single materialization call; they never
/// abort a batch run, which records them per class instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Window start is after window end.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Window spans more days than the configured limit.
    RangeTooLarge { days: i64, max_days: i64 },
    /// Auto-generation is enabled but the rule has no weekdays.
    ClassHasNoWeekday(ClassId),
    /// Class was not found. Also reported for classes outside the caller's
    /// tenant, so the endpoint does not leak other tenants' class ids.
    ClassNotFound(ClassId),
    /// Unexpected storage failure.
    Storage(String),
}

impl ScheduleError {
    pub fn invalid_date_range(start: NaiveDate, end: NaiveDate) -> Self {
        ScheduleError::InvalidDateRange { start, end }
    }
    pub fn range_too_large(days: i64, max_days: i64) -> Self {
        ScheduleError::RangeTooLarge { days, max_days }
    }
    pub fn class_has_no_weekday(class_id: ClassId) -> Self {
        ScheduleError::ClassHasNoWeekday(class_id)
    }
    pub fn class_not_found(class_id: ClassId) -> Self {
        ScheduleError::ClassNotFound(class_id)
    }
    pub fn storage(message: impl Into<String>) -> Self {
        ScheduleError::Storage(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            ScheduleError::RangeTooLarge { .. } => ErrorCode::RangeTooLarge,
            ScheduleError::ClassHasNoWeekday(_) => ErrorCode::ClassHasNoWeekday,
            ScheduleError::ClassNotFound(_) => ErrorCode::ClassNotFound,
            ScheduleError::Storage(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ScheduleError::InvalidDateRange { start, end } => {
                format!("Invalid date range: start {} is after end {}", start, end)
            }
            ScheduleError::RangeTooLarge { days, max_days } => {
                format!(
                    "Requested range spans {} days, exceeding the limit of {}",
                    days, max_days
                )
            }
            ScheduleError::ClassHasNoWeekday(id) => {
                format!(
                    "Class {} has auto-generation enabled but no weekdays configured",
                    id
                )
            }
            ScheduleError::ClassNotFound(id) => format!("Class not found: {}", id),
            ScheduleError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScheduleError {}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        // Port failures reaching the scheduling layer are storage failures;
        // not-found and validation outcomes are modeled explicitly above.
        ScheduleError::Storage(err.to_string())
    }
}
