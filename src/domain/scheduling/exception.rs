//! Date-specific exceptions to a weekly schedule.

use crate::domain::foundation::ClassId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a pattern date does not produce a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    /// Academy-wide or class-level holiday.
    Holiday,
    /// One-off cancellation of this date.
    Cancelled,
    /// Session moved elsewhere. The original date stays a gap; the replacement
    /// date is authored as its own rule or manual session, not linked here.
    Rescheduled,
}

impl ExceptionKind {
    /// Returns the lowercase label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ExceptionKind::Holiday => "holiday",
            ExceptionKind::Cancelled => "cancelled",
            ExceptionKind::Rescheduled => "rescheduled",
        }
    }
}

impl std::fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single exception entry: this class does not meet on this date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    /// Class the exception applies to.
    pub class_id: ClassId,

    /// Date the exception suppresses.
    pub date: NaiveDate,

    /// Why the date is suppressed.
    pub kind: ExceptionKind,

    /// Free-text reason entered by staff. May be empty.
    pub reason: String,
}

impl ScheduleException {
    /// Creates a new exception entry.
    pub fn new(
        class_id: ClassId,
        date: NaiveDate,
        kind: ExceptionKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            class_id,
            date,
            kind,
            reason: reason.into(),
        }
    }

    /// Reason reported for the skipped date.
    ///
    /// Falls back to the kind label when staff left the free-text blank, so a
    /// skip always carries a human-readable reason.
    pub fn display_reason(&self) -> &str {
        if self.reason.trim().is_empty() {
            self.kind.label()
        } else {
            &self.reason
        }
    }
}

/// Per-class exception lookup over a window.
///
/// At most one exception per date: the backing table carries a unique index on
/// (class_id, date), and construction keeps the first entry per date should a
/// reader ever hand in duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionCalendar {
    entries: BTreeMap<NaiveDate, ScheduleException>,
}

impl ExceptionCalendar {
    /// Builds a calendar from exception entries.
    pub fn new(exceptions: Vec<ScheduleException>) -> Self {
        let mut entries = BTreeMap::new();
        for exception in exceptions {
            entries.entry(exception.date).or_insert(exception);
        }
        Self { entries }
    }

    /// An empty calendar.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the exception for a date, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&ScheduleException> {
        self.entries.get(&date)
    }

    /// Number of exception dates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no exceptions are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
