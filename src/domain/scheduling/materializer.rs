//! Session materializer - expands a weekly rule over a date window.
//!
//! Given one class's [`ScheduleRule`] and [`ExceptionCalendar`], the
//! materializer walks an inclusive window, decides per date whether a session
//! should exist, and persists the new instances through one conflict-safe
//! batch insert. A date yields a session exactly when its weekday is in the
//! rule's pattern, no exception suppresses it, and no instance for
//! (class_id, date) exists yet.
//!
//! The expansion itself is pure; storage is consulted once for the advisory
//! existing-dates read and once for the insert. The unique constraint behind
//! [`SessionInstanceStore::insert_new_instances`] is what makes repeated or
//! overlapping invocations safe, and the insert reports which dates actually
//! landed, so candidates that lost a concurrent race are reported as already
//! existing rather than created.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::ports::SessionInstanceStore;

use super::{ExceptionCalendar, GenerationWindow, ScheduleError, ScheduleRule, SessionInstance};

/// A pattern date suppressed by an exception, with the reported reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDate {
    /// The suppressed date.
    pub date: NaiveDate,

    /// Staff-entered reason, or the exception kind label when blank.
    pub reason: String,
}

/// What one materialization call did, all lists in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializationOutcome {
    /// Dates for which a new instance was inserted.
    pub created: Vec<NaiveDate>,

    /// Pattern dates suppressed by exceptions.
    pub skipped_exceptions: Vec<SkippedDate>,

    /// Pattern dates that already had an instance, including candidates that
    /// lost a concurrent race at insert time.
    pub skipped_existing: Vec<NaiveDate>,
}

impl MaterializationOutcome {
    /// Number of instances created by this call.
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    /// Number of pattern dates skipped, for either reason.
    pub fn skipped_count(&self) -> usize {
        self.skipped_exceptions.len() + self.skipped_existing.len()
    }
}

/// Expands weekly schedule rules into concrete session instances.
pub struct SessionMaterializer {
    store: Arc<dyn SessionInstanceStore>,
    max_window_days: i64,
}

impl SessionMaterializer {
    /// Default limit on the window span in days.
    pub const DEFAULT_MAX_WINDOW_DAYS: i64 = 180;

    /// Creates a materializer writing through the given store.
    pub fn new(store: Arc<dyn SessionInstanceStore>, max_window_days: i64) -> Self {
        Self {
            store,
            max_window_days,
        }
    }

    /// Builds the window for `[start, end]`, enforcing the span limit.
    ///
    /// Callers that read storage before materializing should validate the
    /// window through this first, so a bad request costs no storage access.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidDateRange`] when `start > end`
    /// - [`ScheduleError::RangeTooLarge`] when the span exceeds the
    ///   configured limit
    pub fn validate_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<GenerationWindow, ScheduleError> {
        let window = GenerationWindow::new(start, end)?;

        let span = window.span_days();
        if span > self.max_window_days {
            return Err(ScheduleError::range_too_large(span, self.max_window_days));
        }

        Ok(window)
    }

    /// Materializes sessions for `rule` over `[window_start, window_end]`.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidDateRange`] when `window_start > window_end`
    /// - [`ScheduleError::RangeTooLarge`] when the span exceeds the configured
    ///   limit; rejected before any storage access so a runaway request costs
    ///   nothing
    /// - [`ScheduleError::ClassHasNoWeekday`] when the rule auto-generates but
    ///   has no weekdays; a rule without weekdays that is *not* auto-generated
    ///   yields an empty outcome instead
    /// - [`ScheduleError::Storage`] when a storage call fails
    pub async fn materialize(
        &self,
        rule: &ScheduleRule,
        exceptions: &ExceptionCalendar,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<MaterializationOutcome, ScheduleError> {
        let window = self.validate_window(window_start, window_end)?;

        if rule.weekdays.is_empty() && rule.auto_generate {
            return Err(ScheduleError::class_has_no_weekday(rule.class_id));
        }

        let (candidates, skipped_exceptions) = expand_candidates(rule, exceptions, &window);

        if candidates.is_empty() {
            return Ok(MaterializationOutcome {
                created: Vec::new(),
                skipped_exceptions,
                skipped_existing: Vec::new(),
            });
        }

        let existing: HashSet<NaiveDate> = self
            .store
            .existing_dates(rule.class_id, &window)
            .await?
            .into_iter()
            .collect();

        let mut skipped_existing = Vec::new();
        let mut to_insert = Vec::new();
        for date in candidates {
            if existing.contains(&date) {
                skipped_existing.push(date);
            } else {
                to_insert.push(SessionInstance::from_rule(rule, date));
            }
        }

        let mut created = Vec::new();
        if !to_insert.is_empty() {
            let inserted: HashSet<NaiveDate> = self
                .store
                .insert_new_instances(&to_insert)
                .await?
                .into_iter()
                .collect();

            for instance in &to_insert {
                if inserted.contains(&instance.date) {
                    created.push(instance.date);
                } else {
                    // Lost a concurrent race after the advisory read; the row
                    // exists, so report it as existing, not created.
                    skipped_existing.push(instance.date);
                }
            }
            skipped_existing.sort_unstable();
        }

        Ok(MaterializationOutcome {
            created,
            skipped_exceptions,
            skipped_existing,
        })
    }
}

/// Splits the window's pattern dates into insert candidates and exception
/// skips. Dates whose weekday is outside the pattern are ignored entirely,
/// whether or not an exception exists for them.
fn expand_candidates(
    rule: &ScheduleRule,
    exceptions: &ExceptionCalendar,
    window: &GenerationWindow,
) -> (Vec<NaiveDate>, Vec<SkippedDate>) {
    let mut candidates = Vec::new();
    let mut skipped = Vec::new();

    for date in window.days() {
        if !rule.occurs_on(date) {
            continue;
        }
        match exceptions.get(date) {
            Some(exception) => skipped.push(SkippedDate {
                date,
                reason: exception.display_reason().to_string(),
            }),
            None => candidates.push(date),
        }
    }

    (candidates, skipped)
}
