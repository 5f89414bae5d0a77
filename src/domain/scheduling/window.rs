//! Validated inclusive date window for generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ScheduleError;

/// Inclusive date range `[start, end]` a materialization expands over.
///
/// Construction rejects inverted ranges. The maximum-span check is the
/// materializer's, against its configured limit, so window values themselves
/// stay reusable for advisory reads of any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl GenerationWindow {
    /// Creates a window from inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDateRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScheduleError> {
        if start > end {
            return Err(ScheduleError::invalid_date_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// First date of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days between start and end; a single-day window spans 0.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Checks whether the date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every date of the window in order, both bounds included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}
