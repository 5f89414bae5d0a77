//! Weekly schedule rule for a class.

use crate::domain::foundation::{ClassId, TenantId};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::WeekdaySet;

/// Weekly recurrence pattern for one class.
///
/// Rules are authored by academy staff in external management workflows; this
/// core treats them as read-only input.
///
/// # Invariants
///
/// - `weekdays` only ever holds indices 0-6 (enforced by [`WeekdaySet`])
/// - An empty `weekdays` with `auto_generate = true` is a configuration error,
///   surfaced when the class is materialized rather than here, so a single bad
///   rule cannot poison rule loading for its tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// Class this rule generates sessions for.
    pub class_id: ClassId,

    /// Tenant owning the class.
    pub tenant_id: TenantId,

    /// Weekdays the class meets on.
    pub weekdays: WeekdaySet,

    /// Session start time, when the class has a fixed slot.
    pub start_time: Option<NaiveTime>,

    /// Session end time. Ordering against `start_time` is not validated here;
    /// the authoring workflow owns that rule.
    pub end_time: Option<NaiveTime>,

    /// Whether the nightly batch should expand this rule.
    pub auto_generate: bool,
}

impl ScheduleRule {
    /// Creates a new schedule rule.
    pub fn new(
        class_id: ClassId,
        tenant_id: TenantId,
        weekdays: WeekdaySet,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        auto_generate: bool,
    ) -> Self {
        Self {
            class_id,
            tenant_id,
            weekdays,
            start_time,
            end_time,
            auto_generate,
        }
    }

    /// Checks whether the weekly pattern includes the given date's weekday.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon_wed_rule() -> ScheduleRule {
        ScheduleRule::new(
            ClassId::new(),
            TenantId::new(),
            WeekdaySet::from_indices(&[1, 3]).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0),
            NaiveTime::from_hms_opt(17, 0, 0),
            true,
        )
    }

    #[test]
    fn occurs_on_matches_pattern_weekdays() {
        let rule = mon_wed_rule();
        // 2024-01-01 is a Monday, 2024-01-03 a Wednesday, 2024-01-02 a Tuesday
        assert!(rule.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(rule.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
        assert!(!rule.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn rule_without_weekdays_occurs_never() {
        let rule = ScheduleRule::new(
            ClassId::new(),
            TenantId::new(),
            WeekdaySet::from_indices(&[]).unwrap(),
            None,
            None,
            false,
        );
        assert!(!rule.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }
}
