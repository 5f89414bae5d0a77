//! Concrete session instances materialized from schedule rules.

use crate::domain::foundation::{ClassId, CoachId, SessionInstanceId, TenantId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ScheduleRule;

/// Lifecycle status of a session instance.
///
/// This core only ever writes `Scheduled`; attendance and cancellation
/// workflows move instances through the other states later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created by generation, not yet held.
    Scheduled,
    /// Held and attendance recorded.
    Completed,
    /// Cancelled after creation.
    Cancelled,
}

impl SessionStatus {
    /// Returns the lowercase label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One concrete, individually addressable occurrence of a class.
///
/// # Invariants
///
/// - (`class_id`, `date`) is globally unique; the database constraint is the
///   idempotency anchor for generation
/// - Instances are insert-only for this core: attendance, coach reassignment,
///   and deletion belong to external workflows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInstance {
    /// Unique identifier for this instance.
    pub id: SessionInstanceId,

    /// Class this instance belongs to.
    pub class_id: ClassId,

    /// Tenant owning the class.
    pub tenant_id: TenantId,

    /// Calendar date the session takes place on.
    pub date: NaiveDate,

    /// Start time copied from the rule at generation time.
    pub start_time: Option<NaiveTime>,

    /// End time copied from the rule at generation time.
    pub end_time: Option<NaiveTime>,

    /// Lifecycle status.
    pub status: SessionStatus,

    /// Coach assigned by staffing workflows, if any.
    pub coach_id: Option<CoachId>,

    /// Free-text notes added by staff, if any.
    pub notes: Option<String>,

    /// When generation created this instance.
    pub created_at: Timestamp,
}

impl SessionInstance {
    /// Materializes an instance of `rule` on `date`.
    ///
    /// New instances start `Scheduled` with no coach and no notes; times are
    /// snapshotted from the rule so later rule edits do not rewrite history.
    pub fn from_rule(rule: &ScheduleRule, date: NaiveDate) -> Self {
        Self {
            id: SessionInstanceId::new(),
            class_id: rule.class_id,
            tenant_id: rule.tenant_id,
            date,
            start_time: rule.start_time,
            end_time: rule.end_time,
            status: SessionStatus::Scheduled,
            coach_id: None,
            notes: None,
            created_at: Timestamp::now(),
        }
    }
}
