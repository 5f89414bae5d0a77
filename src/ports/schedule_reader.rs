//! Schedule reader port (read side).
//!
//! Defines the contract for loading schedule rules and exception calendars.
//! Rules and exceptions are authored by external academy-management
//! workflows; generation only ever reads them, so this port has no write
//! operations at all.
//!
//! # Design
//!
//! - **Stable ordering**: tenant and rule listings are ordered by id so a
//!   batch run visits classes in a reproducible sequence
//! - **Window-scoped exceptions**: exception reads take the generation window
//!   so an adapter never loads a class's full exception history

use async_trait::async_trait;

use crate::domain::foundation::{ClassId, DomainError, TenantId};
use crate::domain::scheduling::{GenerationWindow, ScheduleException, ScheduleRule};

/// A class joined with its schedule rule, for manual materialization.
#[derive(Debug, Clone)]
pub struct ClassSchedule {
    /// The class's weekly recurrence rule.
    pub rule: ScheduleRule,

    /// Class display name, echoed back in manual trigger responses.
    pub class_name: String,
}

impl ClassSchedule {
    /// Creates a new class schedule view.
    pub fn new(rule: ScheduleRule, class_name: impl Into<String>) -> Self {
        Self {
            rule,
            class_name: class_name.into(),
        }
    }
}

/// Reader port for schedule rules and exceptions.
#[async_trait]
pub trait ScheduleReader: Send + Sync {
    /// Lists tenants that have at least one auto-generating rule.
    ///
    /// Returns tenant ids in ascending order.
    async fn tenants_with_auto_generate(&self) -> Result<Vec<TenantId>, DomainError>;

    /// Lists the auto-generating rules of one tenant.
    ///
    /// Returns rules ordered by class id. Rules with `auto_generate = false`
    /// are not included; they only materialize via the manual trigger.
    async fn auto_generate_rules(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<ScheduleRule>, DomainError>;

    /// Loads one class with its rule.
    ///
    /// Returns `None` if the class does not exist.
    async fn find_class(&self, class_id: ClassId) -> Result<Option<ClassSchedule>, DomainError>;

    /// Loads the exceptions of one class falling inside the window.
    async fn exceptions_in_window(
        &self,
        class_id: ClassId,
        window: &GenerationWindow,
    ) -> Result<Vec<ScheduleException>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn schedule_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ScheduleReader) {}
    }

    #[test]
    fn class_schedule_new_sets_name() {
        use crate::domain::scheduling::WeekdaySet;

        let rule = ScheduleRule::new(
            ClassId::new(),
            TenantId::new(),
            WeekdaySet::from_indices(&[1]).unwrap(),
            None,
            None,
            true,
        );
        let schedule = ClassSchedule::new(rule, "Beginner Taekwondo");
        assert_eq!(schedule.class_name, "Beginner Taekwondo");
    }
}
