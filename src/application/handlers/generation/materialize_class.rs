//! MaterializeClassHandler - staff-triggered generation for one class.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ClassId, StaffIdentity};
use crate::domain::scheduling::{
    ExceptionCalendar, MaterializationOutcome, ScheduleError, SessionMaterializer,
};
use crate::ports::ScheduleReader;

/// Command to materialize a single class over an explicit window.
#[derive(Debug, Clone, Copy)]
pub struct MaterializeClassCommand {
    pub class_id: ClassId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Result of a manual materialization, echoing the class for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualMaterialization {
    pub class_id: ClassId,
    pub class_name: String,
    pub outcome: MaterializationOutcome,
}

/// Handler for the manual staff trigger.
///
/// Unlike the scheduled run this targets one class with a caller-chosen
/// window, so a rule with auto-generation switched off is still eligible.
/// The caller's tenant must own the class; a class in another tenant is
/// reported as not found rather than as forbidden.
pub struct MaterializeClassHandler {
    reader: Arc<dyn ScheduleReader>,
    materializer: Arc<SessionMaterializer>,
}

impl MaterializeClassHandler {
    pub fn new(reader: Arc<dyn ScheduleReader>, materializer: Arc<SessionMaterializer>) -> Self {
        Self {
            reader,
            materializer,
        }
    }

    /// Materializes sessions for the commanded class and window.
    ///
    /// # Errors
    ///
    /// - `ClassNotFound` when the class does not exist or belongs to a
    ///   different tenant than the caller
    /// - `InvalidDateRange` / `RangeTooLarge` when the window is unusable
    /// - `ClassHasNoWeekday` / `Storage` surfaced from materialization
    pub async fn handle(
        &self,
        command: MaterializeClassCommand,
        staff: StaffIdentity,
    ) -> Result<ManualMaterialization, ScheduleError> {
        // 1. Resolve the class and enforce tenant ownership
        let schedule = self
            .reader
            .find_class(command.class_id)
            .await?
            .filter(|schedule| schedule.rule.tenant_id == staff.tenant_id)
            .ok_or_else(|| ScheduleError::class_not_found(command.class_id))?;

        // 2. Validate the window, span limit included, before touching storage
        let window = self
            .materializer
            .validate_window(command.start_date, command.end_date)?;

        // 3. Load exceptions overlapping the window
        let exceptions = ExceptionCalendar::new(
            self.reader
                .exceptions_in_window(command.class_id, &window)
                .await?,
        );

        // 4. Materialize
        let outcome = self
            .materializer
            .materialize(
                &schedule.rule,
                &exceptions,
                command.start_date,
                command.end_date,
            )
            .await?;

        tracing::info!(
            user_id = %staff.user_id,
            class_id = %command.class_id,
            created = outcome.created_count(),
            skipped = outcome.skipped_count(),
            "manual materialization completed"
        );

        Ok(ManualMaterialization {
            class_id: command.class_id,
            class_name: schedule.class_name,
            outcome,
        })
    }
}
