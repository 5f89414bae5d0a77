//! RunGenerationHandler - the scheduled batch across every tenant.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::domain::foundation::{ClassId, Timestamp};
use crate::domain::scheduling::{
    ExceptionCalendar, MaterializationOutcome, ScheduleError, ScheduleRule, SessionMaterializer,
};
use crate::ports::ScheduleReader;

/// Aggregated result of one generation run.
///
/// `errors` maps each failed class to its error message. A run that touched
/// no class at all still yields a summary with all counters at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tenants whose rules were loaded and iterated.
    pub tenants_processed: u64,

    /// Classes the run attempted to materialize.
    pub classes_processed: u64,

    /// Session instances created across all classes.
    pub sessions_generated: u64,

    /// Pattern dates skipped across all classes (exception or existing).
    pub sessions_skipped: u64,

    /// Classes whose materialization failed, with the reason.
    pub errors: BTreeMap<ClassId, String>,
}

impl RunSummary {
    /// Returns true when at least one class failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Handler for the scheduled generation run.
///
/// Walks tenants in id order, and within each tenant the auto-generating
/// rules in class-id order, materializing a fixed look-ahead window per
/// class. One bad class never aborts the run: its error is recorded in the
/// summary and the loop continues.
pub struct RunGenerationHandler {
    reader: Arc<dyn ScheduleReader>,
    materializer: Arc<SessionMaterializer>,
    weeks_ahead: u32,
}

impl RunGenerationHandler {
    pub fn new(
        reader: Arc<dyn ScheduleReader>,
        materializer: Arc<SessionMaterializer>,
        weeks_ahead: u32,
    ) -> Self {
        Self {
            reader,
            materializer,
            weeks_ahead,
        }
    }

    /// Runs generation anchored on today's UTC date.
    pub async fn run(&self) -> Result<RunSummary, ScheduleError> {
        self.run_from(Timestamp::now().date()).await
    }

    /// Runs generation anchored on an explicit date.
    ///
    /// Public so retroactive and deterministic runs (tests, backfills) can
    /// pin the window.
    ///
    /// # Errors
    ///
    /// Returns an error only when the tenant enumeration itself fails; all
    /// later failures are recorded per class or per tenant and the run
    /// continues.
    pub async fn run_from(&self, today: NaiveDate) -> Result<RunSummary, ScheduleError> {
        let window_end = today + Duration::days(i64::from(self.weeks_ahead) * 7);
        let mut summary = RunSummary::default();

        let tenants = self.reader.tenants_with_auto_generate().await?;
        tracing::info!(
            tenants = tenants.len(),
            window_start = %today,
            window_end = %window_end,
            "starting generation run"
        );

        for tenant_id in tenants {
            let rules = match self.reader.auto_generate_rules(tenant_id).await {
                Ok(rules) => rules,
                Err(err) => {
                    tracing::warn!(%tenant_id, error = %err, "skipping tenant, rules could not be loaded");
                    continue;
                }
            };

            summary.tenants_processed += 1;

            for rule in rules {
                let class_id = rule.class_id;
                summary.classes_processed += 1;

                match self.materialize_class(&rule, today, window_end).await {
                    Ok(outcome) => {
                        tracing::debug!(
                            %tenant_id,
                            %class_id,
                            created = outcome.created_count(),
                            skipped = outcome.skipped_count(),
                            "class materialized"
                        );
                        summary.sessions_generated += outcome.created_count() as u64;
                        summary.sessions_skipped += outcome.skipped_count() as u64;
                    }
                    Err(err) => {
                        tracing::warn!(%tenant_id, %class_id, error = %err, "class generation failed");
                        summary.errors.insert(class_id, err.to_string());
                    }
                }
            }
        }

        if summary.has_errors() {
            tracing::warn!(
                tenants = summary.tenants_processed,
                classes = summary.classes_processed,
                generated = summary.sessions_generated,
                skipped = summary.sessions_skipped,
                failed_classes = summary.errors.len(),
                "generation run finished with errors"
            );
        } else {
            tracing::info!(
                tenants = summary.tenants_processed,
                classes = summary.classes_processed,
                generated = summary.sessions_generated,
                skipped = summary.sessions_skipped,
                "generation run finished"
            );
        }

        Ok(summary)
    }

    async fn materialize_class(
        &self,
        rule: &ScheduleRule,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MaterializationOutcome, ScheduleError> {
        let window = self.materializer.validate_window(start, end)?;
        let exceptions = ExceptionCalendar::new(
            self.reader
                .exceptions_in_window(rule.class_id, &window)
                .await?,
        );
        self.materializer
            .materialize(rule, &exceptions, start, end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, TenantId};
    use crate::domain::scheduling::{
        ExceptionKind, GenerationWindow, ScheduleException, SessionInstance, WeekdaySet,
    };
    use crate::ports::{ClassSchedule, SessionInstanceStore};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// Reader backed by plain vectors, with optional failure injection.
    struct MockScheduleReader {
        rules: Vec<ScheduleRule>,
        exceptions: Vec<ScheduleException>,
        fail_tenant_listing: bool,
        fail_rules_for: Option<TenantId>,
        fail_exceptions_for: Option<ClassId>,
    }

    impl MockScheduleReader {
        fn new(rules: Vec<ScheduleRule>) -> Self {
            Self {
                rules,
                exceptions: Vec::new(),
                fail_tenant_listing: false,
                fail_rules_for: None,
                fail_exceptions_for: None,
            }
        }

        fn with_exceptions(mut self, exceptions: Vec<ScheduleException>) -> Self {
            self.exceptions = exceptions;
            self
        }

        fn failing_tenant_listing(mut self) -> Self {
            self.fail_tenant_listing = true;
            self
        }

        fn failing_rules_for(mut self, tenant_id: TenantId) -> Self {
            self.fail_rules_for = Some(tenant_id);
            self
        }

        fn failing_exceptions_for(mut self, class_id: ClassId) -> Self {
            self.fail_exceptions_for = Some(class_id);
            self
        }
    }

    #[async_trait]
    impl ScheduleReader for MockScheduleReader {
        async fn tenants_with_auto_generate(&self) -> Result<Vec<TenantId>, DomainError> {
            if self.fail_tenant_listing {
                return Err(DomainError::new(ErrorCode::StorageError, "listing failed"));
            }
            let mut tenants: Vec<TenantId> = self
                .rules
                .iter()
                .filter(|r| r.auto_generate)
                .map(|r| r.tenant_id)
                .collect();
            tenants.sort_unstable();
            tenants.dedup();
            Ok(tenants)
        }

        async fn auto_generate_rules(
            &self,
            tenant_id: TenantId,
        ) -> Result<Vec<ScheduleRule>, DomainError> {
            if self.fail_rules_for == Some(tenant_id) {
                return Err(DomainError::new(ErrorCode::StorageError, "rules failed"));
            }
            let mut rules: Vec<ScheduleRule> = self
                .rules
                .iter()
                .filter(|r| r.tenant_id == tenant_id && r.auto_generate)
                .cloned()
                .collect();
            rules.sort_unstable_by_key(|r| r.class_id);
            Ok(rules)
        }

        async fn find_class(
            &self,
            class_id: ClassId,
        ) -> Result<Option<ClassSchedule>, DomainError> {
            Ok(self
                .rules
                .iter()
                .find(|r| r.class_id == class_id)
                .map(|r| ClassSchedule::new(r.clone(), "Test Class")))
        }

        async fn exceptions_in_window(
            &self,
            class_id: ClassId,
            window: &GenerationWindow,
        ) -> Result<Vec<ScheduleException>, DomainError> {
            if self.fail_exceptions_for == Some(class_id) {
                return Err(DomainError::new(
                    ErrorCode::StorageError,
                    "exceptions failed",
                ));
            }
            Ok(self
                .exceptions
                .iter()
                .filter(|e| e.class_id == class_id && window.contains(e.date))
                .cloned()
                .collect())
        }
    }

    struct InMemoryStore {
        instances: RwLock<HashMap<(ClassId, NaiveDate), SessionInstance>>,
    }

    impl InMemoryStore {
        fn new() -> Self {
            Self {
                instances: RwLock::new(HashMap::new()),
            }
        }

        async fn count(&self) -> usize {
            self.instances.read().await.len()
        }
    }

    #[async_trait]
    impl SessionInstanceStore for InMemoryStore {
        async fn existing_dates(
            &self,
            class_id: ClassId,
            window: &GenerationWindow,
        ) -> Result<Vec<NaiveDate>, DomainError> {
            let instances = self.instances.read().await;
            let mut dates: Vec<NaiveDate> = instances
                .keys()
                .filter(|(id, date)| *id == class_id && window.contains(*date))
                .map(|(_, date)| *date)
                .collect();
            dates.sort_unstable();
            Ok(dates)
        }

        async fn insert_new_instances(
            &self,
            new_instances: &[SessionInstance],
        ) -> Result<Vec<NaiveDate>, DomainError> {
            let mut instances = self.instances.write().await;
            let mut inserted = Vec::new();
            for instance in new_instances {
                let key = (instance.class_id, instance.date);
                if !instances.contains_key(&key) {
                    instances.insert(key, instance.clone());
                    inserted.push(instance.date);
                }
            }
            Ok(inserted)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(tenant_id: TenantId, indices: &[u8]) -> ScheduleRule {
        ScheduleRule::new(
            ClassId::new(),
            tenant_id,
            WeekdaySet::from_indices(indices).unwrap(),
            None,
            None,
            true,
        )
    }

    fn handler(
        reader: Arc<dyn ScheduleReader>,
        store: Arc<dyn SessionInstanceStore>,
        weeks_ahead: u32,
    ) -> RunGenerationHandler {
        let materializer = Arc::new(SessionMaterializer::new(
            store,
            SessionMaterializer::DEFAULT_MAX_WINDOW_DAYS,
        ));
        RunGenerationHandler::new(reader, materializer, weeks_ahead)
    }

    #[tokio::test]
    async fn run_covers_every_tenant_and_class() {
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let reader = Arc::new(MockScheduleReader::new(vec![
            rule(tenant_a, &[1]),
            rule(tenant_a, &[3]),
            rule(tenant_b, &[5]),
        ]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store.clone(), 1);

        // Window [Mon 2024-01-01, Mon 2024-01-08].
        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary.tenants_processed, 2);
        assert_eq!(summary.classes_processed, 3);
        // Mondays: 01-01 and 01-08; Wednesday: 01-03; Friday: 01-05.
        assert_eq!(summary.sessions_generated, 2 + 1 + 1);
        assert_eq!(summary.sessions_skipped, 0);
        assert!(summary.errors.is_empty());
        assert_eq!(store.count().await, 4);
    }

    #[tokio::test]
    async fn rerun_skips_everything_already_generated() {
        let tenant = TenantId::new();
        let reader = Arc::new(MockScheduleReader::new(vec![rule(tenant, &[1, 3])]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store.clone(), 2);

        let first = handler.run_from(date(2024, 1, 1)).await.unwrap();
        let second = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert!(first.sessions_generated > 0);
        assert_eq!(second.sessions_generated, 0);
        assert_eq!(second.sessions_skipped, first.sessions_generated);
        assert_eq!(store.count().await, first.sessions_generated as usize);
    }

    #[tokio::test]
    async fn exceptions_count_as_skips_not_errors() {
        let tenant = TenantId::new();
        let class_rule = rule(tenant, &[1]);
        let class_id = class_rule.class_id;
        let reader = Arc::new(MockScheduleReader::new(vec![class_rule]).with_exceptions(vec![
            ScheduleException::new(class_id, date(2024, 1, 8), ExceptionKind::Holiday, ""),
        ]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 1);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        // Mondays 01-01 and 01-08; the second is a holiday.
        assert_eq!(summary.sessions_generated, 1);
        assert_eq!(summary.sessions_skipped, 1);
        assert!(summary.errors.is_empty());
    }

    #[tokio::test]
    async fn misconfigured_class_is_isolated_from_the_rest() {
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let tenant_c = TenantId::new();
        let bad_rule = rule(tenant_b, &[]);
        let bad_class = bad_rule.class_id;
        let reader = Arc::new(MockScheduleReader::new(vec![
            rule(tenant_a, &[1]),
            bad_rule,
            rule(tenant_b, &[2]),
            rule(tenant_c, &[3]),
        ]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 1);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary.tenants_processed, 3);
        assert_eq!(summary.classes_processed, 4);
        assert!(summary.sessions_generated > 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[&bad_class].contains("no weekdays"));
    }

    #[tokio::test]
    async fn exception_read_failure_is_isolated_to_its_class() {
        let tenant = TenantId::new();
        let good_rule = rule(tenant, &[1]);
        let broken_rule = rule(tenant, &[2]);
        let broken_class = broken_rule.class_id;
        let reader = Arc::new(
            MockScheduleReader::new(vec![good_rule, broken_rule])
                .failing_exceptions_for(broken_class),
        );
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 1);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary.classes_processed, 2);
        assert!(summary.sessions_generated > 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors.contains_key(&broken_class));
    }

    #[tokio::test]
    async fn tenant_rules_failure_skips_that_tenant_only() {
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let reader = Arc::new(
            MockScheduleReader::new(vec![rule(tenant_a, &[1]), rule(tenant_b, &[1])])
                .failing_rules_for(tenant_a),
        );
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 1);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary.tenants_processed, 1);
        assert_eq!(summary.classes_processed, 1);
        assert!(summary.sessions_generated > 0);
    }

    #[tokio::test]
    async fn tenant_listing_failure_fails_the_run() {
        let reader =
            Arc::new(MockScheduleReader::new(vec![]).failing_tenant_listing());
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 1);

        let result = handler.run_from(date(2024, 1, 1)).await;

        assert!(matches!(result, Err(ScheduleError::Storage(_))));
    }

    #[tokio::test]
    async fn no_eligible_tenants_yields_empty_summary() {
        let reader = Arc::new(MockScheduleReader::new(vec![]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 4);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test]
    async fn window_length_follows_weeks_ahead() {
        let tenant = TenantId::new();
        // Daily rule makes counting exact: weeks * 7 + 1 window dates.
        let reader = Arc::new(MockScheduleReader::new(vec![rule(
            tenant,
            &[0, 1, 2, 3, 4, 5, 6],
        )]));
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(reader, store, 4);

        let summary = handler.run_from(date(2024, 1, 1)).await.unwrap();

        assert_eq!(summary.sessions_generated, 4 * 7 + 1);
    }
}
