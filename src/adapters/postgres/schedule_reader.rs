//! PostgreSQL implementation of ScheduleReader.
//!
//! Read-only queries over class schedule rules and exceptions. Rule
//! management lives in the wider platform; this adapter only consumes
//! what generation needs.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ClassId, DomainError, ErrorCode, TenantId};
use crate::domain::scheduling::{
    ExceptionKind, GenerationWindow, ScheduleException, ScheduleRule, WeekdaySet,
};
use crate::ports::{ClassSchedule, ScheduleReader};

/// PostgreSQL implementation of ScheduleReader.
#[derive(Clone)]
pub struct PostgresScheduleReader {
    pool: PgPool,
}

impl PostgresScheduleReader {
    /// Creates a new PostgresScheduleReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleReader for PostgresScheduleReader {
    async fn tenants_with_auto_generate(&self) -> Result<Vec<TenantId>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT tenant_id
            FROM class_schedule_rules
            WHERE auto_generate
            ORDER BY tenant_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to list tenants: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                let id: uuid::Uuid = row.try_get("tenant_id").map_err(|e| {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Failed to get tenant_id: {}", e),
                    )
                })?;
                Ok(TenantId::from_uuid(id))
            })
            .collect()
    }

    async fn auto_generate_rules(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<ScheduleRule>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT class_id, tenant_id, weekdays, start_time, end_time, auto_generate
            FROM class_schedule_rules
            WHERE tenant_id = $1 AND auto_generate
            ORDER BY class_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to fetch schedule rules: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_rule).collect()
    }

    async fn find_class(&self, class_id: ClassId) -> Result<Option<ClassSchedule>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT class_id, tenant_id, weekdays, start_time, end_time, auto_generate, class_name
            FROM class_schedule_rules
            WHERE class_id = $1
            "#,
        )
        .bind(class_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to fetch class: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let class_name: String = row.try_get("class_name").map_err(|e| {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Failed to get class_name: {}", e),
                    )
                })?;
                let rule = row_to_rule(row)?;
                Ok(Some(ClassSchedule::new(rule, class_name)))
            }
            None => Ok(None),
        }
    }

    async fn exceptions_in_window(
        &self,
        class_id: ClassId,
        window: &GenerationWindow,
    ) -> Result<Vec<ScheduleException>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT class_id, date, kind, reason
            FROM schedule_exceptions
            WHERE class_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(class_id.as_uuid())
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to fetch schedule exceptions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_exception).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_exception_kind(s: &str) -> Result<ExceptionKind, DomainError> {
    match s {
        "holiday" => Ok(ExceptionKind::Holiday),
        "cancelled" => Ok(ExceptionKind::Cancelled),
        "rescheduled" => Ok(ExceptionKind::Rescheduled),
        _ => Err(DomainError::new(
            ErrorCode::StorageError,
            format!("Invalid exception kind: {}", s),
        )),
    }
}

fn weekdays_from_indices(indices: Vec<i16>) -> Result<WeekdaySet, DomainError> {
    let bytes: Vec<u8> = indices
        .into_iter()
        .map(|i| {
            u8::try_from(i).map_err(|_| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Invalid weekday index: {}", i),
                )
            })
        })
        .collect::<Result<_, _>>()?;

    WeekdaySet::from_indices(&bytes).map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Invalid weekday data: {}", e),
        )
    })
}

fn row_to_rule(row: sqlx::postgres::PgRow) -> Result<ScheduleRule, DomainError> {
    let class_id: uuid::Uuid = row.try_get("class_id").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get class_id: {}", e),
        )
    })?;

    let tenant_id: uuid::Uuid = row.try_get("tenant_id").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get tenant_id: {}", e),
        )
    })?;

    let weekday_indices: Vec<i16> = row.try_get("weekdays").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get weekdays: {}", e),
        )
    })?;

    let start_time: Option<NaiveTime> = row.try_get("start_time").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get start_time: {}", e),
        )
    })?;

    let end_time: Option<NaiveTime> = row.try_get("end_time").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get end_time: {}", e),
        )
    })?;

    let auto_generate: bool = row.try_get("auto_generate").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get auto_generate: {}", e),
        )
    })?;

    Ok(ScheduleRule::new(
        ClassId::from_uuid(class_id),
        TenantId::from_uuid(tenant_id),
        weekdays_from_indices(weekday_indices)?,
        start_time,
        end_time,
        auto_generate,
    ))
}

fn row_to_exception(row: sqlx::postgres::PgRow) -> Result<ScheduleException, DomainError> {
    let class_id: uuid::Uuid = row.try_get("class_id").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get class_id: {}", e),
        )
    })?;

    let date: NaiveDate = row.try_get("date").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get date: {}", e),
        )
    })?;

    let kind_str: String = row.try_get("kind").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get kind: {}", e),
        )
    })?;
    let kind = str_to_exception_kind(&kind_str)?;

    let reason: String = row.try_get("reason").map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to get reason: {}", e),
        )
    })?;

    Ok(ScheduleException::new(
        ClassId::from_uuid(class_id),
        date,
        kind,
        reason,
    ))
}
