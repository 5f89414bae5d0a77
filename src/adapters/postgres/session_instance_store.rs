//! PostgreSQL implementation of SessionInstanceStore.
//!
//! The `UNIQUE (class_id, date)` constraint on `session_instances` is the
//! idempotency anchor: inserts go through `ON CONFLICT DO NOTHING` and
//! report back only the rows that actually landed.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{ClassId, DomainError, ErrorCode};
use crate::domain::scheduling::{GenerationWindow, SessionInstance};
use crate::ports::SessionInstanceStore;

/// PostgreSQL implementation of SessionInstanceStore.
#[derive(Clone)]
pub struct PostgresSessionInstanceStore {
    pool: PgPool,
}

impl PostgresSessionInstanceStore {
    /// Creates a new PostgresSessionInstanceStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionInstanceStore for PostgresSessionInstanceStore {
    async fn existing_dates(
        &self,
        class_id: ClassId,
        window: &GenerationWindow,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT date
            FROM session_instances
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
                format!("Failed to fetch existing session dates: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                row.try_get("date").map_err(|e| {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Failed to get date: {}", e),
                    )
                })
            })
            .collect()
    }

    async fn insert_new_instances(
        &self,
        instances: &[SessionInstance],
    ) -> Result<Vec<NaiveDate>, DomainError> {
        if instances.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<Uuid> = Vec::with_capacity(instances.len());
        let mut class_ids: Vec<Uuid> = Vec::with_capacity(instances.len());
        let mut tenant_ids: Vec<Uuid> = Vec::with_capacity(instances.len());
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(instances.len());
        let mut start_times: Vec<Option<NaiveTime>> = Vec::with_capacity(instances.len());
        let mut end_times: Vec<Option<NaiveTime>> = Vec::with_capacity(instances.len());
        let mut statuses: Vec<&'static str> = Vec::with_capacity(instances.len());
        let mut coach_ids: Vec<Option<Uuid>> = Vec::with_capacity(instances.len());
        let mut notes: Vec<Option<String>> = Vec::with_capacity(instances.len());
        let mut created_ats: Vec<DateTime<Utc>> = Vec::with_capacity(instances.len());

        for instance in instances {
            ids.push(*instance.id.as_uuid());
            class_ids.push(*instance.class_id.as_uuid());
            tenant_ids.push(*instance.tenant_id.as_uuid());
            dates.push(instance.date);
            start_times.push(instance.start_time);
            end_times.push(instance.end_time);
            statuses.push(instance.status.label());
            coach_ids.push(instance.coach_id.map(|c| *c.as_uuid()));
            notes.push(instance.notes.clone());
            created_ats.push(*instance.created_at.as_datetime());
        }

        // One statement for the whole batch. Rows already present keep
        // their data untouched and are simply absent from RETURNING.
        let rows = sqlx::query(
            r#"
            INSERT INTO session_instances (
                id, class_id, tenant_id, date, start_time, end_time,
                status, coach_id, notes, created_at
            )
            SELECT * FROM UNNEST(
                $1::uuid[], $2::uuid[], $3::uuid[], $4::date[], $5::time[],
                $6::time[], $7::text[], $8::uuid[], $9::text[], $10::timestamptz[]
            )
            ON CONFLICT (class_id, date) DO NOTHING
            RETURNING date
            "#,
        )
        .bind(&ids)
        .bind(&class_ids)
        .bind(&tenant_ids)
        .bind(&dates)
        .bind(&start_times)
        .bind(&end_times)
        .bind(&statuses)
        .bind(&coach_ids)
        .bind(&notes)
        .bind(&created_ats)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to insert session instances: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                row.try_get("date").map_err(|e| {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Failed to get date: {}", e),
                    )
                })
            })
            .collect()
    }
}
