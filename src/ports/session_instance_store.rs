//! SessionInstanceStore port - Interface for writing generated sessions.
//!
//! This port carries the idempotency contract of generation: inserting an
//! instance whose (class_id, date) pair already exists must silently do
//! nothing, and the caller learns which dates actually landed.
//!
//! ## Why insert-or-ignore matters
//!
//! The same window may be materialized more than once:
//! - A platform retry re-fires the nightly trigger
//! - Tonight's window overlaps last night's window by design
//! - Staff run a manual materialization while the batch is mid-flight
//!
//! Uniqueness is enforced by the storage constraint, not by the advisory
//! read-before-write; two overlapping invocations racing past the read must
//! still produce exactly one instance per (class_id, date).
//!
//! All generation writes go through this port. There is no update or delete:
//! attendance and cancellation workflows own the instances afterwards.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ClassId, DomainError};
use crate::domain::scheduling::{GenerationWindow, SessionInstance};

/// Port for persisting materialized session instances.
///
/// Implementations must back `insert_new_instances` with a database
/// constraint (UNIQUE on (class_id, date)) so concurrent materializations
/// cannot both insert the same occurrence.
#[async_trait]
pub trait SessionInstanceStore: Send + Sync {
    /// Lists the dates in the window for which this class already has an
    /// instance.
    ///
    /// Advisory only: the result lets the materializer report accurate skip
    /// reasons, while correctness rests on `insert_new_instances`.
    async fn existing_dates(
        &self,
        class_id: ClassId,
        window: &GenerationWindow,
    ) -> Result<Vec<NaiveDate>, DomainError>;

    /// Inserts instances, ignoring any whose (class_id, date) already exists.
    ///
    /// Uses `ON CONFLICT DO NOTHING` semantics and returns the dates that
    /// were actually inserted, so a caller that lost a race can tell which of
    /// its candidates became rows.
    async fn insert_new_instances(
        &self,
        instances: &[SessionInstance],
    ) -> Result<Vec<NaiveDate>, DomainError>;
}
