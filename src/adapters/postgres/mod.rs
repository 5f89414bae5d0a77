//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresScheduleReader` - Read-side queries over rules and exceptions
//! - `PostgresSessionInstanceStore` - Insert-or-ignore writes of generated sessions

mod schedule_reader;
mod session_instance_store;

pub use schedule_reader::PostgresScheduleReader;
pub use session_instance_store::PostgresSessionInstanceStore;
