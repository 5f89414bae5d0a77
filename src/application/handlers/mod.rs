//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod generation;

pub use generation::{
    ManualMaterialization, MaterializeClassCommand, MaterializeClassHandler,
    RunGenerationHandler, RunSummary,
};
