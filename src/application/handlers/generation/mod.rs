//! Session generation handlers.

pub mod materialize_class;
pub mod run_generation;

pub use materialize_class::{
    ManualMaterialization, MaterializeClassCommand, MaterializeClassHandler,
};
pub use run_generation::{RunGenerationHandler, RunSummary};
