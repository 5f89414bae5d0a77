//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod generation;
pub mod middleware;

// Re-export key types for convenience
pub use generation::generation_routes;
pub use generation::GenerationHandlers;
