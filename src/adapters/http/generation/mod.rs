//! HTTP adapter for session generation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, MaterializeRequest, MaterializeResponse, RunResponse, SkippedDateResponse,
};
pub use handlers::GenerationHandlers;
pub use routes::generation_routes;
