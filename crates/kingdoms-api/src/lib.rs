//! HTTP API for the kingdoms service.
//!
//! A thin Axum layer over [`KingdomEngine`](kingdoms_core::KingdomEngine):
//! handlers validate request payloads, call the engine, and map engine
//! outcomes onto status codes. Routes are generic over the store so the
//! same router serves every backend.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::{ApiError, ErrorBody};
pub use openapi::ApiDoc;
pub use router::build_router;
pub use server::{ServerError, serve, start_server};
pub use state::AppState;
