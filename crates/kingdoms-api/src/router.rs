//! Axum router construction for the kingdoms API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use kingdoms_core::KingdomStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::openapi;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// - `GET /health` -- liveness probe
/// - `POST /kingdoms` -- found a kingdom
/// - `GET /kingdoms` -- list kingdoms
/// - `GET /kingdoms/richest` -- kingdom with the most gold
/// - `GET /kingdoms/{id}` -- single kingdom
/// - `POST /kingdoms/{id}` -- run a production cycle
/// - `POST /kingdoms/{id}/invest?type=` -- spend gold
/// - `POST /kingdoms/{id}/attack/{target_id}` -- attack another kingdom
/// - `GET /api-docs/openapi.json` -- `OpenAPI` document for the routes above
///
/// The static `richest` segment takes priority over `{id}`.
pub fn build_router<S: KingdomStore>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route(
            "/kingdoms",
            get(handlers::list_kingdoms::<S>).post(handlers::create_kingdom::<S>),
        )
        .route("/kingdoms/richest", get(handlers::get_richest_kingdom::<S>))
        .route(
            "/kingdoms/{id}",
            get(handlers::get_kingdom::<S>).post(handlers::start_daily_production::<S>),
        )
        .route("/kingdoms/{id}/invest", post(handlers::invest::<S>))
        .route(
            "/kingdoms/{id}/attack/{target_id}",
            post(handlers::attack::<S>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
