//! `OpenAPI` description of the kingdoms API.
//!
//! The document is derived from the handler annotations and the request and
//! response types, so it cannot drift from the routes it describes.
#![allow(clippy::needless_for_each)]

use axum::Json;
use kingdoms_types::{CreateKingdomRequest, InvestRequest, Kingdom, KingdomId};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers;

/// `OpenAPI` 3.1 document for every route in [`build_router`](crate::build_router).
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Kingdoms API",
        description = "Found kingdoms, grow them, and send them to war."
    ),
    paths(
        handlers::health,
        handlers::create_kingdom,
        handlers::list_kingdoms,
        handlers::get_richest_kingdom,
        handlers::get_kingdom,
        handlers::start_daily_production,
        handlers::invest,
        handlers::attack,
    ),
    components(schemas(Kingdom, KingdomId, CreateKingdomRequest, InvestRequest, ErrorBody)),
    tags(
        (name = "kingdoms", description = "Kingdom lifecycle, economy and battles"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for route in [
            "/health",
            "/kingdoms",
            "/kingdoms/richest",
            "/kingdoms/{id}",
            "/kingdoms/{id}/invest",
            "/kingdoms/{id}/attack/{target_id}",
        ] {
            assert!(paths.contains(&route), "missing {route}");
        }
    }

    #[test]
    fn document_carries_kingdom_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();
        assert!(schemas.contains_key("Kingdom"));
        assert!(schemas.contains_key("ErrorBody"));
    }
}
