//! REST handlers for the kingdoms API.
//!
//! Every handler is generic over the [`KingdomStore`] so the same routes
//! serve the in-memory and `PostgreSQL` backends. Handlers do no business
//! logic of their own: they validate the boundary, call the engine, and
//! let [`ApiError`] pick the status.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kingdoms_core::KingdomStore;
use kingdoms_types::{CreateKingdomRequest, InvestQuery, InvestRequest, Kingdom, KingdomId};

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Resolve a path segment to a kingdom id.
///
/// A segment that is not a UUID cannot name any kingdom, so it is reported
/// as not found rather than as a malformed request.
fn parse_kingdom_id(raw: &str) -> Result<KingdomId, ApiError> {
    KingdomId::parse(raw).ok_or_else(|| ApiError::UnknownKingdom(raw.to_owned()))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// POST /kingdoms
// ---------------------------------------------------------------------------

/// Found a kingdom from a `{gold, citizens, food}` body, each in `0..=60`.
#[utoipa::path(
    post,
    path = "/kingdoms",
    tag = "kingdoms",
    request_body = CreateKingdomRequest,
    responses(
        (status = 201, description = "Kingdom founded", body = Kingdom),
        (status = 400, description = "Missing or out-of-range resource", body = ErrorBody),
    )
)]
pub async fn create_kingdom<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateKingdomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Kingdom>), ApiError> {
    let Json(request) = payload?;
    let resources = request.validated()?;
    let kingdom = state.engine.create_kingdom(resources).await?;
    Ok((StatusCode::CREATED, Json(kingdom)))
}

// ---------------------------------------------------------------------------
// GET /kingdoms
// ---------------------------------------------------------------------------

/// List every kingdom, ordered by id.
#[utoipa::path(
    get,
    path = "/kingdoms",
    tag = "kingdoms",
    responses((status = 200, description = "All kingdoms", body = Vec<Kingdom>))
)]
pub async fn list_kingdoms<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Kingdom>>, ApiError> {
    Ok(Json(state.engine.list_kingdoms().await?))
}

// ---------------------------------------------------------------------------
// GET /kingdoms/richest
// ---------------------------------------------------------------------------

/// The kingdom with the most gold.
#[utoipa::path(
    get,
    path = "/kingdoms/richest",
    tag = "kingdoms",
    responses(
        (status = 200, description = "Richest kingdom, lowest id on ties", body = Kingdom),
        (status = 404, description = "No kingdoms exist", body = ErrorBody),
    )
)]
pub async fn get_richest_kingdom<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Kingdom>, ApiError> {
    Ok(Json(state.engine.get_richest_kingdom().await?))
}

// ---------------------------------------------------------------------------
// GET /kingdoms/{id}
// ---------------------------------------------------------------------------

/// A single kingdom.
#[utoipa::path(
    get,
    path = "/kingdoms/{id}",
    tag = "kingdoms",
    params(("id" = String, Path, description = "Kingdom id")),
    responses(
        (status = 200, description = "The kingdom", body = Kingdom),
        (status = 404, description = "Unknown kingdom", body = ErrorBody),
    )
)]
pub async fn get_kingdom<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Kingdom>, ApiError> {
    let id = parse_kingdom_id(&id)?;
    Ok(Json(state.engine.get_kingdom(id).await?))
}

// ---------------------------------------------------------------------------
// POST /kingdoms/{id}
// ---------------------------------------------------------------------------

/// Run one production cycle.
#[utoipa::path(
    post,
    path = "/kingdoms/{id}",
    tag = "kingdoms",
    params(("id" = String, Path, description = "Kingdom id")),
    responses(
        (status = 200, description = "Kingdom after production", body = Kingdom),
        (status = 404, description = "Unknown kingdom", body = ErrorBody),
        (status = 406, description = "No citizens, or the kingdom died out and was removed", body = ErrorBody),
    )
)]
pub async fn start_daily_production<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Kingdom>, ApiError> {
    let id = parse_kingdom_id(&id)?;
    Ok(Json(state.engine.start_daily_production(id).await?))
}

// ---------------------------------------------------------------------------
// POST /kingdoms/{id}/invest?type=food|citizens
// ---------------------------------------------------------------------------

/// Spend `{gold}` on the investment named by the `type` query parameter.
#[utoipa::path(
    post,
    path = "/kingdoms/{id}/invest",
    tag = "kingdoms",
    params(("id" = String, Path, description = "Kingdom id"), InvestQuery),
    request_body = InvestRequest,
    responses(
        (status = 200, description = "Kingdom after investing", body = Kingdom),
        (status = 400, description = "Malformed body or missing type", body = ErrorBody),
        (status = 404, description = "Unknown kingdom", body = ErrorBody),
        (status = 406, description = "Not enough gold, or unknown investment type", body = ErrorBody),
    )
)]
pub async fn invest<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    query: Result<Query<InvestQuery>, QueryRejection>,
    payload: Result<Json<InvestRequest>, JsonRejection>,
) -> Result<Json<Kingdom>, ApiError> {
    let id = parse_kingdom_id(&id)?;
    let Query(query) = query?;
    let Json(request) = payload?;
    let amount = request.validated()?;
    Ok(Json(state.engine.invest(id, &query.kind, amount).await?))
}

// ---------------------------------------------------------------------------
// POST /kingdoms/{id}/attack/{target_id}
// ---------------------------------------------------------------------------

/// Attack `target_id`; responds with the attacker as it stands afterwards.
#[utoipa::path(
    post,
    path = "/kingdoms/{id}/attack/{target_id}",
    tag = "kingdoms",
    params(
        ("id" = String, Path, description = "Attacking kingdom id"),
        ("target_id" = String, Path, description = "Defending kingdom id"),
    ),
    responses(
        (status = 200, description = "Attacker after the battle", body = Kingdom),
        (status = 404, description = "Unknown attacker or target", body = ErrorBody),
    )
)]
pub async fn attack<S: KingdomStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((attacker, target)): Path<(String, String)>,
) -> Result<Json<Kingdom>, ApiError> {
    let attacker = parse_kingdom_id(&attacker)?;
    let target = parse_kingdom_id(&target)?;
    Ok(Json(state.engine.attack(attacker, target).await?))
}
