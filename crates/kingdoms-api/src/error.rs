//! Error types for the kingdoms HTTP layer.
//!
//! [`ApiError`] unifies every failure a handler can produce and converts
//! into an Axum response with a fixed status and a JSON body of the form
//! `{"error": <message>, "status": <code>}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kingdoms_core::EngineError;
use kingdoms_types::RequestError;
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
    /// The HTTP status code, repeated in the body.
    pub status: u16,
}

/// Errors that can occur in the kingdoms API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected the operation or storage failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The request body failed validation.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request body was not usable JSON.
    #[error("invalid request body: {0}")]
    Body(String),

    /// The query string was missing or malformed.
    #[error("invalid query: {0}")]
    Query(String),

    /// The path segment does not name any kingdom.
    #[error("kingdom not found: {0}")]
    UnknownKingdom(String),
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Engine(e) => match e {
                EngineError::NotFound(_) | EngineError::NoKingdoms => StatusCode::NOT_FOUND,
                EngineError::NoCitizens(_)
                | EngineError::InsufficientGold { .. }
                | EngineError::InvalidInvestmentType(_) => StatusCode::NOT_ACCEPTABLE,
                EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Request(_) | Self::Body(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::UnknownKingdom(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Query(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}
