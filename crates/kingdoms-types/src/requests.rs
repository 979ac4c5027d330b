//! Request payloads accepted at the HTTP boundary.
//!
//! Bounds are enforced here with [`validator`], before anything reaches the
//! engine. Numeric fields are deserialized as optional `i64` so that a
//! missing or negative value is reported as a validation failure rather than
//! a JSON shape error.

use serde::Deserialize;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::structs::Resources;

/// Upper bound (inclusive) for each resource when a kingdom is founded.
pub const MAX_STARTING_RESOURCE: i64 = 60;

/// Largest amount of gold a single investment can name.
pub const MAX_INVESTMENT: i64 = 4_294_967_295;

/// Why a request payload was rejected.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// One or more field constraints failed.
    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    /// A field passed validation but could not be represented.
    #[error("field out of range: {0}")]
    OutOfRange(&'static str),
}

/// Body of `POST /kingdoms`.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS, ToSchema)]
#[ts(export, export_to = "bindings/")]
pub struct CreateKingdomRequest {
    /// Starting gold, `0..=60`.
    #[validate(required, range(min = 0, max = MAX_STARTING_RESOURCE))]
    pub gold: Option<i64>,
    /// Starting citizens, `0..=60`.
    #[validate(required, range(min = 0, max = MAX_STARTING_RESOURCE))]
    pub citizens: Option<i64>,
    /// Starting food, `0..=60`.
    #[validate(required, range(min = 0, max = MAX_STARTING_RESOURCE))]
    pub food: Option<i64>,
}

impl CreateKingdomRequest {
    /// Validate the payload and convert it into a resource triple.
    pub fn validated(&self) -> Result<Resources, RequestError> {
        self.validate()?;
        Ok(Resources {
            gold: to_quantity(self.gold, "gold")?,
            citizens: to_quantity(self.citizens, "citizens")?,
            food: to_quantity(self.food, "food")?,
        })
    }
}

/// Body of `POST /kingdoms/{id}/invest`.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS, ToSchema)]
#[ts(export, export_to = "bindings/")]
pub struct InvestRequest {
    /// Amount of gold to spend.
    #[validate(required, range(min = 0, max = MAX_INVESTMENT))]
    pub gold: Option<i64>,
}

impl InvestRequest {
    /// Validate the payload and return the amount of gold to spend.
    pub fn validated(&self) -> Result<u32, RequestError> {
        self.validate()?;
        to_quantity(self.gold, "gold")
    }
}

/// Query string of `POST /kingdoms/{id}/invest`.
///
/// The type is kept as a raw string; the engine decides whether it names a
/// known investment.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvestQuery {
    /// `food` or `citizens`, any letter case.
    #[serde(rename = "type")]
    pub kind: String,
}

fn to_quantity(value: Option<i64>, field: &'static str) -> Result<u32, RequestError> {
    value
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(RequestError::OutOfRange(field))
}
