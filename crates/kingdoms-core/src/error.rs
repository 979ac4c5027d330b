//! Error types for the kingdoms-core crate.
//!
//! Domain outcomes (`NotFound`, `NoCitizens`, `InsufficientGold`,
//! `InvalidInvestmentType`) are final answers, not transient failures.
//! Storage failures are carried opaquely in [`EngineError::Storage`] so the
//! engine does not depend on any particular backend.

use kingdoms_types::KingdomId;

/// Errors raised by the pure rules in [`rules`](crate::rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The investment costs more gold than the kingdom holds.
    #[error("insufficient gold: wanted {requested} but only have {available}")]
    InsufficientGold {
        /// Gold the caller tried to spend.
        requested: u32,
        /// Gold in the treasury.
        available: u32,
    },
}

/// Errors returned by [`KingdomEngine`](crate::engine::KingdomEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No kingdom is stored under this id.
    #[error("kingdom not found: {0}")]
    NotFound(KingdomId),

    /// A query that needs at least one kingdom found none.
    #[error("no kingdoms found")]
    NoKingdoms,

    /// Production left the kingdom without citizens; it has been deleted.
    #[error("kingdom {0} has no citizens left and was deleted")]
    NoCitizens(KingdomId),

    /// The investment costs more gold than the kingdom holds.
    #[error("insufficient gold: wanted {requested} but only have {available}")]
    InsufficientGold {
        /// Gold the caller tried to spend.
        requested: u32,
        /// Gold in the treasury.
        available: u32,
    },

    /// The investment type is neither `food` nor `citizens`.
    #[error("invalid investment type: {0:?}")]
    InvalidInvestmentType(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wrap a backend error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(source))
    }
}

impl From<RuleError> for EngineError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::InsufficientGold {
                requested,
                available,
            } => Self::InsufficientGold {
                requested,
                available,
            },
        }
    }
}
