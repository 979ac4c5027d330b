//! Shared application state for the kingdoms API.

use kingdoms_core::{KingdomEngine, KingdomStore};

/// State injected into every handler via Axum's `State` extractor.
///
/// Wrapped in [`Arc`](std::sync::Arc) by the router. All mutable state
/// lives behind the engine's store and locks, so the struct itself is
/// never written after construction.
#[derive(Debug)]
pub struct AppState<S> {
    /// The kingdom engine every route delegates to.
    pub engine: KingdomEngine<S>,
}

impl<S: KingdomStore> AppState<S> {
    /// Wrap an engine.
    pub const fn new(engine: KingdomEngine<S>) -> Self {
        Self { engine }
    }

    /// Build an engine over `store` and wrap it.
    pub fn from_store(store: S) -> Self {
        Self::new(KingdomEngine::new(store))
    }
}
