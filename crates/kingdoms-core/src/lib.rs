//! Kingdom state-transition engine for the kingdoms service.
//!
//! Kingdoms hold three resources (gold, citizens, food) and change them
//! through a handful of deterministic operations: daily production,
//! investment, and attacks between kingdoms. This crate owns those rules and
//! the orchestration that applies them against a store.
//!
//! # Modules
//!
//! - [`rules`] -- Pure state transitions (production, investment, combat).
//! - [`engine`] -- [`KingdomEngine`]: load, apply rules, persist or delete.
//! - [`store`] -- [`KingdomStore`] trait and the [`InMemoryStore`].
//! - [`locks`] -- Per-kingdom async locks with ordered pair acquisition.
//! - [`config`] -- Configuration loading from `kingdoms-config.yaml`.
//! - [`error`] -- Rule and engine error types.
//!
//! [`KingdomEngine`]: engine::KingdomEngine
//! [`KingdomStore`]: store::KingdomStore
//! [`InMemoryStore`]: store::InMemoryStore

pub mod config;
pub mod engine;
pub mod error;
pub mod locks;
pub mod rules;
pub mod store;

// Re-export primary types for convenience.
pub use config::ServiceConfig;
pub use engine::KingdomEngine;
pub use error::{EngineError, RuleError};
pub use store::{InMemoryStore, KingdomStore};
