//! `PostgreSQL` storage for the kingdoms service.
//!
//! The engine in `kingdoms-core` talks to storage only through the
//! [`KingdomStore`](kingdoms_core::KingdomStore) trait. This crate provides
//! the durable implementation of that trait on top of a `sqlx` pool.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, and migrations
//! - [`kingdom_store`] -- [`PgKingdomStore`], the `kingdoms` table queries
//! - [`error`] -- Shared error types

pub mod error;
pub mod kingdom_store;
pub mod postgres;

// Re-export primary types for convenience.
pub use error::DbError;
pub use kingdom_store::{KingdomRow, PgKingdomStore};
pub use postgres::{PostgresConfig, PostgresPool};
