//! Shared type definitions for the kingdoms service.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries: the engine, the `PostgreSQL` store, and the HTTP layer all
//! speak in terms of [`Kingdom`] and [`Resources`]. Types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for kingdom identifiers
//! - [`enums`] -- Investment kinds and battle outcomes
//! - [`structs`] -- The kingdom record and its resource triple
//! - [`requests`] -- Validated request payloads for the HTTP boundary

pub mod enums;
pub mod ids;
pub mod requests;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{InvestmentKind, UnknownInvestmentKind, Victor};
pub use ids::KingdomId;
pub use requests::{
    CreateKingdomRequest, InvestQuery, InvestRequest, MAX_INVESTMENT, MAX_STARTING_RESOURCE,
    RequestError,
};
pub use structs::{Kingdom, KingdomDraft, Resources};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::KingdomId::export_all();
        let _ = crate::enums::InvestmentKind::export_all();
        let _ = crate::enums::Victor::export_all();
        let _ = crate::structs::Resources::export_all();
        let _ = crate::structs::Kingdom::export_all();
        let _ = crate::requests::CreateKingdomRequest::export_all();
        let _ = crate::requests::InvestRequest::export_all();
    }
}
