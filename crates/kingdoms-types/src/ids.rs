//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Kingdom identifiers are UUID v7 (time-ordered), so ordering by id is
//! ordering by insertion time. The store assigns them; nothing else should
//! mint one outside of tests and seed data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a kingdom.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, ToSchema,
)]
#[ts(export, export_to = "bindings/")]
pub struct KingdomId(pub Uuid);

impl KingdomId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an identifier from its textual form.
    ///
    /// Returns `None` for anything that is not a UUID. Such a string can
    /// never address a stored kingdom.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for KingdomId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for KingdomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for KingdomId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<KingdomId> for Uuid {
    fn from(id: KingdomId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique_and_not_nil() {
        let a = KingdomId::new();
        let b = KingdomId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn parse_accepts_uuid_text() {
        let id = KingdomId::new();
        assert_eq!(KingdomId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(KingdomId::parse("macarena"), None);
        assert_eq!(KingdomId::parse(""), None);
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = KingdomId::new();
        let json = serde_json::to_value(id).unwrap_or_default();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
