//! Core entity structs: the kingdom record and its resource triple.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::ids::KingdomId;

/// The three resources a kingdom holds.
///
/// All quantities are non-negative by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resources {
    /// Treasury.
    pub gold: u32,
    /// Population.
    pub citizens: u32,
    /// Stored food; one unit feeds one citizen for one production cycle.
    pub food: u32,
}

impl Resources {
    /// Build a resource triple.
    pub const fn new(gold: u32, citizens: u32, food: u32) -> Self {
        Self {
            gold,
            citizens,
            food,
        }
    }
}

/// A kingdom as persisted by the store.
///
/// `id` and `date_of_creation` are fixed at creation. Engine operations
/// never mutate a `Kingdom` in place; they derive a new value with
/// [`Kingdom::with_resources`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Kingdom {
    /// Store-assigned identifier.
    pub id: KingdomId,
    /// Treasury.
    pub gold: u32,
    /// Population.
    pub citizens: u32,
    /// Stored food.
    pub food: u32,
    /// Calendar date on which the kingdom was founded.
    pub date_of_creation: NaiveDate,
}

impl Kingdom {
    /// Return the current resource triple.
    pub const fn resources(&self) -> Resources {
        Resources {
            gold: self.gold,
            citizens: self.citizens,
            food: self.food,
        }
    }

    /// Derive a copy of this kingdom holding `resources`.
    ///
    /// Identity and founding date carry over unchanged.
    #[must_use]
    pub const fn with_resources(&self, resources: Resources) -> Self {
        Self {
            id: self.id,
            gold: resources.gold,
            citizens: resources.citizens,
            food: resources.food,
            date_of_creation: self.date_of_creation,
        }
    }
}

/// A kingdom that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KingdomDraft {
    /// Starting resources.
    pub resources: Resources,
    /// Founding date.
    pub date_of_creation: NaiveDate,
}

impl KingdomDraft {
    /// Attach a store-assigned id, producing the persisted record.
    pub const fn into_kingdom(self, id: KingdomId) -> Kingdom {
        Kingdom {
            id,
            gold: self.resources.gold,
            citizens: self.resources.citizens,
            food: self.resources.food,
            date_of_creation: self.date_of_creation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn founding_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default()
    }

    #[test]
    fn with_resources_keeps_identity() {
        let draft = KingdomDraft {
            resources: Resources::new(10, 5, 10),
            date_of_creation: founding_day(),
        };
        let id = KingdomId::new();
        let kingdom = draft.into_kingdom(id);

        let next = kingdom.with_resources(Resources::new(20, 5, 5));
        assert_eq!(next.id, id);
        assert_eq!(next.date_of_creation, founding_day());
        assert_eq!(next.resources(), Resources::new(20, 5, 5));
        // The source value is untouched.
        assert_eq!(kingdom.resources(), Resources::new(10, 5, 10));
    }

    #[test]
    fn kingdom_serializes_camel_case_with_iso_date() {
        let kingdom = KingdomDraft {
            resources: Resources::new(1, 2, 3),
            date_of_creation: founding_day(),
        }
        .into_kingdom(KingdomId::new());

        let json = serde_json::to_value(&kingdom).unwrap_or_default();
        assert_eq!(json.get("gold"), Some(&serde_json::json!(1)));
        assert_eq!(json.get("citizens"), Some(&serde_json::json!(2)));
        assert_eq!(json.get("food"), Some(&serde_json::json!(3)));
        assert_eq!(
            json.get("dateOfCreation"),
            Some(&serde_json::json!("2024-03-01"))
        );
        assert!(json.get("date_of_creation").is_none());
    }
}
