//! The kingdom engine: loads records, applies [`rules`], persists results.
//!
//! [`KingdomEngine`] is the only place that combines the store with the
//! rules. Every mutating operation holds the per-kingdom lock for the ids it
//! touches from the first read to the last write, so a concurrent operation
//! on the same kingdom can never observe or overwrite a half-applied change.
//!
//! # Operations
//!
//! | Operation | Locks | Store effect |
//! |-----------|-------|--------------|
//! | [`create_kingdom`](KingdomEngine::create_kingdom) | none | insert |
//! | [`start_daily_production`](KingdomEngine::start_daily_production) | id | update, or delete on extinction |
//! | [`invest`](KingdomEngine::invest) | id | update |
//! | [`attack`](KingdomEngine::attack) | both ids | update both atomically |
//! | [`get_kingdom`](KingdomEngine::get_kingdom) | none | read |
//! | [`get_richest_kingdom`](KingdomEngine::get_richest_kingdom) | none | read |
//! | [`list_kingdoms`](KingdomEngine::list_kingdoms) | none | read |

use chrono::{Local, NaiveDate};
use kingdoms_types::{
    InvestmentKind, Kingdom, KingdomDraft, KingdomId, Resources, UnknownInvestmentKind,
};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::locks::KingdomLocks;
use crate::rules::{self, Production};
use crate::store::KingdomStore;

/// Source of the founding date stamped on new kingdoms.
pub type Calendar = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Applies the kingdom rules against a [`KingdomStore`].
#[derive(Debug)]
pub struct KingdomEngine<S> {
    store: S,
    locks: KingdomLocks,
    today: Calendar,
}

impl<S: KingdomStore> KingdomEngine<S> {
    /// Create an engine over `store`, dating new kingdoms with the local
    /// calendar.
    pub fn new(store: S) -> Self {
        Self::with_calendar(store, local_today)
    }

    /// Create an engine with a fixed source for founding dates.
    pub fn with_calendar(store: S, today: Calendar) -> Self {
        Self {
            store,
            locks: KingdomLocks::new(),
            today,
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    async fn load(&self, id: KingdomId) -> Result<Kingdom, EngineError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NotFound(id))
    }

    /// Found a new kingdom with the given starting resources.
    ///
    /// Bounds are the caller's concern; the engine stores what it is given.
    pub async fn create_kingdom(&self, resources: Resources) -> Result<Kingdom, EngineError> {
        let draft = KingdomDraft {
            resources,
            date_of_creation: (self.today)(),
        };
        let kingdom = self
            .store
            .insert(draft)
            .await
            .map_err(EngineError::storage)?;

        info!(
            kingdom_id = %kingdom.id,
            gold = kingdom.gold,
            citizens = kingdom.citizens,
            food = kingdom.food,
            "Kingdom founded"
        );
        Ok(kingdom)
    }

    /// Run one production cycle for a kingdom.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the kingdom does not exist.
    /// [`EngineError::NoCitizens`] if the kingdom had or was left with no
    /// citizens; the record has been deleted when this is returned.
    pub async fn start_daily_production(&self, id: KingdomId) -> Result<Kingdom, EngineError> {
        let _guard = self.locks.lock(id).await;
        let kingdom = self.load(id).await?;

        match rules::produce(&kingdom) {
            Production::Fed(next) => {
                self.store
                    .update(&next)
                    .await
                    .map_err(EngineError::storage)?;
                debug!(
                    kingdom_id = %id,
                    gold = next.gold,
                    citizens = next.citizens,
                    food = next.food,
                    "Production cycle completed"
                );
                Ok(next)
            }
            Production::Starved {
                kingdom: next,
                deaths,
            } => {
                self.store
                    .update(&next)
                    .await
                    .map_err(EngineError::storage)?;
                info!(
                    kingdom_id = %id,
                    deaths,
                    survivors = next.citizens,
                    gold = next.gold,
                    "Famine during production"
                );
                Ok(next)
            }
            Production::Extinct => {
                self.store.delete(id).await.map_err(EngineError::storage)?;
                warn!(
                    kingdom_id = %id,
                    citizens_before = kingdom.citizens,
                    food_before = kingdom.food,
                    "Kingdom has no citizens left and was deleted"
                );
                Err(EngineError::NoCitizens(id))
            }
        }
    }

    /// Spend gold on food or citizens.
    ///
    /// `kind` is matched case-insensitively against `food` and `citizens`.
    /// Checks run in order: existence, affordability, type. Nothing is
    /// written unless all three pass.
    pub async fn invest(
        &self,
        id: KingdomId,
        kind: &str,
        amount: u32,
    ) -> Result<Kingdom, EngineError> {
        let _guard = self.locks.lock(id).await;
        let kingdom = self.load(id).await?;

        rules::ensure_affordable(&kingdom, amount)?;
        let kind: InvestmentKind = kind
            .parse()
            .map_err(|e: UnknownInvestmentKind| EngineError::InvalidInvestmentType(e.0))?;

        let next = rules::invest(&kingdom, kind, amount)?;
        self.store
            .update(&next)
            .await
            .map_err(EngineError::storage)?;

        info!(
            kingdom_id = %id,
            %kind,
            amount,
            gold = next.gold,
            citizens = next.citizens,
            food = next.food,
            "Investment made"
        );
        Ok(next)
    }

    /// Fetch a kingdom.
    pub async fn get_kingdom(&self, id: KingdomId) -> Result<Kingdom, EngineError> {
        self.load(id).await
    }

    /// Fetch the kingdom with the most gold (ties: lowest id).
    pub async fn get_richest_kingdom(&self) -> Result<Kingdom, EngineError> {
        self.store
            .find_richest()
            .await
            .map_err(EngineError::storage)?
            .ok_or(EngineError::NoKingdoms)
    }

    /// Fetch every kingdom, ordered by id.
    pub async fn list_kingdoms(&self) -> Result<Vec<Kingdom>, EngineError> {
        self.store.find_all().await.map_err(EngineError::storage)
    }

    /// Attack `target_id` with `attacker_id` and return the attacker as it
    /// stands afterwards, whoever won.
    ///
    /// Both records are written in one atomic store call. Kingdoms left with
    /// no citizens are not deleted here.
    pub async fn attack(
        &self,
        attacker_id: KingdomId,
        target_id: KingdomId,
    ) -> Result<Kingdom, EngineError> {
        let _guard = self.locks.lock_pair(attacker_id, target_id).await;
        let attacker = self.load(attacker_id).await?;
        let target = self.load(target_id).await?;

        let battle = rules::resolve_attack(&attacker, &target);
        self.store
            .update_pair(&battle.attacker, &battle.target)
            .await
            .map_err(EngineError::storage)?;

        info!(
            attacker_id = %attacker_id,
            target_id = %target_id,
            victor = %battle.victor,
            gold_plundered = battle.gold_plundered,
            citizens_captured = battle.citizens_captured,
            "Attack resolved"
        );
        Ok(battle.attacker)
    }
}
