//! Pure state transitions for kingdoms.
//!
//! Every function here takes kingdoms by reference and returns new values.
//! Nothing touches the store; the [`engine`](crate::engine) decides what to
//! persist or delete based on the outcome.
//!
//! ## Production
//!
//! Each citizen eats one food and yields two gold. When food runs short,
//! every citizen without food dies, so the survivors equal the food on hand.
//! Gold is paid out for survivors only. A kingdom left with no citizens is
//! extinct.
//!
//! ## Investment
//!
//! One gold buys two food or one citizen.
//!
//! ## Attack
//!
//! The side with strictly more citizens wins; ties go to the defender. The
//! winner takes all of the loser's gold and half (rounded down) of the
//! loser's citizens. Food is never touched.
//!
//! Gains saturate at `u32::MAX`. Losses are guarded by the comparisons that
//! precede them, so no value can go below zero.

use kingdoms_types::{InvestmentKind, Kingdom, Resources, Victor};

use crate::error::RuleError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Gold produced per surviving citizen in one production cycle.
pub const GOLD_PER_CITIZEN: u32 = 2;

/// Food bought by one gold.
pub const FOOD_PER_GOLD: u32 = 2;

/// Citizens bought by one gold.
pub const CITIZENS_PER_GOLD: u32 = 1;

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// Result of one production cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
    /// Every citizen was fed.
    Fed(Kingdom),
    /// Food ran out; some citizens died but the kingdom survives.
    Starved {
        /// The kingdom after starvation and payout.
        kingdom: Kingdom,
        /// Citizens lost this cycle.
        deaths: u32,
    },
    /// The kingdom has no citizens left and must be removed.
    Extinct,
}

/// Run one production cycle.
pub fn produce(kingdom: &Kingdom) -> Production {
    let Resources {
        gold,
        citizens,
        food,
    } = kingdom.resources();

    if citizens == 0 {
        return Production::Extinct;
    }

    let food_needed = citizens;
    if let Some(food_left) = food.checked_sub(food_needed) {
        return Production::Fed(kingdom.with_resources(Resources {
            gold: payout(gold, citizens),
            citizens,
            food: food_left,
        }));
    }

    let survivors = food;
    if survivors == 0 {
        return Production::Extinct;
    }

    Production::Starved {
        kingdom: kingdom.with_resources(Resources {
            gold: payout(gold, survivors),
            citizens: survivors,
            food: 0,
        }),
        deaths: citizens.saturating_sub(survivors),
    }
}

const fn payout(gold: u32, citizens: u32) -> u32 {
    gold.saturating_add(citizens.saturating_mul(GOLD_PER_CITIZEN))
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

/// Fail unless the kingdom can pay `amount` gold.
pub const fn ensure_affordable(kingdom: &Kingdom, amount: u32) -> Result<(), RuleError> {
    if amount > kingdom.gold {
        return Err(RuleError::InsufficientGold {
            requested: amount,
            available: kingdom.gold,
        });
    }
    Ok(())
}

/// Convert `amount` gold into food or citizens.
pub fn invest(kingdom: &Kingdom, kind: InvestmentKind, amount: u32) -> Result<Kingdom, RuleError> {
    ensure_affordable(kingdom, amount)?;

    let current = kingdom.resources();
    let gold = current.gold.saturating_sub(amount);
    let next = match kind {
        InvestmentKind::Food => Resources {
            gold,
            food: current
                .food
                .saturating_add(amount.saturating_mul(FOOD_PER_GOLD)),
            ..current
        },
        InvestmentKind::Citizens => Resources {
            gold,
            citizens: current
                .citizens
                .saturating_add(amount.saturating_mul(CITIZENS_PER_GOLD)),
            ..current
        },
    };

    Ok(kingdom.with_resources(next))
}

// ---------------------------------------------------------------------------
// Attack
// ---------------------------------------------------------------------------

/// Outcome of an attack: both kingdoms after the battle plus what moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    /// The attacking kingdom after the battle.
    pub attacker: Kingdom,
    /// The attacked kingdom after the battle.
    pub target: Kingdom,
    /// Which side won.
    pub victor: Victor,
    /// Gold taken from the loser.
    pub gold_plundered: u32,
    /// Citizens taken from the loser.
    pub citizens_captured: u32,
}

/// Resolve an attack by `attacker` on `target`.
pub fn resolve_attack(attacker: &Kingdom, target: &Kingdom) -> Battle {
    let victor = if attacker.citizens > target.citizens {
        Victor::Attacker
    } else {
        Victor::Defender
    };

    match victor {
        Victor::Attacker => {
            let spoils = plunder(attacker, target);
            Battle {
                attacker: spoils.winner,
                target: spoils.loser,
                victor,
                gold_plundered: spoils.gold,
                citizens_captured: spoils.citizens,
            }
        }
        Victor::Defender => {
            let spoils = plunder(target, attacker);
            Battle {
                attacker: spoils.loser,
                target: spoils.winner,
                victor,
                gold_plundered: spoils.gold,
                citizens_captured: spoils.citizens,
            }
        }
    }
}

struct Spoils {
    winner: Kingdom,
    loser: Kingdom,
    gold: u32,
    citizens: u32,
}

fn plunder(winner: &Kingdom, loser: &Kingdom) -> Spoils {
    let gold = loser.gold;
    let citizens = loser.citizens / 2;

    let won = winner.resources();
    let lost = loser.resources();

    Spoils {
        winner: winner.with_resources(Resources {
            gold: won.gold.saturating_add(gold),
            citizens: won.citizens.saturating_add(citizens),
            ..won
        }),
        loser: loser.with_resources(Resources {
            gold: 0,
            citizens: lost.citizens.saturating_sub(citizens),
            ..lost
        }),
        gold,
        citizens,
    }
}
