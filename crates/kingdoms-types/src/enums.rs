//! Enumeration types: investment targets and battle outcomes.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What a kingdom converts gold into when it invests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InvestmentKind {
    /// Each gold buys two units of food.
    Food,
    /// Each gold buys one citizen.
    Citizens,
}

impl core::fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Citizens => write!(f, "citizens"),
        }
    }
}

/// The investment type string matched neither `food` nor `citizens`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid investment type: {0:?}")]
pub struct UnknownInvestmentKind(pub String);

impl FromStr for InvestmentKind {
    type Err = UnknownInvestmentKind;

    /// Case-insensitive: `FOOD`, `Food` and `food` are all accepted.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case("food") {
            Ok(Self::Food)
        } else if raw.eq_ignore_ascii_case("citizens") {
            Ok(Self::Citizens)
        } else {
            Err(UnknownInvestmentKind(raw.to_owned()))
        }
    }
}

/// Which side of an attack came out on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Victor {
    /// The kingdom that started the attack.
    Attacker,
    /// The kingdom that was attacked. Also wins every tie.
    Defender,
}

impl core::fmt::Display for Victor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Attacker => write!(f, "attacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("food".parse(), Ok(InvestmentKind::Food));
        assert_eq!("FOOD".parse(), Ok(InvestmentKind::Food));
        assert_eq!("Citizens".parse(), Ok(InvestmentKind::Citizens));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            "invalid".parse::<InvestmentKind>(),
            Err(UnknownInvestmentKind(String::from("invalid")))
        );
        assert!("".parse::<InvestmentKind>().is_err());
        assert!(" food".parse::<InvestmentKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [InvestmentKind::Food, InvestmentKind::Citizens] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }
}
