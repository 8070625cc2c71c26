//! Typed numeric wrappers for prediction market data
//!
//! Providers report money and probabilities inconsistently (JSON numbers,
//! decimal strings, big-integer strings), so every wrapper validates on
//! construction and deserializes from either representation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MarketError;

/// A probability in the closed interval [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Result<Self, MarketError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Probability(value))
        } else {
            Err(MarketError::validation(format!(
                "probability {value} outside [0, 1]"
            )))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = MarketError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Probability::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(probability: Probability) -> f64 {
        probability.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts a JSON number or a decimal string
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalOrString {
    Num(Decimal),
    Str(String),
}

impl DecimalOrString {
    fn into_decimal(self) -> Result<Decimal, MarketError> {
        match self {
            DecimalOrString::Num(d) => Ok(d),
            DecimalOrString::Str(s) => Decimal::from_str(s.trim())
                .map_err(|e| MarketError::validation(format!("bad decimal literal `{s}`: {e}"))),
        }
    }
}

macro_rules! currency_amount {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(Decimal);

        impl $name {
            pub const ZERO: Self = Self(Decimal::ZERO);

            pub fn new(amount: Decimal) -> Result<Self, MarketError> {
                if amount < Decimal::ZERO {
                    Err(MarketError::validation(format!(
                        "{} amount {amount} is negative",
                        stringify!($name),
                    )))
                } else {
                    Ok(Self(amount))
                }
            }

            pub fn get(&self) -> Decimal {
                self.0
            }

            pub fn to_f64(&self) -> Option<f64> {
                self.0.to_f64()
            }
        }

        impl TryFrom<Decimal> for $name {
            type Error = MarketError;

            fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
                Self::new(amount)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let amount = DecimalOrString::deserialize(deserializer)?
                    .into_decimal()
                    .map_err(serde::de::Error::custom)?;
                Self::new(amount).map_err(serde::de::Error::custom)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

currency_amount!(
    /// A non-negative amount of US dollars
    Usd
);
currency_amount!(
    /// A non-negative amount of USDC, Polymarket's settlement token
    Usdc
);
currency_amount!(
    /// A non-negative amount of xDai, Omen's settlement token
    Xdai
);
currency_amount!(
    /// A non-negative amount of Mana, Manifold's play-money currency
    Mana
);

/// Accepts a JSON integer or a big-integer string
#[derive(Deserialize)]
#[serde(untagged)]
enum UintOrString {
    Num(u64),
    Str(String),
}

impl UintOrString {
    fn into_u128(self) -> Result<u128, MarketError> {
        match self {
            UintOrString::Num(n) => Ok(n as u128),
            UintOrString::Str(s) => s
                .trim()
                .parse::<u128>()
                .map_err(|e| MarketError::validation(format!("bad integer literal `{s}`: {e}"))),
        }
    }
}

macro_rules! chain_quantity {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u128);

        impl $name {
            pub fn new(value: u128) -> Self {
                Self(value)
            }

            pub fn get(&self) -> u128 {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = UintOrString::deserialize(deserializer)?
                    .into_u128()
                    .map_err(serde::de::Error::custom)?;
                Ok(Self(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

chain_quantity!(
    /// A quantity of wei, the subgraph's smallest on-chain unit
    Wei
);
chain_quantity!(
    /// A quantity of Omen outcome tokens
    OutcomeTokenAmount
);

/// Native settlement currency of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "xDai")]
    Xdai,
    Mana,
    #[serde(rename = "USDC")]
    Usdc,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Xdai => write!(f, "xDai"),
            Currency::Mana => write!(f, "Mana"),
            Currency::Usdc => write!(f, "USDC"),
        }
    }
}

/// An amount of a provider's settlement currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetAmount {
    pub amount: Decimal,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn probability_accepts_unit_interval() {
        assert_eq!(Probability::new(0.0).unwrap().get(), 0.0);
        assert_eq!(Probability::new(1.0).unwrap().get(), 1.0);
        assert_eq!(Probability::new(0.65).unwrap().get(), 0.65);
    }

    #[test]
    fn probability_rejects_out_of_range() {
        assert!(matches!(
            Probability::new(-0.01),
            Err(MarketError::Validation(_))
        ));
        assert!(matches!(
            Probability::new(1.01),
            Err(MarketError::Validation(_))
        ));
    }

    #[test]
    fn probability_deserialization_validates() {
        let ok: Probability = serde_json::from_str("0.42").unwrap();
        assert_eq!(ok.get(), 0.42);
        assert!(serde_json::from_str::<Probability>("1.5").is_err());
    }

    #[test]
    fn amounts_reject_negative() {
        assert!(Usd::new(dec!(-1)).is_err());
        assert!(Usdc::new(dec!(0)).is_ok());
        assert!(serde_json::from_str::<Mana>("-3").is_err());
    }

    #[test]
    fn amounts_deserialize_from_string_or_number() {
        let from_number: Usdc = serde_json::from_str("12.5").unwrap();
        let from_string: Usdc = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.get(), dec!(12.5));
    }

    #[test]
    fn wei_deserializes_big_integer_strings() {
        let wei: Wei = serde_json::from_str("\"1000000000000000000\"").unwrap();
        assert_eq!(wei.get(), 1_000_000_000_000_000_000);
        let small: Wei = serde_json::from_str("42").unwrap();
        assert_eq!(small.get(), 42);
    }

    #[test]
    fn currency_serializes_provider_labels() {
        assert_eq!(serde_json::to_string(&Currency::Xdai).unwrap(), "\"xDai\"");
        assert_eq!(serde_json::to_string(&Currency::Mana).unwrap(), "\"Mana\"");
        assert_eq!(serde_json::to_string(&Currency::Usdc).unwrap(), "\"USDC\"");
    }
}
