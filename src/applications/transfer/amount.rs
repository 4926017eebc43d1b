//! Contains the `Amount` type, which represents amounts of tokens transferred.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::{From, Into};
use primitive_types::U256;

use crate::applications::transfer::error::TokenTransferError;
use crate::prelude::*;

/// A type for representing token transfer amounts. Unsigned by
/// construction: a negative amount is a parse failure, not a runtime state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, From, Into)]
pub struct Amount(U256);

impl Amount {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl FromStr for Amount {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = U256::from_dec_str(s).map_err(|e| TokenTransferError::InvalidAmount {
            description: format!("{s}: {e}"),
        })?;
        Ok(Self(amount))
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(v.into())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

// Amounts travel in packet data as decimal strings.
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        let amount = Amount::from_str("100").expect("valid amount");
        assert_eq!(amount, Amount::from(100u64));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(Amount::from_str("-100").is_err());
        assert!(Amount::from_str("100atom").is_err());
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let amount = Amount::from(42u64);
        let json = serde_json::to_string(&amount).expect("serializes");
        assert_eq!(json, "\"42\"");
        let back: Amount = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, amount);
    }
}
