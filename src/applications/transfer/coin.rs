//! Defines the coin type: an amount bound to a denomination.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::applications::transfer::amount::Amount;
use crate::applications::transfer::denom::PrefixedDenom;
use crate::applications::transfer::error::TokenTransferError;
use crate::prelude::*;

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coin {
    pub denom: PrefixedDenom,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: PrefixedDenom, amount: Amount) -> Self {
        Self { denom, amount }
    }

    /// A coin with a zero amount transfers nothing and is rejected.
    pub fn validate(&self) -> Result<(), TokenTransferError> {
        if self.amount.is_zero() {
            return Err(TokenTransferError::ZeroAmount);
        }
        Ok(())
    }
}

impl FromStr for Coin {
    type Err = TokenTransferError;

    /// Parses the compact "100atom" form: a decimal amount immediately
    /// followed by the denomination.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split_at = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TokenTransferError::InvalidCoin {
                description: format!("missing denomination in {s}"),
            })?;
        let (amount, denom) = s.split_at(split_at);
        Ok(Self {
            denom: denom.parse()?,
            amount: amount.parse()?,
        })
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Validates a full coin set: non-empty, and every amount strictly
/// positive.
pub fn validate_coin_set(coins: &[Coin]) -> Result<(), TokenTransferError> {
    if coins.is_empty() {
        return Err(TokenTransferError::EmptyCoinSet);
    }
    for coin in coins {
        coin.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_form() {
        let coin: Coin = "100atom".parse().expect("valid coin");
        assert_eq!(coin.amount, 100u64.into());
        assert_eq!(coin.denom.to_string(), "atom");
    }

    #[test]
    fn rejects_bare_amounts_and_negative_coins() {
        assert!("100".parse::<Coin>().is_err());
        // a leading dash never parses as an amount
        assert!("-100atom".parse::<Coin>().is_err());
    }

    #[test]
    fn zero_amounts_fail_validation() {
        let coin: Coin = "0atom".parse().expect("parses");
        assert!(coin.validate().is_err());
        assert!(validate_coin_set(&[coin]).is_err());
        assert!(validate_coin_set(&[]).is_err());
    }
}
