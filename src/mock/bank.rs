//! An in-memory balance ledger implementing the transfer context traits.

use alloc::collections::BTreeMap;
use core::str::FromStr;

use crate::applications::transfer::coin::Coin;
use crate::applications::transfer::context::{
    TokenTransferExecutionContext, TokenTransferValidationContext,
};
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::{Amount, PORT_ID_STR};
use crate::core::host::identifier::{ChannelId, PortId};
use crate::prelude::*;
use crate::Signer;

/// A bank account, keyed by its rendered address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockAccount(String);

impl MockAccount {
    pub fn escrow(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self(format!("escrow/{port_id}/{channel_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<Signer> for MockAccount {
    type Error = TokenTransferError;

    fn try_from(signer: Signer) -> Result<Self, Self::Error> {
        if signer.is_empty() {
            return Err(TokenTransferError::FailedToParseAccount);
        }
        Ok(Self(signer.to_string()))
    }
}

/// Balances keyed by (account, denomination).
#[derive(Clone, Debug, Default)]
pub struct MockBank {
    balances: BTreeMap<(String, String), Amount>,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account with a balance.
    pub fn with_balance(mut self, account: &str, coin: Coin) -> Self {
        self.balances
            .insert((account.to_string(), coin.denom.to_string()), coin.amount);
        self
    }

    pub fn balance(&self, account: &str, denom: &str) -> Amount {
        self.balances
            .get(&(account.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_else(|| Amount::from(0u64))
    }

    fn credit(&mut self, account: &MockAccount, coin: &Coin) -> Result<(), TokenTransferError> {
        let key = (account.as_str().to_string(), coin.denom.to_string());
        let current = self
            .balances
            .get(&key)
            .copied()
            .unwrap_or_else(|| Amount::from(0u64));
        let updated = current
            .checked_add(coin.amount)
            .ok_or_else(|| TokenTransferError::InvalidAmount {
                description: "balance overflow".to_string(),
            })?;
        self.balances.insert(key, updated);
        Ok(())
    }

    fn debit(&mut self, account: &MockAccount, coin: &Coin) -> Result<(), TokenTransferError> {
        let key = (account.as_str().to_string(), coin.denom.to_string());
        let current = self
            .balances
            .get(&key)
            .copied()
            .unwrap_or_else(|| Amount::from(0u64));
        let updated =
            current
                .checked_sub(coin.amount)
                .ok_or_else(|| TokenTransferError::InsufficientFunds {
                    account: account.as_str().to_string(),
                    denom: coin.denom.to_string(),
                })?;
        self.balances.insert(key, updated);
        Ok(())
    }

    fn check_debit(&self, account: &MockAccount, coin: &Coin) -> Result<(), TokenTransferError> {
        let current = self.balance(account.as_str(), &coin.denom.to_string());
        if current.checked_sub(coin.amount).is_none() {
            return Err(TokenTransferError::InsufficientFunds {
                account: account.as_str().to_string(),
                denom: coin.denom.to_string(),
            });
        }
        Ok(())
    }
}

impl TokenTransferValidationContext for MockBank {
    type AccountId = MockAccount;

    fn get_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(PortId::from_str(PORT_ID_STR)?)
    }

    fn can_send_coins(&self) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn can_receive_coins(&self) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn escrow_coins_validate(
        &self,
        from_account: &MockAccount,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.check_debit(from_account, coin)
    }

    fn unescrow_coins_validate(
        &self,
        _to_account: &MockAccount,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.check_debit(&MockAccount::escrow(port_id, channel_id), coin)
    }

    fn mint_coins_validate(
        &self,
        _account: &MockAccount,
        _coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn burn_coins_validate(
        &self,
        account: &MockAccount,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.check_debit(account, coin)
    }
}

impl TokenTransferExecutionContext for MockBank {
    fn escrow_coins_execute(
        &mut self,
        from_account: &MockAccount,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.debit(from_account, coin)?;
        self.credit(&MockAccount::escrow(port_id, channel_id), coin)
    }

    fn unescrow_coins_execute(
        &mut self,
        to_account: &MockAccount,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.debit(&MockAccount::escrow(port_id, channel_id), coin)?;
        self.credit(to_account, coin)
    }

    fn mint_coins_execute(
        &mut self,
        account: &MockAccount,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.credit(account, coin)
    }

    fn burn_coins_execute(
        &mut self,
        account: &MockAccount,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.debit(account, coin)
    }
}
