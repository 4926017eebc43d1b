//! The context traits the host's balance ledger implements for this
//! application. Credits and debits are keyed by account and denomination;
//! the ledger itself is an external collaborator.

use crate::applications::transfer::coin::Coin;
use crate::applications::transfer::error::TokenTransferError;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::Signer;

/// Methods required in token transfer validation, to be implemented by the
/// host.
pub trait TokenTransferValidationContext {
    type AccountId: TryFrom<Signer> + Clone;

    /// The port this application instance is bound to.
    fn get_port(&self) -> Result<PortId, TokenTransferError>;

    /// Returns Ok(()) if the host chain supports sending coins.
    fn can_send_coins(&self) -> Result<(), TokenTransferError>;

    /// Returns Ok(()) if the host chain supports receiving coins.
    fn can_receive_coins(&self) -> Result<(), TokenTransferError>;

    /// Validates that `coin` can be moved from the account into the escrow
    /// account of the given channel.
    fn escrow_coins_validate(
        &self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    /// Validates that `coin` can be released from the channel's escrow
    /// account into the given account.
    fn unescrow_coins_validate(
        &self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    /// Validates that `coin` can be minted into the given account.
    fn mint_coins_validate(
        &self,
        account: &Self::AccountId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    /// Validates that `coin` can be burned out of the given account.
    fn burn_coins_validate(
        &self,
        account: &Self::AccountId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;
}

/// Methods required in token transfer execution, to be implemented by the
/// host.
pub trait TokenTransferExecutionContext: TokenTransferValidationContext {
    fn escrow_coins_execute(
        &mut self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    fn unescrow_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    fn mint_coins_execute(
        &mut self,
        account: &Self::AccountId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    fn burn_coins_execute(
        &mut self,
        account: &Self::AccountId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;
}
