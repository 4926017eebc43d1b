//! Defines the packet payload this application sends.

use crate::applications::transfer::coin::{validate_coin_set, Coin};
use crate::applications::transfer::error::TokenTransferError;
use crate::prelude::*;
use crate::Signer;

/// The opaque `data` field of a transfer packet, JSON-encoded on the wire.
///
/// `source` records whether the *sending* chain was the source of the
/// coins: it decides between unescrow and mint on the receiving side, and
/// between escrow and burn when refunding.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransferPacketData {
    pub amount: Vec<Coin>,
    pub sender: Signer,
    pub receiver: Signer,
    pub source: bool,
}

impl TransferPacketData {
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        validate_coin_set(&self.amount)?;
        if self.sender.is_empty() {
            return Err(TokenTransferError::EmptySender);
        }
        if self.receiver.is_empty() {
            return Err(TokenTransferError::EmptyReceiver);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TokenTransferError> {
        serde_json::to_vec(self).map_err(|_| TokenTransferError::FailedToSerializePacketData)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenTransferError> {
        serde_json::from_slice(bytes).map_err(|_| TokenTransferError::FailedToDeserializePacketData)
    }
}
