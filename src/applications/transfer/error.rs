//! Defines the token transfer error type

use displaydoc::Display;

use crate::core::context::ContextError;
use crate::core::host::error::IdentifierError;
use crate::prelude::*;

#[derive(Debug, Display)]
pub enum TokenTransferError {
    /// core protocol error: `{0}`
    Core(ContextError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// empty base denomination
    EmptyBaseDenom,
    /// invalid base denomination `{denom}`: must be 3-16 lowercase alphanumeric characters starting with a letter
    InvalidBaseDenom { denom: String },
    /// invalid transfer amount: `{description}`
    InvalidAmount { description: String },
    /// transfer amounts must be strictly positive
    ZeroAmount,
    /// transfer must carry at least one coin
    EmptyCoinSet,
    /// invalid coin: `{description}`
    InvalidCoin { description: String },
    /// sender address cannot be empty
    EmptySender,
    /// receiver address cannot be empty
    EmptyReceiver,
    /// failed to parse account
    FailedToParseAccount,
    /// destination channel not known yet for channel `{channel_id}`
    MissingDestinationChannel { channel_id: String },
    /// failed to deserialize packet data
    FailedToDeserializePacketData,
    /// failed to serialize packet data
    FailedToSerializePacketData,
    /// failed to deserialize acknowledgement
    FailedToDeserializeAck,
    /// insufficient funds: account `{account}` holds less `{denom}` than required
    InsufficientFunds { account: String, denom: String },
    /// host chain refused: `{description}`
    HostRefused { description: String },
}

impl From<ContextError> for TokenTransferError {
    fn from(e: ContextError) -> Self {
        Self::Core(e)
    }
}

impl From<IdentifierError> for TokenTransferError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Core(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            _ => None,
        }
    }
}
