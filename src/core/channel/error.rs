//! Defines the channel and packet error types

use displaydoc::Display;

use crate::core::channel::channel::Counterparty;
use crate::core::channel::packet::Sequence;
use crate::core::channel::timeout::TimeoutHeight;
use crate::core::client::error::ClientError;
use crate::core::host::error::IdentifierError;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::prelude::*;
use crate::Height;

#[derive(Debug, Display)]
pub enum ChannelError {
    /// channel (`{port_id}`, `{channel_id}`) not found
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel (`{port_id}`, `{channel_id}`) already exists
    ChannelAlreadyExists {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// invalid channel state: expected `{expected}`, actual `{actual}`
    InvalidState { expected: String, actual: String },
    /// invalid channel ordering: expected `{expected}`, actual `{actual}`
    InvalidOrdering { expected: String, actual: String },
    /// invalid connection hops length: expected `{expected}`, actual `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// invalid counterparty: expected `{expected}`, actual `{actual}`
    InvalidCounterparty {
        expected: Counterparty,
        actual: Counterparty,
    },
    /// counterparty channel id must be empty at this handshake step
    NonEmptyCounterpartyChannelId,
    /// counterparty is missing a required channel identifier
    MissingCounterparty,
    /// connection `{connection_id}` is not open
    ConnectionNotOpen { connection_id: ConnectionId },
    /// failed to verify the counterparty channel state: `{0}`
    VerifyChannelFailed(ClientError),
    /// application module error: `{description}`
    AppModule { description: String },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
}

#[derive(Debug, Display)]
pub enum PacketError {
    /// channel error: `{0}`
    Channel(ChannelError),
    /// packet commitment for sequence `{0}` not found
    PacketCommitmentNotFound(Sequence),
    /// stored commitment for sequence `{0}` does not match the packet
    MismatchedPacketCommitment(Sequence),
    /// packet receipt for sequence `{0}` not found
    PacketReceiptNotFound(Sequence),
    /// packet acknowledgement for sequence `{0}` not found
    PacketAcknowledgementNotFound(Sequence),
    /// packet with sequence `{0}` has already been received
    PacketAlreadyReceived(Sequence),
    /// packet acknowledgement for sequence `{0}` already exists
    AcknowledgementExists(Sequence),
    /// mismatched packet sequence: expected `{expected}`, actual `{actual}`
    MismatchedPacketSequence { expected: Sequence, actual: Sequence },
    /// packet timeout height `{timeout_height}` is not later than the current height `{chain_height}`
    ExpiredPacketTimeout {
        timeout_height: TimeoutHeight,
        chain_height: Height,
    },
    /// packet timed out: timeout height `{timeout_height}` has been reached at height `{chain_height}`
    PacketTimedOut {
        timeout_height: TimeoutHeight,
        chain_height: Height,
    },
    /// packet timeout `{timeout_height}` has not been reached at proof height `{proof_height}`
    PacketTimeoutNotReached {
        timeout_height: TimeoutHeight,
        proof_height: Height,
    },
    /// empty acknowledgement not allowed
    EmptyAcknowledgement,
    /// failed packet verification for sequence `{sequence}`: `{client_error}`
    FailedPacketVerification {
        sequence: Sequence,
        client_error: ClientError,
    },
    /// application module error: `{description}`
    AppModule { description: String },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
}

impl From<ChannelError> for PacketError {
    fn from(err: ChannelError) -> Self {
        Self::Channel(err)
    }
}

impl From<IdentifierError> for ChannelError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

impl From<IdentifierError> for PacketError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::VerifyChannelFailed(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Channel(e) => Some(e),
            Self::FailedPacketVerification {
                client_error: e, ..
            } => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            _ => None,
        }
    }
}
