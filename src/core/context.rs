//! The context traits through which handlers reach host state, plus the
//! aggregate handler error.
//!
//! All cross-subsystem references (connection → client, channel →
//! connection → client) are id lookups through these traits into the host's
//! keyed store — values, never pointers. Handlers are pure functions over
//! `(current state, message, proofs)`; a failed handler must leave the
//! context observably unchanged, which the split into a read-only
//! [`ValidationContext`] and a mutating [`ExecutionContext`] enforces
//! structurally.

use displaydoc::Display;

use crate::core::channel::channel::ChannelEnd;
use crate::core::channel::commitment::{AcknowledgementCommitment, PacketCommitment};
use crate::core::channel::error::{ChannelError, PacketError};
use crate::core::channel::packet::{Receipt, Sequence};
use crate::core::client::client_state::{AnyClientState, AnyConsensusState};
use crate::core::client::error::ClientError;
use crate::core::commitment::CommitmentPrefix;
use crate::core::connection::connection::ConnectionEnd;
use crate::core::connection::error::ConnectionError;
use crate::core::events::CoreEvent;
use crate::core::host::error::HostError;
use crate::core::host::identifier::{ClientId, ConnectionId};
use crate::core::host::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath,
    ConnectionPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use crate::core::port::error::PortError;
use crate::prelude::*;
use crate::{Height, Signer};

/// The aggregate error returned by every handler. No subsystem recovers
/// from another's error; all of them surface here and abort the enclosing
/// transaction.
#[derive(Debug, Display)]
pub enum ContextError {
    /// client error: `{0}`
    Client(ClientError),
    /// connection error: `{0}`
    Connection(ConnectionError),
    /// channel error: `{0}`
    Channel(ChannelError),
    /// packet error: `{0}`
    Packet(PacketError),
    /// port error: `{0}`
    Port(PortError),
    /// host error: `{0}`
    Host(HostError),
}

impl From<ClientError> for ContextError {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<ConnectionError> for ContextError {
    fn from(err: ConnectionError) -> Self {
        Self::Connection(err)
    }
}

impl From<ChannelError> for ContextError {
    fn from(err: ChannelError) -> Self {
        Self::Channel(err)
    }
}

impl From<PacketError> for ContextError {
    fn from(err: PacketError) -> Self {
        Self::Packet(err)
    }
}

impl From<PortError> for ContextError {
    fn from(err: PortError) -> Self {
        Self::Port(err)
    }
}

impl From<HostError> for ContextError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            Self::Connection(e) => Some(e),
            Self::Channel(e) => Some(e),
            Self::Packet(e) => Some(e),
            Self::Port(e) => Some(e),
            Self::Host(e) => Some(e),
        }
    }
}

/// Read-only access to host state. Everything a handler needs to decide
/// whether a message is valid.
pub trait ValidationContext {
    /// The current height of the local chain.
    fn host_height(&self) -> Result<Height, ContextError>;

    /// The store namespace this chain keeps protocol state under, as
    /// counterparties must apply it when verifying our proofs.
    fn commitment_prefix(&self) -> CommitmentPrefix;

    /// Returns the client state of `client_id`.
    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ContextError>;

    /// Returns the consensus state verified at a specific height.
    fn consensus_state(
        &self,
        path: &ClientConsensusStatePath,
    ) -> Result<AnyConsensusState, ContextError>;

    /// Returns the connection end of `conn_id`.
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError>;

    /// Returns the channel end stored under the (port, channel) pair.
    fn channel_end(&self, path: &ChannelEndPath) -> Result<ChannelEnd, ContextError>;

    fn get_next_sequence_send(&self, path: &SeqSendPath) -> Result<Sequence, ContextError>;

    fn get_next_sequence_recv(&self, path: &SeqRecvPath) -> Result<Sequence, ContextError>;

    fn get_next_sequence_ack(&self, path: &SeqAckPath) -> Result<Sequence, ContextError>;

    fn get_packet_commitment(&self, path: &CommitmentPath)
        -> Result<PacketCommitment, ContextError>;

    fn get_packet_receipt(&self, path: &ReceiptPath) -> Result<Receipt, ContextError>;

    fn get_packet_acknowledgement(
        &self,
        path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError>;

    /// Authentication happens in the transaction layer; here we only refuse
    /// messages that carry no signer at all.
    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        if signer.is_empty() {
            return Err(HostError::EmptySigner.into());
        }
        Ok(())
    }
}

/// Mutating access to host state. Only reachable after validation passed;
/// the host rolls the whole transaction back if any step errors.
pub trait ExecutionContext: ValidationContext {
    fn store_client_state(
        &mut self,
        path: ClientStatePath,
        client_state: AnyClientState,
    ) -> Result<(), ContextError>;

    fn store_consensus_state(
        &mut self,
        path: ClientConsensusStatePath,
        consensus_state: AnyConsensusState,
    ) -> Result<(), ContextError>;

    fn store_connection(
        &mut self,
        path: ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError>;

    fn store_channel(
        &mut self,
        path: ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_send(
        &mut self,
        path: SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_recv(
        &mut self,
        path: SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_ack(
        &mut self,
        path: SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_packet_commitment(
        &mut self,
        path: CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError>;

    fn delete_packet_commitment(&mut self, path: CommitmentPath) -> Result<(), ContextError>;

    fn store_packet_receipt(&mut self, path: ReceiptPath, receipt: Receipt)
        -> Result<(), ContextError>;

    fn store_packet_acknowledgement(
        &mut self,
        path: AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError>;

    /// Ingestion of all events. There is no kernel-side buffering; the host
    /// forwards them to its relayer-facing surface.
    fn emit_event(&mut self, event: CoreEvent) -> Result<(), ContextError>;

    /// Logging facility.
    fn log_message(&mut self, message: String) -> Result<(), ContextError>;
}
