//! A mock host: implements both context traits over a [`MockStore`], keeps
//! a per-height history of commitment roots, and produces signed quorum
//! headers so two mock chains can track each other.

use alloc::collections::BTreeMap;

use crate::clients::quorum::{
    commit_digest, hash_validator_set, CommitSignature, QuorumHeader, ValidatorKey,
};
use crate::core::channel::channel::ChannelEnd;
use crate::core::channel::commitment::{AcknowledgementCommitment, PacketCommitment};
use crate::core::channel::packet::{Receipt, Sequence};
use crate::core::client::client_state::{AnyClientState, AnyConsensusState};
use crate::core::client::error::ClientError;
use crate::core::commitment::{CommitmentPrefix, CommitmentProof, CommitmentRoot};
use crate::core::connection::connection::ConnectionEnd;
use crate::core::connection::error::ConnectionError;
use crate::core::channel::error::{ChannelError, PacketError};
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::error::HostError;
use crate::core::host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::core::host::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath,
    ConnectionPath, Path, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use crate::mock::store::MockStore;
use crate::prelude::*;
use crate::Height;

/// A mock chain: host state, a height counter, and the root history its
/// headers expose to counterparties.
#[derive(Clone, Debug)]
pub struct MockContext {
    host_height: Height,
    store: MockStore,
    history: BTreeMap<Height, CommitmentRoot>,
    validators: Vec<ValidatorKey>,
    pub events: Vec<CoreEvent>,
    pub logs: Vec<String>,
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new("mockprefix", 1)
    }
}

impl MockContext {
    pub fn new(prefix: &str, host_height: u64) -> Self {
        let prefix =
            CommitmentPrefix::try_from(prefix.as_bytes().to_vec()).expect("non-empty prefix");
        let validators: Vec<ValidatorKey> = (1u8..=4).map(|i| [i; 32]).collect();
        let host_height = Height::new(host_height).expect("non-zero height");

        let store = MockStore::new(prefix);
        let mut history = BTreeMap::new();
        history.insert(host_height, store.root());

        Self {
            host_height,
            store,
            history,
            validators,
            events: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn host_height(&self) -> Height {
        self.host_height
    }

    /// The store prefix counterparties must verify our proofs under.
    pub fn prefix(&self) -> CommitmentPrefix {
        self.store.prefix().clone()
    }

    pub fn validators(&self) -> &[ValidatorKey] {
        &self.validators
    }

    pub fn validators_hash(&self) -> [u8; 32] {
        hash_validator_set(&self.validators)
    }

    /// Latest known root, as a counterparty client would trust it.
    pub fn latest_root(&self) -> CommitmentRoot {
        self.store.root()
    }

    /// Produces the next block: bumps the height and snapshots the root
    /// that headers for the new height will carry.
    pub fn advance_height(&mut self) {
        self.host_height = self.host_height.increment();
        self.history.insert(self.host_height, self.store.root());
    }

    /// A fully signed header for a recorded height.
    pub fn quorum_header(&self, height: Height) -> Option<QuorumHeader> {
        let root = self.history.get(&height)?.clone();
        let signatures = self
            .validators
            .iter()
            .map(|validator| CommitSignature {
                validator: *validator,
                signature: commit_digest(validator, height, &root),
            })
            .collect();
        Some(QuorumHeader {
            height,
            root,
            validators: self.validators.clone(),
            next_validators_hash: self.validators_hash(),
            signatures,
        })
    }

    /// A header for the current height.
    pub fn latest_quorum_header(&self) -> QuorumHeader {
        self.quorum_header(self.host_height)
            .unwrap_or_else(|| panic!("no recorded root at height {}", self.host_height))
    }

    /// A proof for `path` over the current store contents. Matches the root
    /// snapshotted at the current height as long as nothing was written
    /// since the last `advance_height`.
    pub fn prove(&self, path: impl Into<Path>) -> CommitmentProof {
        self.store.prove(&path.into().to_string())
    }

    pub fn with_client_state(
        mut self,
        client_id: &ClientId,
        client_state: impl Into<AnyClientState>,
        consensus_state: impl Into<AnyConsensusState>,
    ) -> Self {
        let client_state = client_state.into();
        let height = client_state.latest_height();
        self.store.set(
            &ClientConsensusStatePath::new(client_id, height).to_string(),
            encode_value(&consensus_state.into()),
        );
        self.store.set(
            &ClientStatePath::new(client_id).to_string(),
            encode_value(&client_state),
        );
        self
    }

    pub fn with_consensus_state(
        mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: impl Into<AnyConsensusState>,
    ) -> Self {
        self.store.set(
            &ClientConsensusStatePath::new(client_id, height).to_string(),
            encode_value(&consensus_state.into()),
        );
        self
    }

    pub fn with_connection(mut self, connection_id: &ConnectionId, end: ConnectionEnd) -> Self {
        self.store
            .set(&ConnectionPath::new(connection_id).to_string(), encode_value(&end));
        self
    }

    /// Seeds a channel end along with all three sequence counters at one.
    pub fn with_channel(
        mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        end: ChannelEnd,
    ) -> Self {
        self.store.set(
            &ChannelEndPath::new(port_id, channel_id).to_string(),
            encode_value(&end),
        );
        let one = Sequence::from(1);
        self.store.set(
            &SeqSendPath::new(port_id, channel_id).to_string(),
            encode_value(&one),
        );
        self.store.set(
            &SeqRecvPath::new(port_id, channel_id).to_string(),
            encode_value(&one),
        );
        self.store.set(
            &SeqAckPath::new(port_id, channel_id).to_string(),
            encode_value(&one),
        );
        self
    }

    pub fn with_send_sequence(
        mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        seq: Sequence,
    ) -> Self {
        self.store.set(
            &SeqSendPath::new(port_id, channel_id).to_string(),
            encode_value(&seq),
        );
        self
    }

    pub fn with_recv_sequence(
        mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        seq: Sequence,
    ) -> Self {
        self.store.set(
            &SeqRecvPath::new(port_id, channel_id).to_string(),
            encode_value(&seq),
        );
        self
    }

    pub fn with_packet_commitment(
        mut self,
        path: CommitmentPath,
        commitment: PacketCommitment,
    ) -> Self {
        self.store.set(&path.to_string(), encode_value(&commitment));
        self
    }

    /// Direct store access for tests that need to inspect raw state.
    pub fn store(&self) -> &MockStore {
        &self.store
    }
}

impl ValidationContext for MockContext {
    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(self.host_height)
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.store.prefix().clone()
    }

    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ContextError> {
        let bytes = self
            .store
            .get(&ClientStatePath::new(client_id).to_string())
            .ok_or_else(|| ClientError::ClientStateNotFound(client_id.clone()))?;
        Ok(decode_value(bytes)?)
    }

    fn consensus_state(
        &self,
        path: &ClientConsensusStatePath,
    ) -> Result<AnyConsensusState, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or_else(|| ClientError::MissingConsensusState {
                client_id: path.client_id.clone(),
                height: path.height,
            })?;
        Ok(decode_value(bytes)?)
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        let bytes = self
            .store
            .get(&ConnectionPath::new(conn_id).to_string())
            .ok_or_else(|| ConnectionError::ConnectionNotFound(conn_id.clone()))?;
        Ok(decode_value(bytes)?)
    }

    fn channel_end(&self, path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or_else(|| ChannelError::ChannelNotFound {
                port_id: path.port_id.clone(),
                channel_id: path.channel_id.clone(),
            })?;
        Ok(decode_value(bytes)?)
    }

    fn get_next_sequence_send(&self, path: &SeqSendPath) -> Result<Sequence, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or_else(|| missing(&format!("next send sequence at {path}")))?;
        Ok(decode_value(bytes)?)
    }

    fn get_next_sequence_recv(&self, path: &SeqRecvPath) -> Result<Sequence, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or_else(|| missing(&format!("next recv sequence at {path}")))?;
        Ok(decode_value(bytes)?)
    }

    fn get_next_sequence_ack(&self, path: &SeqAckPath) -> Result<Sequence, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or_else(|| missing(&format!("next ack sequence at {path}")))?;
        Ok(decode_value(bytes)?)
    }

    fn get_packet_commitment(
        &self,
        path: &CommitmentPath,
    ) -> Result<PacketCommitment, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or(PacketError::PacketCommitmentNotFound(path.sequence))?;
        Ok(decode_value(bytes)?)
    }

    fn get_packet_receipt(&self, path: &ReceiptPath) -> Result<Receipt, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or(PacketError::PacketReceiptNotFound(path.sequence))?;
        Ok(decode_value(bytes)?)
    }

    fn get_packet_acknowledgement(
        &self,
        path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError> {
        let bytes = self
            .store
            .get(&path.to_string())
            .ok_or(PacketError::PacketAcknowledgementNotFound(path.sequence))?;
        Ok(decode_value(bytes)?)
    }
}

impl ExecutionContext for MockContext {
    fn store_client_state(
        &mut self,
        path: ClientStatePath,
        client_state: AnyClientState,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&client_state));
        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        path: ClientConsensusStatePath,
        consensus_state: AnyConsensusState,
    ) -> Result<(), ContextError> {
        self.store
            .set(&path.to_string(), encode_value(&consensus_state));
        Ok(())
    }

    fn store_connection(
        &mut self,
        path: ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.store
            .set(&path.to_string(), encode_value(&connection_end));
        Ok(())
    }

    fn store_channel(
        &mut self,
        path: ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&channel_end));
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        path: SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&seq));
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        path: SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&seq));
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        path: SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&seq));
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        path: CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&commitment));
        Ok(())
    }

    fn delete_packet_commitment(&mut self, path: CommitmentPath) -> Result<(), ContextError> {
        self.store.delete(&path.to_string());
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        path: ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError> {
        self.store.set(&path.to_string(), encode_value(&receipt));
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        path: AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError> {
        self.store
            .set(&path.to_string(), encode_value(&ack_commitment));
        Ok(())
    }

    fn emit_event(&mut self, event: CoreEvent) -> Result<(), ContextError> {
        self.events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        self.logs.push(message);
        Ok(())
    }
}

fn missing(description: &str) -> ContextError {
    HostError::MissingData {
        description: description.to_string(),
    }
    .into()
}

fn encode_value<T: serde::Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("mock value encodes to JSON")
}

fn decode_value<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, ContextError> {
    crate::utils::decode_json(bytes).map_err(Into::into)
}
