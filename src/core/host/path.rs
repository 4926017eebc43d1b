//! Defines all store paths used by the protocol.
//!
//! Every piece of state a counterparty may be asked to prove lives under a
//! deterministic byte-string path, namespaced per subsystem. The `Display`
//! impls below are the canonical encoding of that path-space.

use derive_more::{Display, From};

use crate::core::channel::packet::Sequence;
use crate::core::host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::prelude::*;
use crate::Height;

pub const CLIENT_PREFIX: &str = "clients";
pub const CLIENT_STATE_LEAF: &str = "clientState";
pub const CONSENSUS_STATE_PREFIX: &str = "consensusStates";
pub const CONNECTION_PREFIX: &str = "connections";
pub const CHANNEL_PREFIX: &str = "channels";
pub const NEXT_SEQ_SEND_PREFIX: &str = "nextSequenceSend";
pub const NEXT_SEQ_RECV_PREFIX: &str = "nextSequenceRecv";
pub const NEXT_SEQ_ACK_PREFIX: &str = "nextSequenceAck";
pub const PACKET_COMMITMENT_PREFIX: &str = "commitments";
pub const PACKET_ACK_PREFIX: &str = "acks";
pub const PACKET_RECEIPT_PREFIX: &str = "receipts";

/// The `Path` enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    ClientState(ClientStatePath),
    ClientConsensusState(ClientConsensusStatePath),
    Connection(ConnectionPath),
    ChannelEnd(ChannelEndPath),
    SeqSend(SeqSendPath),
    SeqRecv(SeqRecvPath),
    SeqAck(SeqAckPath),
    Commitment(CommitmentPath),
    Ack(AckPath),
    Receipt(ReceiptPath),
}

impl Path {
    /// The canonical byte encoding of this path, used as the key into the
    /// host's commitment store.
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// Path under which the client state of a given client is stored:
/// "clients/{client_id}/clientState".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "clients/{}/clientState", _0)]
pub struct ClientStatePath(pub ClientId);

impl ClientStatePath {
    pub fn new(client_id: &ClientId) -> Self {
        Self(client_id.clone())
    }
}

/// Path under which a verified consensus state of a given client is stored:
/// "clients/{client_id}/consensusStates/{height}".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "clients/{}/consensusStates/{}", client_id, height)]
pub struct ClientConsensusStatePath {
    pub client_id: ClientId,
    pub height: Height,
}

impl ClientConsensusStatePath {
    pub fn new(client_id: &ClientId, height: Height) -> Self {
        Self {
            client_id: client_id.clone(),
            height,
        }
    }
}

/// "connections/{connection_id}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "connections/{}", _0)]
pub struct ConnectionPath(pub ConnectionId);

impl ConnectionPath {
    pub fn new(connection_id: &ConnectionId) -> Self {
        Self(connection_id.clone())
    }
}

/// "channels/{port_id}/{channel_id}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "channels/{}/{}", port_id, channel_id)]
pub struct ChannelEndPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl ChannelEndPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// "nextSequenceSend/{port_id}/{channel_id}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "nextSequenceSend/{}/{}", port_id, channel_id)]
pub struct SeqSendPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl SeqSendPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// "nextSequenceRecv/{port_id}/{channel_id}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "nextSequenceRecv/{}/{}", port_id, channel_id)]
pub struct SeqRecvPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl SeqRecvPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// "nextSequenceAck/{port_id}/{channel_id}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "nextSequenceAck/{}/{}", port_id, channel_id)]
pub struct SeqAckPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl SeqAckPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    }
}

/// "commitments/{port_id}/{channel_id}/{sequence}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "commitments/{}/{}/{}", port_id, channel_id, sequence)]
pub struct CommitmentPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl CommitmentPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

/// "acks/{port_id}/{channel_id}/{sequence}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "acks/{}/{}/{}", port_id, channel_id, sequence)]
pub struct AckPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl AckPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

/// "receipts/{port_id}/{channel_id}/{sequence}"
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "receipts/{}/{}/{}", port_id, channel_id, sequence)]
pub struct ReceiptPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl ReceiptPath {
    pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> Self {
        Self {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn path_display_matches_key_space() {
        let port_id = PortId::from_str("testportid").expect("valid identifier");
        let channel_id = ChannelId::from_str("testchannel").expect("valid identifier");
        let client_id = ClientId::from_str("07-tendermint-0").expect("valid identifier");
        let conn_id = ConnectionId::from_str("connectionone").expect("valid identifier");

        assert_eq!(
            ClientStatePath::new(&client_id).to_string(),
            "clients/07-tendermint-0/clientState"
        );
        assert_eq!(
            ClientConsensusStatePath::new(&client_id, Height::new(5).expect("non-zero"))
                .to_string(),
            "clients/07-tendermint-0/consensusStates/5"
        );
        assert_eq!(
            ConnectionPath::new(&conn_id).to_string(),
            "connections/connectionone"
        );
        assert_eq!(
            ChannelEndPath::new(&port_id, &channel_id).to_string(),
            "channels/testportid/testchannel"
        );
        assert_eq!(
            CommitmentPath::new(&port_id, &channel_id, 7.into()).to_string(),
            "commitments/testportid/testchannel/7"
        );
        assert_eq!(
            AckPath::new(&port_id, &channel_id, 7.into()).to_string(),
            "acks/testportid/testchannel/7"
        );
        assert_eq!(
            ReceiptPath::new(&port_id, &channel_id, 7.into()).to_string(),
            "receipts/testportid/testchannel/7"
        );
        assert_eq!(
            SeqSendPath::new(&port_id, &channel_id).to_string(),
            "nextSequenceSend/testportid/testchannel"
        );
    }
}
