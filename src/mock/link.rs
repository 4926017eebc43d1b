//! A two-chain harness: both mock chains, their routers, and relayer-style
//! helpers that carry handshake steps, client updates and packets across
//! with real proofs taken from the peer's store.

use core::str::FromStr;

use crate::applications::transfer::{self, TransferModule};
use crate::clients::quorum::{QuorumClientState, QuorumConsensusState, TrustThreshold};
use crate::core::channel::acknowledgement::Acknowledgement;
use crate::core::channel::channel::Order;
use crate::core::channel::msgs::{
    ChannelMsg, MsgAcknowledgement, MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit,
    MsgChannelOpenTry, MsgRecvPacket, MsgTimeout, PacketMsg,
};
use crate::core::channel::packet::{Packet, Sequence};
use crate::core::channel::version::Version as ChannelVersion;
use crate::core::client::client_state::{AnyClientState, AnyConsensusState, AnyHeader};
use crate::core::client::msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient};
use crate::core::connection::connection::Counterparty as ConnectionCounterparty;
use crate::core::connection::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    MsgConnectionOpenTry,
};
use crate::core::connection::version::{get_compatible_versions, Version as ConnectionVersion};
use crate::core::context::ContextError;
use crate::core::entrypoint::dispatch;
use crate::core::events::CoreEvent;
use crate::core::host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::core::host::path::{AckPath, ChannelEndPath, CommitmentPath, ConnectionPath, ReceiptPath, SeqRecvPath};
use crate::core::routing::module::ModuleId;
use crate::core::routing::MsgEnvelope;
use crate::mock::bank::MockBank;
use crate::mock::context::MockContext;
use crate::mock::dummy_module::DummyModule;
use crate::mock::router::MockRouter;
use crate::prelude::*;
use crate::Signer;

/// The two sides of a link, with every identifier the handshake uses.
pub struct MockLink {
    pub a: MockContext,
    pub b: MockContext,
    pub router_a: MockRouter,
    pub router_b: MockRouter,
    pub client_on_a: ClientId,
    pub client_on_b: ClientId,
    pub conn_on_a: ConnectionId,
    pub conn_on_b: ConnectionId,
    pub port_id: PortId,
    pub chan_on_a: ChannelId,
    pub chan_on_b: ChannelId,
    pub ordering: Order,
}

pub fn relayer() -> Signer {
    Signer::from("testrelayer")
}

impl MockLink {
    pub fn new(ordering: Order) -> Self {
        Self {
            a: MockContext::new("chainaprefix", 1),
            b: MockContext::new("chainbprefix", 1),
            router_a: MockRouter::new(),
            router_b: MockRouter::new(),
            client_on_a: ClientId::from_str("quorumclientb").expect("valid identifier"),
            client_on_b: ClientId::from_str("quorumclienta").expect("valid identifier"),
            conn_on_a: ConnectionId::from_str("connectionatob").expect("valid identifier"),
            conn_on_b: ConnectionId::from_str("connectionbtoa").expect("valid identifier"),
            port_id: PortId::from_str(transfer::PORT_ID_STR).expect("valid identifier"),
            chan_on_a: ChannelId::from_str("channelatob").expect("valid identifier"),
            chan_on_b: ChannelId::from_str("channelbtoa").expect("valid identifier"),
            ordering,
        }
    }

    /// Registers the pass-through dummy module on both sides.
    pub fn bind_dummy_modules(&mut self) {
        let module_id = ModuleId::new("dummymodule");
        self.router_a
            .add_route(module_id.clone(), DummyModule::default());
        self.router_b
            .add_route(module_id.clone(), DummyModule::default());
        self.router_a
            .bind_port(self.port_id.clone(), module_id.clone())
            .expect("fresh binding");
        self.router_b
            .bind_port(self.port_id.clone(), module_id)
            .expect("fresh binding");
    }

    /// Registers the token transfer application on both sides.
    pub fn bind_transfer_modules(&mut self, bank_a: MockBank, bank_b: MockBank) {
        let module_id = ModuleId::new(transfer::MODULE_ID_STR);
        self.router_a
            .add_route(module_id.clone(), TransferModule::new(bank_a));
        self.router_b
            .add_route(module_id.clone(), TransferModule::new(bank_b));
        self.router_a
            .bind_port(self.port_id.clone(), module_id.clone())
            .expect("fresh binding");
        self.router_b
            .bind_port(self.port_id.clone(), module_id)
            .expect("fresh binding");
    }

    pub fn dispatch_a(&mut self, msg: impl Into<MsgEnvelope>) -> Result<(), ContextError> {
        dispatch(&mut self.a, &mut self.router_a, msg.into())
    }

    pub fn dispatch_b(&mut self, msg: impl Into<MsgEnvelope>) -> Result<(), ContextError> {
        dispatch(&mut self.b, &mut self.router_b, msg.into())
    }

    /// Creates the two clients, each anchored to the peer's current height.
    pub fn create_clients(&mut self) -> Result<(), ContextError> {
        let header_b = self.b.latest_quorum_header();
        let msg = MsgCreateClient::new(
            self.client_on_a.clone(),
            AnyClientState::Quorum(QuorumClientState::new(
                header_b.height,
                TrustThreshold::default(),
            )),
            AnyConsensusState::Quorum(QuorumConsensusState::new(
                header_b.root.clone(),
                header_b.next_validators_hash,
            )),
            relayer(),
        );
        self.dispatch_a(ClientMsg::CreateClient(msg))?;

        let header_a = self.a.latest_quorum_header();
        let msg = MsgCreateClient::new(
            self.client_on_b.clone(),
            AnyClientState::Quorum(QuorumClientState::new(
                header_a.height,
                TrustThreshold::default(),
            )),
            AnyConsensusState::Quorum(QuorumConsensusState::new(
                header_a.root.clone(),
                header_a.next_validators_hash,
            )),
            relayer(),
        );
        self.dispatch_b(ClientMsg::CreateClient(msg))
    }

    /// Seals a block on B and feeds its header to the client on A.
    pub fn refresh_client_on_a(&mut self) -> Result<(), ContextError> {
        self.b.advance_height();
        let header = self.b.latest_quorum_header();
        self.dispatch_a(ClientMsg::UpdateClient(MsgUpdateClient {
            client_id: self.client_on_a.clone(),
            header: AnyHeader::Quorum(header),
            signer: relayer(),
        }))
    }

    /// Seals a block on A and feeds its header to the client on B.
    pub fn refresh_client_on_b(&mut self) -> Result<(), ContextError> {
        self.a.advance_height();
        let header = self.a.latest_quorum_header();
        self.dispatch_b(ClientMsg::UpdateClient(MsgUpdateClient {
            client_id: self.client_on_b.clone(),
            header: AnyHeader::Quorum(header),
            signer: relayer(),
        }))
    }

    /// Runs the four-step connection handshake to completion.
    pub fn open_connection(&mut self) -> Result<(), ContextError> {
        self.dispatch_a(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
            connection_id: self.conn_on_a.clone(),
            client_id: self.client_on_a.clone(),
            counterparty: ConnectionCounterparty::new(
                self.client_on_b.clone(),
                None,
                self.b.prefix(),
            ),
            version: None,
            signer: relayer(),
        }))?;

        self.refresh_client_on_b()?;
        let proof_init = self.a.prove(ConnectionPath::new(&self.conn_on_a));
        self.dispatch_b(ConnectionMsg::OpenTry(MsgConnectionOpenTry {
            connection_id: self.conn_on_b.clone(),
            client_id: self.client_on_b.clone(),
            counterparty: ConnectionCounterparty::new(
                self.client_on_a.clone(),
                Some(self.conn_on_a.clone()),
                self.a.prefix(),
            ),
            counterparty_versions: get_compatible_versions(),
            proof_init,
            proof_height: self.a.host_height(),
            signer: relayer(),
        }))?;

        self.refresh_client_on_a()?;
        let proof_try = self.b.prove(ConnectionPath::new(&self.conn_on_b));
        self.dispatch_a(ConnectionMsg::OpenAck(MsgConnectionOpenAck {
            connection_id: self.conn_on_a.clone(),
            counterparty_connection_id: self.conn_on_b.clone(),
            version: ConnectionVersion::default(),
            proof_try,
            proof_height: self.b.host_height(),
            signer: relayer(),
        }))?;

        self.refresh_client_on_b()?;
        let proof_ack = self.a.prove(ConnectionPath::new(&self.conn_on_a));
        self.dispatch_b(ConnectionMsg::OpenConfirm(MsgConnectionOpenConfirm {
            connection_id: self.conn_on_b.clone(),
            proof_ack,
            proof_height: self.a.host_height(),
            signer: relayer(),
        }))
    }

    /// Runs the four-step channel handshake to completion.
    pub fn open_channel(&mut self, version: &str) -> Result<(), ContextError> {
        self.dispatch_a(ChannelMsg::OpenInit(MsgChannelOpenInit {
            port_id_on_a: self.port_id.clone(),
            chan_id_on_a: self.chan_on_a.clone(),
            connection_hops_on_a: vec![self.conn_on_a.clone()],
            port_id_on_b: self.port_id.clone(),
            ordering: self.ordering,
            version_proposal: ChannelVersion::from(version),
            signer: relayer(),
        }))?;

        self.refresh_client_on_b()?;
        let proof =
            self.a
                .prove(ChannelEndPath::new(&self.port_id, &self.chan_on_a));
        self.dispatch_b(ChannelMsg::OpenTry(MsgChannelOpenTry {
            port_id_on_b: self.port_id.clone(),
            chan_id_on_b: self.chan_on_b.clone(),
            connection_hops_on_b: vec![self.conn_on_b.clone()],
            port_id_on_a: self.port_id.clone(),
            chan_id_on_a: self.chan_on_a.clone(),
            ordering: self.ordering,
            version_on_a: ChannelVersion::from(version),
            proof_chan_end_on_a: proof,
            proof_height_on_a: self.a.host_height(),
            signer: relayer(),
        }))?;

        self.refresh_client_on_a()?;
        let proof =
            self.b
                .prove(ChannelEndPath::new(&self.port_id, &self.chan_on_b));
        self.dispatch_a(ChannelMsg::OpenAck(MsgChannelOpenAck {
            port_id_on_a: self.port_id.clone(),
            chan_id_on_a: self.chan_on_a.clone(),
            chan_id_on_b: self.chan_on_b.clone(),
            version_on_b: ChannelVersion::from(version),
            proof_chan_end_on_b: proof,
            proof_height_on_b: self.b.host_height(),
            signer: relayer(),
        }))?;

        self.refresh_client_on_b()?;
        let proof =
            self.a
                .prove(ChannelEndPath::new(&self.port_id, &self.chan_on_a));
        self.dispatch_b(ChannelMsg::OpenConfirm(MsgChannelOpenConfirm {
            port_id_on_b: self.port_id.clone(),
            chan_id_on_b: self.chan_on_b.clone(),
            proof_chan_end_on_a: proof,
            proof_height_on_a: self.a.host_height(),
            signer: relayer(),
        }))
    }

    /// Full setup: clients, connection, channel.
    pub fn open(&mut self, version: &str) -> Result<(), ContextError> {
        self.create_clients()?;
        self.open_connection()?;
        self.open_channel(version)
    }

    /// Carries a packet committed on A over to B.
    pub fn relay_recv(&mut self, packet: Packet) -> Result<(), ContextError> {
        self.refresh_client_on_b()?;
        let proof = self.a.prove(CommitmentPath::new(
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            packet.seq_on_a,
        ));
        let proof_height = self.a.host_height();
        self.dispatch_b(PacketMsg::Recv(MsgRecvPacket {
            packet,
            proof_commitment_on_a: proof,
            proof_height_on_a: proof_height,
            signer: relayer(),
        }))
    }

    /// Carries an acknowledgement written on B back to A.
    pub fn relay_ack(
        &mut self,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), ContextError> {
        self.refresh_client_on_a()?;
        let proof = self.b.prove(AckPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            packet.seq_on_a,
        ));
        let proof_height = self.b.host_height();
        self.dispatch_a(PacketMsg::Ack(MsgAcknowledgement {
            packet,
            acknowledgement,
            proof_acked_on_b: proof,
            proof_height_on_b: proof_height,
            signer: relayer(),
        }))
    }

    /// Proves non-receipt on B and times the packet out on A.
    pub fn relay_timeout(
        &mut self,
        packet: Packet,
        next_seq_recv_on_b: Sequence,
    ) -> Result<(), ContextError> {
        self.refresh_client_on_a()?;
        let proof = match self.ordering {
            Order::Ordered => self.b.prove(SeqRecvPath::new(
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
            )),
            Order::Unordered => self.b.prove(ReceiptPath::new(
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                packet.seq_on_a,
            )),
        };
        let proof_height = self.b.host_height();
        self.dispatch_a(PacketMsg::Timeout(MsgTimeout {
            packet,
            next_seq_recv_on_b,
            proof_unreceived_on_b: proof,
            proof_height_on_b: proof_height,
            signer: relayer(),
        }))
    }

    /// The last packet committed on A, as a relayer would discover it.
    pub fn last_sent_packet_on_a(&self) -> Option<Packet> {
        self.a.events.iter().rev().find_map(|event| match event {
            CoreEvent::SendPacket(ev) => Some(ev.packet.clone()),
            _ => None,
        })
    }

    /// The last acknowledgement written on B.
    pub fn last_ack_on_b(&self) -> Option<(Packet, Acknowledgement)> {
        self.b.events.iter().rev().find_map(|event| match event {
            CoreEvent::WriteAcknowledgement(ev) => {
                Some((ev.packet.clone(), ev.acknowledgement.clone()))
            }
            _ => None,
        })
    }
}
