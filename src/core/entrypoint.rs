//! The message entrypoint: one externally submitted message in, one atomic
//! state transition (or an error and no transition) out.

use crate::core::channel::handler::{
    acknowledgement, chan_close_confirm, chan_close_init, chan_open_ack, chan_open_confirm,
    chan_open_init, chan_open_try, recv_packet, timeout,
};
use crate::core::channel::msgs::{
    channel_msg_to_port_id, packet_msg_to_port_id, ChannelMsg, PacketMsg,
};
use crate::core::client::handler::{create_client, misbehaviour, update_client};
use crate::core::client::msgs::ClientMsg;
use crate::core::connection::handler::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try,
};
use crate::core::connection::msgs::ConnectionMsg;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::host::identifier::PortId;
use crate::core::port::error::PortError;
use crate::core::routing::module::ModuleId;
use crate::core::routing::{MsgEnvelope, Router};

/// Entrypoint which performs both validation and message execution.
///
/// Hosts whose transaction layer can roll back partial writes may call
/// [`validate`] and [`execute`] separately; `dispatch` is the composition
/// for hosts that cannot.
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    validate(ctx, router, msg.clone())?;
    execute(ctx, router, msg)
}

/// Entrypoint which only performs message validation
///
/// If a transaction contains `n` messages `m_1` ... `m_n`, then
/// they MUST be processed as follows:
///     validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)
/// That is, the state transition of message `i` must be applied before
/// message `i+1` is validated. This is equivalent to calling
/// `dispatch()` on each successively.
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: MsgEnvelope) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::validate(ctx, &msg),
            ClientMsg::UpdateClient(msg) => update_client::validate(ctx, &msg),
            ClientMsg::Misbehaviour(msg) => misbehaviour::validate(ctx, &msg),
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::validate(ctx, &msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::validate(ctx, &msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::validate(ctx, &msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::validate(ctx, &msg),
        },
        MsgEnvelope::Channel(msg) => {
            let module_id = lookup_module(router, channel_msg_to_port_id(&msg))?;
            let module = router
                .get_route(&module_id)
                .ok_or_else(|| PortError::ModuleNotFound {
                    port_id: channel_msg_to_port_id(&msg).clone(),
                })?;

            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init::validate(ctx, module, &msg),
                ChannelMsg::OpenTry(msg) => chan_open_try::validate(ctx, module, &msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack::validate(ctx, module, &msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm::validate(ctx, module, &msg),
                ChannelMsg::CloseInit(msg) => chan_close_init::validate(ctx, module, &msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm::validate(ctx, module, &msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module_id = lookup_module(router, packet_msg_to_port_id(&msg))?;
            let module = router
                .get_route(&module_id)
                .ok_or_else(|| PortError::ModuleNotFound {
                    port_id: packet_msg_to_port_id(&msg).clone(),
                })?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet::validate(ctx, &msg),
                PacketMsg::Ack(msg) => acknowledgement::validate(ctx, module, &msg),
                PacketMsg::Timeout(msg) => timeout::validate(ctx, module, &msg),
            }
        }
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    match msg {
        MsgEnvelope::Client(msg) => match msg {
            ClientMsg::CreateClient(msg) => create_client::execute(ctx, msg),
            ClientMsg::UpdateClient(msg) => update_client::execute(ctx, msg),
            ClientMsg::Misbehaviour(msg) => misbehaviour::execute(ctx, msg),
        },
        MsgEnvelope::Connection(msg) => match msg {
            ConnectionMsg::OpenInit(msg) => conn_open_init::execute(ctx, msg),
            ConnectionMsg::OpenTry(msg) => conn_open_try::execute(ctx, msg),
            ConnectionMsg::OpenAck(msg) => conn_open_ack::execute(ctx, msg),
            ConnectionMsg::OpenConfirm(msg) => conn_open_confirm::execute(ctx, msg),
        },
        MsgEnvelope::Channel(msg) => {
            let module_id = lookup_module(router, channel_msg_to_port_id(&msg))?;
            let module =
                router
                    .get_route_mut(&module_id)
                    .ok_or_else(|| PortError::ModuleNotFound {
                        port_id: channel_msg_to_port_id(&msg).clone(),
                    })?;

            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init::execute(ctx, module, msg),
                ChannelMsg::OpenTry(msg) => chan_open_try::execute(ctx, module, msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack::execute(ctx, module, msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm::execute(ctx, module, msg),
                ChannelMsg::CloseInit(msg) => chan_close_init::execute(ctx, module, msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm::execute(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module_id = lookup_module(router, packet_msg_to_port_id(&msg))?;
            let module =
                router
                    .get_route_mut(&module_id)
                    .ok_or_else(|| PortError::ModuleNotFound {
                        port_id: packet_msg_to_port_id(&msg).clone(),
                    })?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet::execute(ctx, module, msg),
                PacketMsg::Ack(msg) => acknowledgement::execute(ctx, module, msg),
                PacketMsg::Timeout(msg) => timeout::execute(ctx, module, msg),
            }
        }
    }
}

fn lookup_module(router: &impl Router, port_id: &PortId) -> Result<ModuleId, ContextError> {
    router
        .lookup_module_by_port(port_id)
        .ok_or_else(|| {
            PortError::UnknownPort {
                port_id: port_id.clone(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use crate::core::channel::channel::{Order, State as ChannelState};
    use crate::core::channel::error::PacketError;
    use crate::core::channel::handler::send_packet;
    use crate::core::channel::packet::{Packet, Sequence};
    use crate::core::connection::connection::{Counterparty, State as ConnectionState};
    use crate::core::connection::error::ConnectionError;
    use crate::core::connection::msgs::{
        ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    };
    use crate::core::connection::version::Version as ConnectionVersion;
    use crate::core::channel::acknowledgement::Acknowledgement;
    use crate::core::channel::timeout::TimeoutHeight;
    use crate::core::context::{ContextError, ValidationContext};
    use crate::core::events::CoreEvent;
    use crate::core::host::identifier::ConnectionId;
    use crate::core::host::path::{
        AckPath, ChannelEndPath, CommitmentPath, ConnectionPath, SeqSendPath,
    };
    use crate::core::connection::connection::ConnectionEnd;
    use crate::mock::dummy_module::DUMMY_ACK;
    use crate::mock::link::{relayer, MockLink};
    use crate::prelude::*;

    fn open_dummy_link(ordering: Order) -> MockLink {
        let mut link = MockLink::new(ordering);
        link.bind_dummy_modules();
        link.open("dummyversion").expect("handshakes complete");
        link
    }

    /// Commits a packet on A and returns it.
    fn send_on_a(link: &mut MockLink, timeout_height: TimeoutHeight) -> Packet {
        let seq_on_a = link
            .a
            .get_next_sequence_send(&SeqSendPath::new(&link.port_id, &link.chan_on_a))
            .expect("channel seeded");
        let packet = Packet {
            seq_on_a,
            port_id_on_a: link.port_id.clone(),
            chan_id_on_a: link.chan_on_a.clone(),
            port_id_on_b: link.port_id.clone(),
            chan_id_on_b: link.chan_on_b.clone(),
            data: b"ping".to_vec(),
            timeout_height_on_b: timeout_height,
        };
        send_packet(&mut link.a, packet.clone()).expect("send succeeds");
        packet
    }

    fn far_timeout(link: &MockLink) -> TimeoutHeight {
        TimeoutHeight::At(link.b.host_height().add(1000))
    }

    #[test]
    fn connection_and_channel_handshake_completes() {
        let link = open_dummy_link(Order::Unordered);

        let conn_on_a = link
            .a
            .connection_end(&link.conn_on_a)
            .expect("connection exists");
        assert!(conn_on_a.state_matches(&ConnectionState::Open));
        assert_eq!(
            conn_on_a.counterparty().connection_id(),
            Some(&link.conn_on_b)
        );

        let conn_on_b = link
            .b
            .connection_end(&link.conn_on_b)
            .expect("connection exists");
        assert!(conn_on_b.state_matches(&ConnectionState::Open));

        let chan_on_a = link
            .a
            .channel_end(&ChannelEndPath::new(&link.port_id, &link.chan_on_a))
            .expect("channel exists");
        assert!(chan_on_a.state_matches(&ChannelState::Open));
        assert_eq!(chan_on_a.counterparty().channel_id(), Some(&link.chan_on_b));

        let chan_on_b = link
            .b
            .channel_end(&ChannelEndPath::new(&link.port_id, &link.chan_on_b))
            .expect("channel exists");
        assert!(chan_on_b.state_matches(&ChannelState::Open));
    }

    #[test]
    fn handshake_steps_cannot_be_skipped() {
        let mut link = MockLink::new(Order::Unordered);
        link.bind_dummy_modules();
        link.create_clients().expect("clients created");

        // INIT on A only.
        link.dispatch_a(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
            connection_id: link.conn_on_a.clone(),
            client_id: link.client_on_a.clone(),
            counterparty: Counterparty::new(link.client_on_b.clone(), None, link.b.prefix()),
            version: None,
            signer: relayer(),
        }))
        .expect("init succeeds");

        // Confirm requires TRYOPEN; the connection is still in INIT.
        link.refresh_client_on_a().expect("client updated");
        let proof = link.b.prove(ConnectionPath::new(&link.conn_on_b));
        let res = link.dispatch_a(ConnectionMsg::OpenConfirm(MsgConnectionOpenConfirm {
            connection_id: link.conn_on_a.clone(),
            proof_ack: proof,
            proof_height: link.b.host_height(),
            signer: relayer(),
        }));
        assert!(matches!(
            res,
            Err(ContextError::Connection(
                ConnectionError::ConnectionMismatch { .. }
            ))
        ));

        // Ack against a connection that never ran INIT.
        let missing = ConnectionId::from_str("connectionnone").expect("valid identifier");
        let proof = link.b.prove(ConnectionPath::new(&link.conn_on_b));
        let res = link.dispatch_a(ConnectionMsg::OpenAck(MsgConnectionOpenAck {
            connection_id: missing,
            counterparty_connection_id: link.conn_on_b.clone(),
            version: ConnectionVersion::default(),
            proof_try: proof,
            proof_height: link.b.host_height(),
            signer: relayer(),
        }));
        assert!(matches!(
            res,
            Err(ContextError::Connection(
                ConnectionError::ConnectionNotFound(_)
            ))
        ));
    }

    #[test]
    fn conn_open_try_rejects_a_tampered_counterparty_state() {
        let mut link = MockLink::new(Order::Unordered);
        link.bind_dummy_modules();
        link.create_clients().expect("clients created");

        link.dispatch_a(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
            connection_id: link.conn_on_a.clone(),
            client_id: link.client_on_a.clone(),
            counterparty: Counterparty::new(link.client_on_b.clone(), None, link.b.prefix()),
            version: None,
            signer: relayer(),
        }))
        .expect("init succeeds");

        link.refresh_client_on_b().expect("client updated");

        // The relayer lies about the counterparty client: the proved INIT
        // end no longer matches the expected one.
        let proof_init = link.a.prove(ConnectionPath::new(&link.conn_on_a));
        let bogus_client = crate::core::host::identifier::ClientId::from_str("bogusclient")
            .expect("valid identifier");
        let res = link.dispatch_b(ConnectionMsg::OpenTry(
            crate::core::connection::msgs::MsgConnectionOpenTry {
                connection_id: link.conn_on_b.clone(),
                client_id: link.client_on_b.clone(),
                counterparty: Counterparty::new(
                    bogus_client,
                    Some(link.conn_on_a.clone()),
                    link.a.prefix(),
                ),
                counterparty_versions:
                    crate::core::connection::version::get_compatible_versions(),
                proof_init,
                proof_height: link.a.host_height(),
                signer: relayer(),
            },
        ));
        assert!(matches!(
            res,
            Err(ContextError::Connection(
                ConnectionError::VerifyConnectionState(_)
            ))
        ));

        // No partial state was written on B.
        assert!(link.b.connection_end(&link.conn_on_b).is_err());
    }

    #[test]
    fn packet_round_trip_on_an_unordered_channel() {
        let mut link = open_dummy_link(Order::Unordered);

        let timeout = far_timeout(&link);
        let packet = send_on_a(&mut link, timeout);
        let commitment_path = CommitmentPath::new(&link.port_id, &link.chan_on_a, packet.seq_on_a);
        assert!(link.a.get_packet_commitment(&commitment_path).is_ok());

        link.relay_recv(packet.clone()).expect("recv succeeds");

        let (acked_packet, ack) = link.last_ack_on_b().expect("ack written");
        assert_eq!(acked_packet, packet);
        assert_eq!(ack.as_bytes(), DUMMY_ACK);

        link.relay_ack(packet.clone(), ack.clone()).expect("ack succeeds");

        // Round trip leaves no residual commitment on the sender and
        // exactly one acknowledgement on the receiver.
        assert!(link.a.get_packet_commitment(&commitment_path).is_err());
        let ack_path = AckPath::new(&link.port_id, &link.chan_on_b, packet.seq_on_a);
        assert!(link.b.get_packet_acknowledgement(&ack_path).is_ok());

        // Replaying the acknowledgement finds nothing left to release.
        let res = link.relay_ack(packet.clone(), ack);
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketCommitmentNotFound(
                _
            )))
        ));

        // Replaying the receive is refused as a duplicate.
        let res = link.relay_recv(packet);
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketAlreadyReceived(_)))
        ));
    }

    #[test]
    fn recv_of_an_expired_packet_fails_despite_a_valid_proof() {
        let mut link = open_dummy_link(Order::Unordered);

        let timeout_height = TimeoutHeight::At(link.b.host_height().add(1));
        let packet = send_on_a(&mut link, timeout_height);

        // Let the destination chain reach the timeout height.
        link.refresh_client_on_a().expect("client updated");
        assert!(packet.timed_out(link.b.host_height()));

        let res = link.relay_recv(packet);
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketTimedOut { .. }))
        ));
    }

    #[test]
    fn timeout_resolves_an_unreceived_packet_exactly_once() {
        let mut link = open_dummy_link(Order::Unordered);

        let timeout_height = TimeoutHeight::At(link.b.host_height().add(1));
        let packet = send_on_a(&mut link, timeout_height);
        let commitment_path = CommitmentPath::new(&link.port_id, &link.chan_on_a, packet.seq_on_a);

        // B reaches the timeout height without ever receiving the packet.
        link.refresh_client_on_a().expect("client updated");

        link.relay_timeout(packet.clone(), Sequence::from(1))
            .expect("timeout succeeds");
        assert!(link.a.get_packet_commitment(&commitment_path).is_err());

        // The packet is resolved; acknowledging it now must fail.
        let ack = Acknowledgement::try_from(DUMMY_ACK.to_vec()).expect("non-empty");
        let res = link.relay_ack(packet.clone(), ack);
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketCommitmentNotFound(
                _
            )))
        ));

        // So must a second timeout.
        let res = link.relay_timeout(packet, Sequence::from(1));
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketCommitmentNotFound(
                _
            )))
        ));
    }

    #[test]
    fn premature_timeout_is_rejected() {
        let mut link = open_dummy_link(Order::Unordered);

        let timeout = far_timeout(&link);
        let packet = send_on_a(&mut link, timeout);
        let res = link.relay_timeout(packet, Sequence::from(1));
        assert!(matches!(
            res,
            Err(ContextError::Packet(
                PacketError::PacketTimeoutNotReached { .. }
            ))
        ));
    }

    #[test]
    fn ordered_channel_enforces_strict_sequencing() {
        let mut link = open_dummy_link(Order::Ordered);

        let first_timeout = far_timeout(&link);
        let first = send_on_a(&mut link, first_timeout);
        let second_timeout = far_timeout(&link);
        let second = send_on_a(&mut link, second_timeout);
        assert_eq!(u64::from(second.seq_on_a), 2);

        // Delivering out of order fails without mutating the counter.
        let res = link.relay_recv(second.clone());
        assert!(matches!(
            res,
            Err(ContextError::Packet(
                PacketError::MismatchedPacketSequence { .. }
            ))
        ));

        link.relay_recv(first.clone()).expect("in-order recv");
        link.relay_recv(second).expect("next in order");

        // A replay of a delivered sequence is a duplicate.
        let res = link.relay_recv(first);
        assert!(matches!(
            res,
            Err(ContextError::Packet(PacketError::PacketAlreadyReceived(_)))
        ));
    }

    #[test]
    fn ordered_timeout_closes_the_channel() {
        let mut link = open_dummy_link(Order::Ordered);

        let timeout_height = TimeoutHeight::At(link.b.host_height().add(1));
        let packet = send_on_a(&mut link, timeout_height);

        link.refresh_client_on_a().expect("client updated");
        link.relay_timeout(packet, Sequence::from(1))
            .expect("timeout succeeds");

        let chan_end_on_a = link
            .a
            .channel_end(&ChannelEndPath::new(&link.port_id, &link.chan_on_a))
            .expect("channel exists");
        assert!(chan_end_on_a.state_matches(&ChannelState::Closed));
        assert!(link
            .a
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::ChannelClosed(_))));

        // A closed channel accepts no further sends.
        let seq_send_path = SeqSendPath::new(&link.port_id, &link.chan_on_a);
        let seq_on_a = link.a.get_next_sequence_send(&seq_send_path).expect("seeded");
        let refused = Packet {
            seq_on_a,
            port_id_on_a: link.port_id.clone(),
            chan_id_on_a: link.chan_on_a.clone(),
            port_id_on_b: link.port_id.clone(),
            chan_id_on_b: link.chan_on_b.clone(),
            data: b"ping".to_vec(),
            timeout_height_on_b: far_timeout(&link),
        };
        assert!(send_packet(&mut link.a, refused).is_err());
    }

    #[test]
    fn events_expose_every_lifecycle_step_to_the_relayer() {
        let mut link = open_dummy_link(Order::Unordered);
        let timeout = far_timeout(&link);
        let packet = send_on_a(&mut link, timeout);
        link.relay_recv(packet.clone()).expect("recv succeeds");
        let (_, ack) = link.last_ack_on_b().expect("ack written");
        link.relay_ack(packet, ack).expect("ack succeeds");

        let kinds_on_a: Vec<&str> = link.a.events.iter().map(|e| e.event_type()).collect();
        for expected in [
            "create_client",
            "connection_open_init",
            "connection_open_ack",
            "channel_open_init",
            "channel_open_ack",
            "send_packet",
            "acknowledge_packet",
        ] {
            assert!(kinds_on_a.contains(&expected), "missing {expected} on A");
        }

        let kinds_on_b: Vec<&str> = link.b.events.iter().map(|e| e.event_type()).collect();
        for expected in [
            "create_client",
            "update_client",
            "connection_open_try",
            "connection_open_confirm",
            "channel_open_try",
            "channel_open_confirm",
            "recv_packet",
            "write_acknowledgement",
        ] {
            assert!(kinds_on_b.contains(&expected), "missing {expected} on B");
        }

        // Attributes are rendered as flat key/value pairs.
        let send_event = link
            .a
            .events
            .iter()
            .find(|e| e.event_type() == "send_packet")
            .expect("send event present");
        assert!(send_event
            .attributes()
            .iter()
            .any(|(k, v)| k == "packet_sequence" && v == "1"));
    }

    #[test]
    fn unbound_port_is_refused() {
        let mut link = MockLink::new(Order::Unordered);
        // No modules bound at all.
        link.create_clients().expect("clients created");
        link.open_connection().expect("connection opens");
        let res = link.open_channel("dummyversion");
        assert!(matches!(
            res,
            Err(ContextError::Port(
                crate::core::port::error::PortError::UnknownPort { .. }
            ))
        ));
    }

    #[test]
    fn verification_failure_leaves_state_untouched() {
        let mut link = open_dummy_link(Order::Unordered);
        let timeout = far_timeout(&link);
        let packet = send_on_a(&mut link, timeout);

        // Tamper with the packet after commitment: the proof no longer
        // matches the recomputed commitment.
        let mut tampered = packet;
        tampered.data = b"tampered".to_vec();
        let res = link.relay_recv(tampered.clone());
        assert!(matches!(
            res,
            Err(ContextError::Packet(
                PacketError::FailedPacketVerification { .. }
            ))
        ));

        // Nothing was written on B for that sequence.
        let ack_path = AckPath::new(&link.port_id, &link.chan_on_b, tampered.seq_on_a);
        assert!(link.b.get_packet_acknowledgement(&ack_path).is_err());
    }

    #[test]
    fn close_confirm_follows_a_proved_counterparty_closure() {
        let mut link = open_dummy_link(Order::Unordered);

        // A closes locally, immediately and without proof.
        link.dispatch_a(crate::core::channel::msgs::ChannelMsg::CloseInit(
            crate::core::channel::msgs::MsgChannelCloseInit {
                port_id_on_a: link.port_id.clone(),
                chan_id_on_a: link.chan_on_a.clone(),
                signer: relayer(),
            },
        ))
        .expect("close init succeeds");

        // B closes after proving A's CLOSED end.
        link.refresh_client_on_b().expect("client updated");
        let proof = link
            .a
            .prove(ChannelEndPath::new(&link.port_id, &link.chan_on_a));
        link.dispatch_b(crate::core::channel::msgs::ChannelMsg::CloseConfirm(
            crate::core::channel::msgs::MsgChannelCloseConfirm {
                port_id_on_b: link.port_id.clone(),
                chan_id_on_b: link.chan_on_b.clone(),
                proof_chan_end_on_a: proof,
                proof_height_on_a: link.a.host_height(),
                signer: relayer(),
            },
        ))
        .expect("close confirm succeeds");

        let chan_end_on_b = link
            .b
            .channel_end(&ChannelEndPath::new(&link.port_id, &link.chan_on_b))
            .expect("channel exists");
        assert!(chan_end_on_b.state_matches(&ChannelState::Closed));

        // Sends are refused on both closed ends.
        let seq = link
            .a
            .get_next_sequence_send(&SeqSendPath::new(&link.port_id, &link.chan_on_a))
            .expect("seeded");
        let refused = Packet {
            seq_on_a: seq,
            port_id_on_a: link.port_id.clone(),
            chan_id_on_a: link.chan_on_a.clone(),
            port_id_on_b: link.port_id.clone(),
            chan_id_on_b: link.chan_on_b.clone(),
            data: b"ping".to_vec(),
            timeout_height_on_b: far_timeout(&link),
        };
        assert!(send_packet(&mut link.a, refused).is_err());
    }

    #[test]
    fn connection_end_is_provable_after_open() {
        // The stored connection end is exactly what counterparties verify
        // against; spot-check the store side.
        let link = open_dummy_link(Order::Unordered);
        let end = link.a.connection_end(&link.conn_on_a).expect("exists");
        let expected = ConnectionEnd::new(
            ConnectionState::Open,
            link.client_on_a.clone(),
            crate::core::connection::connection::Counterparty::new(
                link.client_on_b.clone(),
                Some(link.conn_on_b.clone()),
                link.b.prefix(),
            ),
            vec![ConnectionVersion::default()],
        )
        .expect("non-empty versions");
        assert_eq!(end, expected);
    }
}
