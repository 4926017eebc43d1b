//! Handles the application-initiated `send_packet` operation. This is not a
//! wire message: applications call it directly after their own pre-send
//! validation.

use crate::core::channel::channel::{Counterparty, State};
use crate::core::channel::commitment::compute_packet_commitment;
use crate::core::channel::error::PacketError;
use crate::core::channel::events::SendPacket;
use crate::core::channel::packet::Packet;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ChannelEndPath, CommitmentPath, SeqSendPath};
use crate::prelude::*;

/// Send the given packet, including all necessary validation.
///
/// Equivalent to calling [`send_packet_validate`], followed by
/// [`send_packet_execute`].
pub fn send_packet(
    ctx_a: &mut impl ExecutionContext,
    packet: Packet,
) -> Result<(), ContextError> {
    send_packet_validate(ctx_a, &packet)?;
    send_packet_execute(ctx_a, packet)
}

/// Validate that sending the given packet would succeed.
pub fn send_packet_validate(
    ctx_a: &impl ValidationContext,
    packet: &Packet,
) -> Result<(), ContextError> {
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );
    chan_end_on_a.verify_counterparty_matches(&counterparty)?;

    // A packet that is already expired locally could never be received.
    let chain_height = ctx_a.host_height()?;
    if packet.timeout_height_on_b.has_expired(chain_height) {
        return Err(PacketError::ExpiredPacketTimeout {
            timeout_height: packet.timeout_height_on_b,
            chain_height,
        }
        .into());
    }

    let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;
    if packet.seq_on_a != next_seq_send_on_a {
        return Err(PacketError::MismatchedPacketSequence {
            expected: next_seq_send_on_a,
            actual: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

/// Send the packet without any validation.
///
/// A prior call to [`send_packet_validate`] MUST have succeeded.
pub fn send_packet_execute(
    ctx_a: &mut impl ExecutionContext,
    packet: Packet,
) -> Result<(), ContextError> {
    {
        let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

        ctx_a.store_next_sequence_send(seq_send_path_on_a, next_seq_send_on_a.increment())?;
    }

    ctx_a.store_packet_commitment(
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        compute_packet_commitment(&packet.data, &packet.timeout_height_on_b),
    )?;

    // emit events and logs
    {
        let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
        let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

        ctx_a.log_message("success: packet send".to_string())?;
        tracing::debug!(sequence = %packet.seq_on_a, "packet send");
        let event = CoreEvent::SendPacket(SendPacket::new(
            packet,
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        ));
        ctx_a.emit_event(event)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::channel::channel::{ChannelEnd, Order};
    use crate::core::channel::error::ChannelError;
    use crate::core::channel::timeout::TimeoutHeight;
    use crate::core::channel::version::Version;
    use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
    use crate::mock::context::MockContext;
    use crate::prelude::*;
    use crate::Height;

    fn port_id() -> PortId {
        PortId::from_str("testportid").expect("valid identifier")
    }

    fn chan_id() -> ChannelId {
        ChannelId::from_str("channelatob").expect("valid identifier")
    }

    fn channel_end(state: State) -> ChannelEnd {
        ChannelEnd::new(
            state,
            Order::Unordered,
            Counterparty::new(
                PortId::from_str("testcpportid").expect("valid identifier"),
                Some(ChannelId::from_str("channelbtoa").expect("valid identifier")),
            ),
            vec![ConnectionId::from_str("connectionatob").expect("valid identifier")],
            Version::from("dummyversion"),
        )
        .expect("one hop")
    }

    fn ctx_with_channel(state: State) -> MockContext {
        MockContext::default().with_channel(&port_id(), &chan_id(), channel_end(state))
    }

    fn packet(sequence: u64, timeout_height: TimeoutHeight) -> Packet {
        Packet {
            seq_on_a: sequence.into(),
            port_id_on_a: port_id(),
            chan_id_on_a: chan_id(),
            port_id_on_b: PortId::from_str("testcpportid").expect("valid identifier"),
            chan_id_on_b: ChannelId::from_str("channelbtoa").expect("valid identifier"),
            data: b"ping".to_vec(),
            timeout_height_on_b: timeout_height,
        }
    }

    fn far_timeout() -> TimeoutHeight {
        TimeoutHeight::At(Height::new(100).expect("non-zero"))
    }

    #[test]
    fn send_commits_the_packet_and_advances_the_counter() {
        let mut ctx = ctx_with_channel(State::Open);

        send_packet(&mut ctx, packet(1, far_timeout())).expect("send succeeds");

        let commitment_path = CommitmentPath::new(&port_id(), &chan_id(), 1.into());
        assert!(ctx.get_packet_commitment(&commitment_path).is_ok());

        let next = ctx
            .get_next_sequence_send(&SeqSendPath::new(&port_id(), &chan_id()))
            .expect("counter present");
        assert_eq!(u64::from(next), 2);

        // The next packet must use the advanced sequence.
        let res = send_packet(&mut ctx, packet(1, far_timeout()));
        assert!(matches!(
            res,
            Err(ContextError::Packet(
                PacketError::MismatchedPacketSequence { .. }
            ))
        ));
        send_packet(&mut ctx, packet(2, far_timeout())).expect("send succeeds");
    }

    #[test]
    fn send_requires_an_open_channel() {
        for state in [State::Init, State::TryOpen, State::Closed] {
            let mut ctx = ctx_with_channel(state);
            let res = send_packet(&mut ctx, packet(1, far_timeout()));
            assert!(
                matches!(
                    res,
                    Err(ContextError::Channel(ChannelError::InvalidState { .. }))
                ),
                "state {state} must refuse sends"
            );
        }
    }

    #[test]
    fn send_requires_a_matching_counterparty() {
        let mut ctx = ctx_with_channel(State::Open);
        let mut mismatched = packet(1, far_timeout());
        mismatched.chan_id_on_b = ChannelId::from_str("wrongchannel").expect("valid identifier");

        let res = send_packet(&mut ctx, mismatched);
        assert!(matches!(
            res,
            Err(ContextError::Channel(
                ChannelError::InvalidCounterparty { .. }
            ))
        ));
    }

    #[test]
    fn send_rejects_a_timeout_in_the_past() {
        // The mock chain sits at height 1; a timeout at height 1 has
        // already expired locally.
        let mut ctx = ctx_with_channel(State::Open);
        let expired = TimeoutHeight::At(Height::min());

        let res = send_packet(&mut ctx, packet(1, expired));
        assert!(matches!(
            res,
            Err(ContextError::Packet(
                PacketError::ExpiredPacketTimeout { .. }
            ))
        ));

        // A packet that never times out is always accepted.
        send_packet(&mut ctx, packet(1, TimeoutHeight::Never)).expect("send succeeds");
    }
}
