//! Protocol logic for processing `MsgRecvPacket` messages.

use crate::core::channel::channel::{Counterparty, Order, State};
use crate::core::channel::commitment::{compute_ack_commitment, compute_packet_commitment};
use crate::core::channel::error::{ChannelError, PacketError};
use crate::core::channel::events::{ReceivePacket, WriteAcknowledgement};
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgRecvPacket;
use crate::core::channel::packet::Receipt;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, CommitmentPath, ReceiptPath, SeqRecvPath,
};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgRecvPacket) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    // Nothing to validate with the module: `on_recv_packet_execute` cannot
    // fail. An application-level problem becomes an error acknowledgement.
    ctx_b.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    chan_end_on_b.verify_state_matches(&State::Open)?;

    let counterparty = Counterparty::new(
        packet.port_id_on_a.clone(),
        Some(packet.chan_id_on_a.clone()),
    );
    chan_end_on_b.verify_counterparty_matches(&counterparty)?;

    let conn_id_on_b = &chan_end_on_b.connection_hops()[0];
    let conn_end_on_b = ctx_b.connection_end(conn_id_on_b)?;
    if !conn_end_on_b.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_b.clone(),
        }
        .into());
    }

    // An expired packet must not be processed, however valid its proof; the
    // sender resolves it through the timeout path instead.
    let chain_height = ctx_b.host_height()?;
    if packet.timed_out(chain_height) {
        return Err(PacketError::PacketTimedOut {
            timeout_height: packet.timeout_height_on_b,
            chain_height,
        }
        .into());
    }

    // Replay protection runs before proof verification: once a sequence is
    // acknowledged the sender deletes its commitment, and a replayed packet
    // must surface as the duplicate it is rather than as a proof failure.
    match chan_end_on_b.ordering {
        Order::Ordered => {
            let seq_recv_path_on_b =
                SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            if packet.seq_on_a < next_seq_recv {
                return Err(PacketError::PacketAlreadyReceived(packet.seq_on_a).into());
            }
            if packet.seq_on_a > next_seq_recv {
                return Err(PacketError::MismatchedPacketSequence {
                    expected: next_seq_recv,
                    actual: packet.seq_on_a,
                }
                .into());
            }
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            if ctx_b.get_packet_receipt(&receipt_path_on_b).is_ok() {
                return Err(PacketError::PacketAlreadyReceived(packet.seq_on_a).into());
            }
        }
    }

    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b).is_ok() {
        return Err(PacketError::AcknowledgementExists(packet.seq_on_a).into());
    }

    // Verify the sender's packet commitment through the connection's client.
    {
        let client_id_on_b = conn_end_on_b.client_id();
        let client_state_of_a_on_b = ctx_b.client_state(client_id_on_b)?;
        client_state_of_a_on_b.verify_is_active(client_id_on_b)?;
        client_state_of_a_on_b.validate_proof_height(msg.proof_height_on_a)?;

        let consensus_state_of_a_on_b = ctx_b.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_b,
            msg.proof_height_on_a,
        ))?;

        let expected_commitment_on_a =
            compute_packet_commitment(&packet.data, &packet.timeout_height_on_b);
        let commitment_path_on_a =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_commitment_on_a,
                consensus_state_of_a_on_b.root(),
                commitment_path_on_a.into(),
                encode_json(&expected_commitment_on_a)?,
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: packet.seq_on_a,
                client_error: e,
            })?;
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let chan_end_path_on_b =
        ChannelEndPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let (extras, acknowledgement) = module.on_recv_packet_execute(&msg.packet, &msg.signer);

    // state changes
    {
        match chan_end_on_b.ordering {
            Order::Unordered => {
                let receipt_path_on_b = ReceiptPath::new(
                    &msg.packet.port_id_on_b,
                    &msg.packet.chan_id_on_b,
                    msg.packet.seq_on_a,
                );
                ctx_b.store_packet_receipt(receipt_path_on_b, Receipt::Ok)?;
            }
            Order::Ordered => {
                let seq_recv_path_on_b =
                    SeqRecvPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
                let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
                ctx_b.store_next_sequence_recv(seq_recv_path_on_b, next_seq_recv.increment())?;
            }
        }

        let ack_path_on_b = AckPath::new(
            &msg.packet.port_id_on_b,
            &msg.packet.chan_id_on_b,
            msg.packet.seq_on_a,
        );
        ctx_b.store_packet_acknowledgement(
            ack_path_on_b,
            compute_ack_commitment(&acknowledgement),
        )?;
    }

    // emit events and logs
    {
        let conn_id_on_b = chan_end_on_b.connection_hops()[0].clone();

        ctx_b.log_message("success: packet receive".to_string())?;
        ctx_b.log_message("success: packet write acknowledgement".to_string())?;
        tracing::debug!(sequence = %msg.packet.seq_on_a, "packet receive");

        ctx_b.emit_event(CoreEvent::ReceivePacket(ReceivePacket::new(
            msg.packet.clone(),
            *chan_end_on_b.ordering(),
            conn_id_on_b.clone(),
        )))?;
        ctx_b.emit_event(CoreEvent::WriteAcknowledgement(WriteAcknowledgement::new(
            msg.packet,
            acknowledgement,
            conn_id_on_b,
        )))?;
        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}
