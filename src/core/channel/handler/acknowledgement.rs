//! Protocol logic for processing `MsgAcknowledgement` messages.

use crate::core::channel::channel::{Counterparty, Order, State};
use crate::core::channel::commitment::{compute_ack_commitment, compute_packet_commitment};
use crate::core::channel::error::{ChannelError, PacketError};
use crate::core::channel::events::AcknowledgePacket;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgAcknowledgement;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, CommitmentPath, SeqAckPath,
};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    module: &dyn Module,
    msg: &MsgAcknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );
    chan_end_on_a.verify_counterparty_matches(&counterparty)?;

    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];
    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;
    if !conn_end_on_a.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_a.clone(),
        }
        .into());
    }

    // The commitment must still be present: a packet resolves by at most
    // one of acknowledgement and timeout, and a replayed acknowledgement
    // finds nothing left to release.
    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    let commitment_on_a = ctx_a
        .get_packet_commitment(&commitment_path_on_a)
        .map_err(|_| PacketError::PacketCommitmentNotFound(packet.seq_on_a))?;

    if commitment_on_a != compute_packet_commitment(&packet.data, &packet.timeout_height_on_b) {
        return Err(PacketError::MismatchedPacketCommitment(packet.seq_on_a).into());
    }

    if let Order::Ordered = chan_end_on_a.ordering {
        let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;
        if packet.seq_on_a != next_seq_ack {
            return Err(PacketError::MismatchedPacketSequence {
                expected: next_seq_ack,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    // Verify the receiver's acknowledgement commitment through the
    // connection's client.
    {
        let client_id_on_a = conn_end_on_a.client_id();
        let client_state_of_b_on_a = ctx_a.client_state(client_id_on_a)?;
        client_state_of_b_on_a.verify_is_active(client_id_on_a)?;
        client_state_of_b_on_a.validate_proof_height(msg.proof_height_on_b)?;

        let consensus_state_of_b_on_a = ctx_a.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_a,
            msg.proof_height_on_b,
        ))?;

        let ack_commitment = compute_ack_commitment(&msg.acknowledgement);
        let ack_path_on_b =
            AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_acked_on_b,
                consensus_state_of_b_on_a.root(),
                ack_path_on_b.into(),
                encode_json(&ack_commitment)?,
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: packet.seq_on_a,
                client_error: e,
            })?;
    }

    module
        .on_acknowledgement_packet_validate(packet, &msg.acknowledgement, &msg.signer)
        .map_err(ContextError::Packet)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let chan_end_path_on_a =
        ChannelEndPath::new(&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

    let (extras, cb_result) =
        module.on_acknowledgement_packet_execute(&msg.packet, &msg.acknowledgement, &msg.signer);
    cb_result.map_err(ContextError::Packet)?;

    // apply state changes
    {
        let commitment_path_on_a = CommitmentPath::new(
            &msg.packet.port_id_on_a,
            &msg.packet.chan_id_on_a,
            msg.packet.seq_on_a,
        );
        ctx_a.delete_packet_commitment(commitment_path_on_a)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            // Validation pinned `seq == next_seq_ack`.
            let seq_ack_path_on_a =
                SeqAckPath::new(&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a);
            ctx_a.store_next_sequence_ack(seq_ack_path_on_a, msg.packet.seq_on_a.increment())?;
        }
    }

    // emit events and logs
    {
        ctx_a.log_message("success: packet acknowledgement".to_string())?;
        tracing::debug!(sequence = %msg.packet.seq_on_a, "packet acknowledgement");

        ctx_a.emit_event(CoreEvent::AcknowledgePacket(AcknowledgePacket::new(
            msg.packet,
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        )))?;
        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}
