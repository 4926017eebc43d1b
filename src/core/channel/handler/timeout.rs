//! Protocol logic for processing `MsgTimeout` messages.
//!
//! A timeout resolves a packet whose commitment is still outstanding by
//! proving non-receipt past the timeout height. On ordered channels a
//! timeout additionally closes the channel: strict ordering cannot be
//! honored once a sequence has lapsed.

use crate::core::channel::channel::{ChannelEnd, Counterparty, Order, State};
use crate::core::channel::commitment::compute_packet_commitment;
use crate::core::channel::error::PacketError;
use crate::core::channel::events::{ChannelClosed, TimeoutPacket};
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgTimeout;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{
    ChannelEndPath, ClientConsensusStatePath, CommitmentPath, ReceiptPath, SeqRecvPath,
};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(ctx_a: &Ctx, module: &dyn Module, msg: &MsgTimeout) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // In-flight packets of an already-closed channel may still be timed out
    // to release their resources, so no open-state requirement here.
    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );
    chan_end_on_a.verify_counterparty_matches(&counterparty)?;

    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];
    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;

    // The commitment must still be present: a packet resolves by at most
    // one of acknowledgement and timeout.
    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    let commitment_on_a = ctx_a
        .get_packet_commitment(&commitment_path_on_a)
        .map_err(|_| PacketError::PacketCommitmentNotFound(packet.seq_on_a))?;

    if commitment_on_a != compute_packet_commitment(&packet.data, &packet.timeout_height_on_b) {
        return Err(PacketError::MismatchedPacketCommitment(packet.seq_on_a).into());
    }

    // The timeout must have been reached on the counterparty at the height
    // the non-receipt proof was taken.
    if !packet.timeout_height_on_b.has_expired(msg.proof_height_on_b) {
        return Err(PacketError::PacketTimeoutNotReached {
            timeout_height: packet.timeout_height_on_b,
            proof_height: msg.proof_height_on_b,
        }
        .into());
    }

    // Verify non-receipt through the connection's client.
    {
        let client_id_on_a = conn_end_on_a.client_id();
        let client_state_of_b_on_a = ctx_a.client_state(client_id_on_a)?;
        client_state_of_b_on_a.verify_is_active(client_id_on_a)?;
        client_state_of_b_on_a.validate_proof_height(msg.proof_height_on_b)?;

        let consensus_state_of_b_on_a = ctx_a.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_a,
            msg.proof_height_on_b,
        ))?;

        let verification_result = match chan_end_on_a.ordering {
            Order::Ordered => {
                // A receive would have bumped nextSequenceRecv past the
                // packet; proving it still lags proves non-receipt.
                if packet.seq_on_a < msg.next_seq_recv_on_b {
                    return Err(PacketError::PacketAlreadyReceived(packet.seq_on_a).into());
                }
                let seq_recv_path_on_b =
                    SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
                client_state_of_b_on_a.verify_membership(
                    conn_end_on_a.counterparty().prefix(),
                    &msg.proof_unreceived_on_b,
                    consensus_state_of_b_on_a.root(),
                    seq_recv_path_on_b.into(),
                    encode_json(&msg.next_seq_recv_on_b)?,
                )
            }
            Order::Unordered => {
                let receipt_path_on_b =
                    ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
                client_state_of_b_on_a.verify_non_membership(
                    conn_end_on_a.counterparty().prefix(),
                    &msg.proof_unreceived_on_b,
                    consensus_state_of_b_on_a.root(),
                    receipt_path_on_b.into(),
                )
            }
        };

        verification_result.map_err(|e| PacketError::FailedPacketVerification {
            sequence: packet.seq_on_a,
            client_error: e,
        })?;
    }

    module
        .on_timeout_packet_validate(packet, &msg.signer)
        .map_err(ContextError::Packet)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgTimeout,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let chan_end_path_on_a =
        ChannelEndPath::new(&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

    let (extras, cb_result) = module.on_timeout_packet_execute(&msg.packet, &msg.signer);
    cb_result.map_err(ContextError::Packet)?;

    // apply state changes
    {
        let commitment_path_on_a = CommitmentPath::new(
            &msg.packet.port_id_on_a,
            &msg.packet.chan_id_on_a,
            msg.packet.seq_on_a,
        );
        ctx_a.delete_packet_commitment(commitment_path_on_a)?;
    }

    // A timed-out sequence breaks strict ordering for good.
    let ordered_channel_closed = if let Order::Ordered = chan_end_on_a.ordering {
        let closed_chan_end_on_a = ChannelEnd::new(
            State::Closed,
            *chan_end_on_a.ordering(),
            chan_end_on_a.counterparty().clone(),
            chan_end_on_a.connection_hops().to_vec(),
            chan_end_on_a.version().clone(),
        )?;
        ctx_a.store_channel(chan_end_path_on_a, closed_chan_end_on_a)?;
        true
    } else {
        false
    };

    // emit events and logs
    {
        ctx_a.log_message("success: packet timeout".to_string())?;
        tracing::debug!(sequence = %msg.packet.seq_on_a, "packet timeout");

        if ordered_channel_closed {
            ctx_a.emit_event(CoreEvent::ChannelClosed(ChannelClosed::new(
                msg.packet.port_id_on_a.clone(),
                msg.packet.chan_id_on_a.clone(),
                chan_end_on_a.counterparty().port_id().clone(),
                chan_end_on_a.counterparty().channel_id().cloned(),
                conn_id_on_a.clone(),
            )))?;
        }

        ctx_a.emit_event(CoreEvent::TimeoutPacket(TimeoutPacket::new(
            msg.packet,
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        )))?;
        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}
