//! Handles the `MsgTransfer` entry point: debit the sender, build the
//! packet, and hand it to the core send path.

use crate::applications::transfer::context::TokenTransferExecutionContext;
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::events::TransferEvent;
use crate::applications::transfer::handler::account_from_signer;
use crate::applications::transfer::msgs::MsgTransfer;
use crate::applications::transfer::packet::TransferPacketData;
use crate::core::channel::handler::send_packet;
use crate::core::channel::packet::Packet;
use crate::core::context::ExecutionContext;
use crate::core::events::CoreEvent;
use crate::core::host::path::{ChannelEndPath, SeqSendPath};
use crate::prelude::*;

pub fn send_transfer<CoreCtx, TransferCtx>(
    ctx_a: &mut CoreCtx,
    transfer_ctx: &mut TransferCtx,
    msg: MsgTransfer,
) -> Result<(), TokenTransferError>
where
    CoreCtx: ExecutionContext,
    TransferCtx: TokenTransferExecutionContext,
{
    msg.validate_basic()?;
    transfer_ctx.can_send_coins()?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let port_id_on_b = chan_end_on_a.counterparty().port_id().clone();
    let chan_id_on_b = chan_end_on_a
        .counterparty()
        .channel_id()
        .ok_or_else(|| TokenTransferError::MissingDestinationChannel {
            channel_id: msg.chan_id_on_a.to_string(),
        })?
        .clone();

    let seq_send_path_on_a = SeqSendPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let seq_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

    let sender = account_from_signer::<TransferCtx>(&msg.sender)?;

    // Debit the sender before committing the packet: escrow when this
    // chain is the source, burn the voucher when it is not.
    for coin in &msg.amount {
        coin.validate()?;
        if msg.source {
            transfer_ctx.escrow_coins_validate(
                &sender,
                &msg.port_id_on_a,
                &msg.chan_id_on_a,
                coin,
            )?;
            transfer_ctx.escrow_coins_execute(
                &sender,
                &msg.port_id_on_a,
                &msg.chan_id_on_a,
                coin,
            )?;
        } else {
            if !coin.denom.has_prefix(&msg.port_id_on_a, &msg.chan_id_on_a) {
                return Err(TokenTransferError::InvalidCoin {
                    description: format!(
                        "voucher {} was not issued through channel {}/{}",
                        coin, msg.port_id_on_a, msg.chan_id_on_a
                    ),
                });
            }
            transfer_ctx.burn_coins_validate(&sender, coin)?;
            transfer_ctx.burn_coins_execute(&sender, coin)?;
        }
    }

    let packet_data = TransferPacketData {
        amount: msg.amount.clone(),
        sender: msg.sender.clone(),
        receiver: msg.receiver.clone(),
        source: msg.source,
    };

    let packet = Packet {
        seq_on_a,
        port_id_on_a: msg.port_id_on_a.clone(),
        chan_id_on_a: msg.chan_id_on_a.clone(),
        port_id_on_b,
        chan_id_on_b,
        data: packet_data.to_bytes()?,
        timeout_height_on_b: msg.timeout_height,
    };

    send_packet(ctx_a, packet)?;

    ctx_a.log_message(format!(
        "transfer: {} from {} to {}",
        msg.amount
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(","),
        msg.sender,
        msg.receiver
    ))?;
    tracing::debug!(sender = %msg.sender, receiver = %msg.receiver, "token transfer initiated");

    ctx_a.emit_event(CoreEvent::Module(
        TransferEvent {
            sender: msg.sender,
            receiver: msg.receiver,
            amount: msg.amount,
        }
        .into(),
    ))?;

    Ok(())
}
