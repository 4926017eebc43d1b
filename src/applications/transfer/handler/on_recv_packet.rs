//! Credits a received transfer packet: mint vouchers when the sender chain
//! was the source, release escrow when this chain is.

use crate::applications::transfer::coin::Coin;
use crate::applications::transfer::context::TokenTransferExecutionContext;
use crate::applications::transfer::denom::{PrefixedDenom, TracePrefix};
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::events::RecvEvent;
use crate::applications::transfer::handler::account_from_signer;
use crate::applications::transfer::packet::TransferPacketData;
use crate::core::channel::packet::Packet;
use crate::core::routing::module::ModuleExtras;
use crate::prelude::*;

/// This function handles the transfer receiving logic.
///
/// Validation and execution run together here: receiving cannot fail the
/// enclosing message, it can only produce an error acknowledgement, so
/// there is no separate validation callback to hang the checks on.
pub fn process_recv_packet_execute<Ctx>(
    ctx_b: &mut Ctx,
    packet: &Packet,
    data: TransferPacketData,
) -> Result<ModuleExtras, TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    ctx_b.can_receive_coins()?;
    data.validate_basic()?;

    let receiver = account_from_signer::<Ctx>(&data.receiver)?;

    if data.source {
        // The sender chain is the source: mint vouchers carrying the trace
        // of the channel they arrived through.
        for coin in &data.amount {
            let mut voucher_denom = coin.denom.clone();
            voucher_denom.add_trace_prefix(TracePrefix::new(
                packet.port_id_on_b.clone(),
                packet.chan_id_on_b.clone(),
            ))?;
            let voucher = Coin::new(voucher_denom, coin.amount);

            ctx_b.mint_coins_validate(&receiver, &voucher)?;
            ctx_b.mint_coins_execute(&receiver, &voucher)?;
        }
    } else {
        // This chain is the source: the vouchers travelled home; release
        // the matching escrow.
        for coin in &data.amount {
            if !coin.denom.has_prefix(&packet.port_id_on_a, &packet.chan_id_on_a) {
                return Err(TokenTransferError::InvalidCoin {
                    description: format!(
                        "voucher {} was not issued through channel {}/{}",
                        coin, packet.port_id_on_a, packet.chan_id_on_a
                    ),
                });
            }
            let base_coin = Coin::new(
                PrefixedDenom::native(coin.denom.base.clone()),
                coin.amount,
            );

            ctx_b.unescrow_coins_validate(
                &receiver,
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                &base_coin,
            )?;
            ctx_b.unescrow_coins_execute(
                &receiver,
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                &base_coin,
            )?;
        }
    }

    let extras = ModuleExtras {
        events: vec![RecvEvent {
            receiver: data.receiver,
            amount: data.amount,
            success: true,
        }
        .into()],
        log: Vec::new(),
    };

    Ok(extras)
}
