//! The refund path shared by failed acknowledgements and timeouts:
//! reverses whatever debit the send performed.

use crate::applications::transfer::coin::Coin;
use crate::applications::transfer::context::TokenTransferExecutionContext;
use crate::applications::transfer::error::TokenTransferError;
use crate::applications::transfer::handler::account_from_signer;
use crate::applications::transfer::packet::TransferPacketData;
use crate::core::channel::packet::Packet;
use crate::prelude::*;

pub fn refund_packet_token<Ctx>(
    ctx_a: &mut Ctx,
    packet: &Packet,
    data: &TransferPacketData,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let sender = account_from_signer::<Ctx>(&data.sender)?;

    for coin in &data.amount {
        if data.source {
            // The send escrowed; give the coins back.
            ctx_a.unescrow_coins_validate(
                &sender,
                &packet.port_id_on_a,
                &packet.chan_id_on_a,
                coin,
            )?;
            ctx_a.unescrow_coins_execute(
                &sender,
                &packet.port_id_on_a,
                &packet.chan_id_on_a,
                coin,
            )?;
        } else {
            // The send burned vouchers; mint them back.
            ctx_a.mint_coins_validate(&sender, coin)?;
            ctx_a.mint_coins_execute(&sender, coin)?;
        }
    }

    Ok(())
}

/// Validation-only twin of [`refund_packet_token`].
pub fn refund_packet_token_validate<Ctx>(
    ctx_a: &Ctx,
    packet: &Packet,
    data: &TransferPacketData,
) -> Result<(), TokenTransferError>
where
    Ctx: crate::applications::transfer::context::TokenTransferValidationContext,
{
    let sender = account_from_signer::<Ctx>(&data.sender)?;

    for coin in &data.amount {
        if data.source {
            ctx_a.unescrow_coins_validate(
                &sender,
                &packet.port_id_on_a,
                &packet.chan_id_on_a,
                coin,
            )?;
        } else {
            ctx_a.mint_coins_validate(&sender, coin)?;
        }
    }

    Ok(())
}
