//! Application-side transfer logic: the send entry point, the receive
//! crediting, and the shared refund path.

pub mod on_recv_packet;
pub mod refund;
pub mod send_transfer;

pub use on_recv_packet::process_recv_packet_execute;
pub use refund::{refund_packet_token, refund_packet_token_validate};
pub use send_transfer::send_transfer;

use crate::applications::transfer::context::TokenTransferValidationContext;
use crate::applications::transfer::error::TokenTransferError;
use crate::Signer;

/// Resolves a signer into the host's account representation.
pub(crate) fn account_from_signer<Ctx>(
    signer: &Signer,
) -> Result<Ctx::AccountId, TokenTransferError>
where
    Ctx: TokenTransferValidationContext + ?Sized,
{
    Ctx::AccountId::try_from(signer.clone()).map_err(|_| TokenTransferError::FailedToParseAccount)
}
