//! Protocol logic for processing `MsgChannelOpenConfirm` messages.

use crate::core::channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::channel::error::ChannelError;
use crate::core::channel::events::OpenConfirm;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgChannelOpenConfirm;
use crate::core::connection::error::ConnectionError;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ChannelEndPath, ClientConsensusStatePath};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    module: &dyn Module,
    msg: &MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;
    chan_end_on_b.verify_state_matches(&State::TryOpen)?;

    let conn_id_on_b = &chan_end_on_b.connection_hops()[0];
    let conn_end_on_b = ctx_b.connection_end(conn_id_on_b)?;
    if !conn_end_on_b.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_b.clone(),
        }
        .into());
    }

    // Verify that the counterparty channel reached OPEN.
    {
        let client_id_on_b = conn_end_on_b.client_id();
        let client_state_of_a_on_b = ctx_b.client_state(client_id_on_b)?;
        client_state_of_a_on_b.verify_is_active(client_id_on_b)?;
        client_state_of_a_on_b.validate_proof_height(msg.proof_height_on_a)?;

        let consensus_state_of_a_on_b = ctx_b.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_b,
            msg.proof_height_on_a,
        ))?;

        let conn_id_on_a = conn_end_on_b
            .counterparty()
            .connection_id()
            .ok_or(ConnectionError::InvalidCounterparty)?;

        let chan_id_on_a = chan_end_on_b
            .counterparty()
            .channel_id()
            .ok_or(ChannelError::MissingCounterparty)?;

        let expected_chan_end_on_a = ChannelEnd::new(
            State::Open,
            *chan_end_on_b.ordering(),
            Counterparty::new(msg.port_id_on_b.clone(), Some(msg.chan_id_on_b.clone())),
            vec![conn_id_on_a.clone()],
            chan_end_on_b.version().clone(),
        )?;

        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_chan_end_on_a,
                consensus_state_of_a_on_b.root(),
                ChannelEndPath::new(chan_end_on_b.counterparty().port_id(), chan_id_on_a).into(),
                encode_json(&expected_chan_end_on_a)?,
            )
            .map_err(ChannelError::VerifyChannelFailed)?;
    }

    module
        .on_chan_open_confirm_validate(&msg.port_id_on_b, &msg.chan_id_on_b)
        .map_err(ContextError::Channel)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let extras = module
        .on_chan_open_confirm_execute(&msg.port_id_on_b, &msg.chan_id_on_b)
        .map_err(ContextError::Channel)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let counterparty_port_id = chan_end_on_b.counterparty().port_id().clone();
    let counterparty_chan_id = chan_end_on_b.counterparty().channel_id().cloned();
    let conn_id_on_b = chan_end_on_b.connection_hops()[0].clone();

    let new_chan_end_on_b = ChannelEnd::new(
        State::Open,
        *chan_end_on_b.ordering(),
        chan_end_on_b.counterparty().clone(),
        chan_end_on_b.connection_hops().to_vec(),
        chan_end_on_b.version().clone(),
    )?;

    ctx_b.store_channel(chan_end_path_on_b, new_chan_end_on_b)?;

    ctx_b.log_message("success: chan_open_confirm verification passed".to_string())?;
    tracing::debug!(port_id = %msg.port_id_on_b, channel_id = %msg.chan_id_on_b, "channel open confirm");

    ctx_b.emit_event(CoreEvent::OpenConfirmChannel(OpenConfirm::new(
        msg.port_id_on_b,
        msg.chan_id_on_b,
        counterparty_port_id,
        counterparty_chan_id,
        conn_id_on_b,
    )))?;
    emit_module_extras(ctx_b, extras)?;

    Ok(())
}
