//! Protocol logic for processing `MsgChannelOpenAck` messages.

use crate::core::channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::channel::error::ChannelError;
use crate::core::channel::events::OpenAck;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgChannelOpenAck;
use crate::core::connection::error::ConnectionError;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ChannelEndPath, ClientConsensusStatePath};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    module: &dyn Module,
    msg: &MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    chan_end_on_a.verify_state_matches(&State::Init)?;

    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];
    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;
    if !conn_end_on_a.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_a.clone(),
        }
        .into());
    }

    // Verify that the counterparty committed a TRYOPEN end referencing this
    // channel.
    {
        let client_id_on_a = conn_end_on_a.client_id();
        let client_state_of_b_on_a = ctx_a.client_state(client_id_on_a)?;
        client_state_of_b_on_a.verify_is_active(client_id_on_a)?;
        client_state_of_b_on_a.validate_proof_height(msg.proof_height_on_b)?;

        let consensus_state_of_b_on_a = ctx_a.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_a,
            msg.proof_height_on_b,
        ))?;

        let conn_id_on_b = conn_end_on_a
            .counterparty()
            .connection_id()
            .ok_or(ConnectionError::InvalidCounterparty)?;

        let expected_chan_end_on_b = ChannelEnd::new(
            State::TryOpen,
            *chan_end_on_a.ordering(),
            Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone())),
            vec![conn_id_on_b.clone()],
            msg.version_on_b.clone(),
        )?;

        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_chan_end_on_b,
                consensus_state_of_b_on_a.root(),
                ChannelEndPath::new(chan_end_on_a.counterparty().port_id(), &msg.chan_id_on_b)
                    .into(),
                encode_json(&expected_chan_end_on_b)?,
            )
            .map_err(ChannelError::VerifyChannelFailed)?;
    }

    module
        .on_chan_open_ack_validate(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)
        .map_err(ContextError::Channel)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let extras = module
        .on_chan_open_ack_execute(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)
        .map_err(ContextError::Channel)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let counterparty_port_id = chan_end_on_a.counterparty().port_id().clone();
    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

    let new_chan_end_on_a = ChannelEnd::new(
        State::Open,
        *chan_end_on_a.ordering(),
        Counterparty::new(counterparty_port_id.clone(), Some(msg.chan_id_on_b.clone())),
        chan_end_on_a.connection_hops().to_vec(),
        msg.version_on_b,
    )?;

    ctx_a.store_channel(chan_end_path_on_a, new_chan_end_on_a)?;

    ctx_a.log_message("success: chan_open_ack verification passed".to_string())?;
    tracing::debug!(port_id = %msg.port_id_on_a, channel_id = %msg.chan_id_on_a, "channel open ack");

    ctx_a.emit_event(CoreEvent::OpenAckChannel(OpenAck::new(
        msg.port_id_on_a,
        msg.chan_id_on_a,
        counterparty_port_id,
        Some(msg.chan_id_on_b),
        conn_id_on_a,
    )))?;
    emit_module_extras(ctx_a, extras)?;

    Ok(())
}
