//! Protocol logic for processing `MsgChannelOpenTry` messages.

use crate::core::channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::channel::error::ChannelError;
use crate::core::channel::events::OpenTry;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgChannelOpenTry;
use crate::core::connection::error::ConnectionError;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{
    ChannelEndPath, ClientConsensusStatePath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use crate::core::routing::module::Module;
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(
    ctx_b: &Ctx,
    module: &dyn Module,
    msg: &MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    if ctx_b.channel_end(&chan_end_path_on_b).is_ok() {
        return Err(ChannelError::ChannelAlreadyExists {
            port_id: msg.port_id_on_b.clone(),
            channel_id: msg.chan_id_on_b.clone(),
        }
        .into());
    }

    if msg.connection_hops_on_b.len() != 1 {
        return Err(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            actual: msg.connection_hops_on_b.len() as u64,
        }
        .into());
    }

    let conn_id_on_b = &msg.connection_hops_on_b[0];
    let conn_end_on_b = ctx_b.connection_end(conn_id_on_b)?;
    if !conn_end_on_b.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_b.clone(),
        }
        .into());
    }

    // Verify that the counterparty committed a matching INIT channel end.
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

        let expected_chan_end_on_a = ChannelEnd::new(
            State::Init,
            msg.ordering,
            Counterparty::new(msg.port_id_on_b.clone(), None),
            vec![conn_id_on_a.clone()],
            msg.version_on_a.clone(),
        )?;

        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_chan_end_on_a,
                consensus_state_of_a_on_b.root(),
                ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a).into(),
                encode_json(&expected_chan_end_on_a)?,
            )
            .map_err(ChannelError::VerifyChannelFailed)?;
    }

    let counterparty = Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone()));
    module
        .on_chan_open_try_validate(
            msg.ordering,
            &msg.connection_hops_on_b,
            &msg.port_id_on_b,
            &msg.chan_id_on_b,
            &counterparty,
            &msg.version_on_a,
        )
        .map_err(ContextError::Channel)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_b: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let counterparty = Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone()));
    let (extras, version_on_b) = module
        .on_chan_open_try_execute(
            msg.ordering,
            &msg.connection_hops_on_b,
            &msg.port_id_on_b,
            &msg.chan_id_on_b,
            &counterparty,
            &msg.version_on_a,
        )
        .map_err(ContextError::Channel)?;

    let conn_id_on_b = msg.connection_hops_on_b[0].clone();
    let chan_end_on_b = ChannelEnd::new(
        State::TryOpen,
        msg.ordering,
        counterparty,
        msg.connection_hops_on_b,
        version_on_b,
    )?;

    ctx_b.store_channel(
        ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b),
        chan_end_on_b,
    )?;

    ctx_b.store_next_sequence_send(
        SeqSendPath::new(&msg.port_id_on_b, &msg.chan_id_on_b),
        1.into(),
    )?;
    ctx_b.store_next_sequence_recv(
        SeqRecvPath::new(&msg.port_id_on_b, &msg.chan_id_on_b),
        1.into(),
    )?;
    ctx_b.store_next_sequence_ack(
        SeqAckPath::new(&msg.port_id_on_b, &msg.chan_id_on_b),
        1.into(),
    )?;

    ctx_b.log_message("success: chan_open_try verification passed".to_string())?;
    tracing::debug!(port_id = %msg.port_id_on_b, channel_id = %msg.chan_id_on_b, "channel open try");

    ctx_b.emit_event(CoreEvent::OpenTryChannel(OpenTry::new(
        msg.port_id_on_b,
        msg.chan_id_on_b,
        msg.port_id_on_a,
        Some(msg.chan_id_on_a),
        conn_id_on_b,
    )))?;
    emit_module_extras(ctx_b, extras)?;

    Ok(())
}
