//! Protocol logic for processing `MsgConnectionOpenTry` messages.

use crate::core::client::client_state::AnyClientState;
use crate::core::connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::connection::error::ConnectionError;
use crate::core::connection::events::OpenTry;
use crate::core::connection::msgs::MsgConnectionOpenTry;
use crate::core::connection::version::{get_compatible_versions, pick_version, Version};
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::identifier::ConnectionId;
use crate::core::host::path::{ClientConsensusStatePath, ConnectionPath};
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let vars = LocalVars::new(ctx_b, msg)?;
    validate_impl(ctx_b, msg, &vars)
}

fn validate_impl<Ctx>(
    ctx_b: &Ctx,
    msg: &MsgConnectionOpenTry,
    vars: &LocalVars,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    if ctx_b.connection_end(&msg.connection_id).is_ok() {
        return Err(ConnectionError::ConnectionAlreadyExists(msg.connection_id.clone()).into());
    }

    let client_state_of_a_on_b = ctx_b.client_state(&msg.client_id)?;
    client_state_of_a_on_b.verify_is_active(&msg.client_id)?;
    client_state_of_a_on_b.validate_proof_height(msg.proof_height)?;

    // Verify that the counterparty committed a matching INIT end.
    {
        let consensus_state_of_a_on_b = ctx_b.consensus_state(&ClientConsensusStatePath::new(
            &msg.client_id,
            msg.proof_height,
        ))?;

        let expected_conn_end_on_a = ConnectionEnd::new(
            State::Init,
            msg.counterparty.client_id().clone(),
            Counterparty::new(msg.client_id.clone(), None, ctx_b.commitment_prefix()),
            msg.counterparty_versions.clone(),
        )?;

        verify_counterparty_connection(
            &client_state_of_a_on_b,
            &consensus_state_of_a_on_b,
            msg,
            &vars.conn_id_on_a,
            &expected_conn_end_on_a,
        )?;
    }

    Ok(())
}

fn verify_counterparty_connection(
    client_state: &AnyClientState,
    consensus_state: &crate::core::client::client_state::AnyConsensusState,
    msg: &MsgConnectionOpenTry,
    conn_id_on_a: &ConnectionId,
    expected: &ConnectionEnd,
) -> Result<(), ContextError> {
    client_state
        .verify_membership(
            msg.counterparty.prefix(),
            &msg.proof_init,
            consensus_state.root(),
            ConnectionPath::new(conn_id_on_a).into(),
            encode_json(expected)?,
        )
        .map_err(ConnectionError::VerifyConnectionState)?;

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let vars = LocalVars::new(ctx_b, &msg)?;

    let conn_end_on_b = ConnectionEnd::new(
        State::TryOpen,
        msg.client_id.clone(),
        msg.counterparty.clone(),
        vec![vars.version_on_b],
    )?;

    ctx_b.store_connection(ConnectionPath::new(&msg.connection_id), conn_end_on_b)?;

    ctx_b.log_message("success: conn_open_try verification passed".to_string())?;
    tracing::debug!(connection_id = %msg.connection_id, "connection open try");

    ctx_b.emit_event(CoreEvent::OpenTryConnection(OpenTry::new(
        msg.connection_id,
        msg.client_id,
        Some(vars.conn_id_on_a),
        msg.counterparty.client_id().clone(),
    )))?;

    Ok(())
}

struct LocalVars {
    conn_id_on_a: ConnectionId,
    version_on_b: Version,
}

impl LocalVars {
    fn new<Ctx>(_ctx_b: &Ctx, msg: &MsgConnectionOpenTry) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        Ok(Self {
            conn_id_on_a: msg
                .counterparty
                .connection_id()
                .ok_or(ConnectionError::InvalidCounterparty)?
                .clone(),
            version_on_b: pick_version(&get_compatible_versions(), &msg.counterparty_versions)?,
        })
    }
}
