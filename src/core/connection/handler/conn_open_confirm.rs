//! Protocol logic for processing `MsgConnectionOpenConfirm` messages.

use crate::core::connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::connection::error::ConnectionError;
use crate::core::connection::events::OpenConfirm;
use crate::core::connection::msgs::MsgConnectionOpenConfirm;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ClientConsensusStatePath, ConnectionPath};
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let conn_end_on_b = ctx_b.connection_end(&msg.connection_id)?;
    if !conn_end_on_b.state_matches(&State::TryOpen) {
        return Err(ConnectionError::ConnectionMismatch {
            connection_id: msg.connection_id.clone(),
        }
        .into());
    }

    let conn_id_on_a = conn_end_on_b
        .counterparty()
        .connection_id()
        .ok_or(ConnectionError::InvalidCounterparty)?;

    let client_id_on_b = conn_end_on_b.client_id();
    let client_state_of_a_on_b = ctx_b.client_state(client_id_on_b)?;
    client_state_of_a_on_b.verify_is_active(client_id_on_b)?;
    client_state_of_a_on_b.validate_proof_height(msg.proof_height)?;

    // Verify that the counterparty reached OPEN referencing this connection.
    {
        let consensus_state_of_a_on_b = ctx_b.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_b,
            msg.proof_height,
        ))?;

        let expected_conn_end_on_a = ConnectionEnd::new(
            State::Open,
            conn_end_on_b.counterparty().client_id().clone(),
            Counterparty::new(
                client_id_on_b.clone(),
                Some(msg.connection_id.clone()),
                ctx_b.commitment_prefix(),
            ),
            conn_end_on_b.versions().to_vec(),
        )?;

        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_ack,
                consensus_state_of_a_on_b.root(),
                ConnectionPath::new(conn_id_on_a).into(),
                encode_json(&expected_conn_end_on_a)?,
            )
            .map_err(ConnectionError::VerifyConnectionState)?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_b = ctx_b.connection_end(&msg.connection_id)?;

    let client_id_on_b = conn_end_on_b.client_id().clone();
    let client_id_on_a = conn_end_on_b.counterparty().client_id().clone();
    let conn_id_on_a = conn_end_on_b.counterparty().connection_id().cloned();

    let new_conn_end_on_b = ConnectionEnd::new(
        State::Open,
        client_id_on_b.clone(),
        conn_end_on_b.counterparty().clone(),
        conn_end_on_b.versions().to_vec(),
    )?;

    ctx_b.store_connection(ConnectionPath::new(&msg.connection_id), new_conn_end_on_b)?;

    ctx_b.log_message("success: conn_open_confirm verification passed".to_string())?;
    tracing::debug!(connection_id = %msg.connection_id, "connection open confirm");

    ctx_b.emit_event(CoreEvent::OpenConfirmConnection(OpenConfirm::new(
        msg.connection_id,
        client_id_on_b,
        conn_id_on_a,
        client_id_on_a,
    )))?;

    Ok(())
}
