//! Protocol logic for processing `MsgConnectionOpenAck` messages.

use crate::core::connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::connection::error::ConnectionError;
use crate::core::connection::events::OpenAck;
use crate::core::connection::msgs::MsgConnectionOpenAck;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ClientConsensusStatePath, ConnectionPath};
use crate::prelude::*;
use crate::utils::encode_json;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let conn_end_on_a = ctx_a.connection_end(&msg.connection_id)?;
    if !conn_end_on_a.state_matches(&State::Init) {
        return Err(ConnectionError::ConnectionMismatch {
            connection_id: msg.connection_id.clone(),
        }
        .into());
    }

    // The counterparty must have picked one of the versions we offered.
    if !conn_end_on_a.versions().contains(&msg.version) {
        return Err(ConnectionError::UnsupportedVersion(msg.version.clone()).into());
    }

    let client_id_on_a = conn_end_on_a.client_id();
    let client_state_of_b_on_a = ctx_a.client_state(client_id_on_a)?;
    client_state_of_b_on_a.verify_is_active(client_id_on_a)?;
    client_state_of_b_on_a.validate_proof_height(msg.proof_height)?;

    // Verify that the counterparty committed a TRYOPEN end referencing this
    // connection.
    {
        let consensus_state_of_b_on_a = ctx_a.consensus_state(&ClientConsensusStatePath::new(
            client_id_on_a,
            msg.proof_height,
        ))?;

        let expected_conn_end_on_b = ConnectionEnd::new(
            State::TryOpen,
            conn_end_on_a.counterparty().client_id().clone(),
            Counterparty::new(
                client_id_on_a.clone(),
                Some(msg.connection_id.clone()),
                ctx_a.commitment_prefix(),
            ),
            vec![msg.version.clone()],
        )?;

        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_try,
                consensus_state_of_b_on_a.root(),
                ConnectionPath::new(&msg.counterparty_connection_id).into(),
                encode_json(&expected_conn_end_on_b)?,
            )
            .map_err(ConnectionError::VerifyConnectionState)?;
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_a = ctx_a.connection_end(&msg.connection_id)?;

    let client_id_on_a = conn_end_on_a.client_id().clone();
    let client_id_on_b = conn_end_on_a.counterparty().client_id().clone();

    let new_conn_end_on_a = ConnectionEnd::new(
        State::Open,
        client_id_on_a.clone(),
        Counterparty::new(
            client_id_on_b.clone(),
            Some(msg.counterparty_connection_id.clone()),
            conn_end_on_a.counterparty().prefix().clone(),
        ),
        vec![msg.version],
    )?;

    ctx_a.store_connection(ConnectionPath::new(&msg.connection_id), new_conn_end_on_a)?;

    ctx_a.log_message("success: conn_open_ack verification passed".to_string())?;
    tracing::debug!(connection_id = %msg.connection_id, "connection open ack");

    ctx_a.emit_event(CoreEvent::OpenAckConnection(OpenAck::new(
        msg.connection_id,
        client_id_on_a,
        Some(msg.counterparty_connection_id),
        client_id_on_b,
    )))?;

    Ok(())
}
