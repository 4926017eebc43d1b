//! Protocol logic for processing `MsgCreateClient` messages.

use crate::core::client::error::ClientError;
use crate::core::client::events::CreateClient;
use crate::core::client::msgs::MsgCreateClient;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ClientConsensusStatePath, ClientStatePath};
use crate::prelude::*;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    // The identifier is caller-chosen and must be fresh; ties always favor
    // the existing record.
    if ctx.client_state(&msg.client_id).is_ok() {
        return Err(ClientError::ClientStateAlreadyExists(msg.client_id.clone()).into());
    }

    msg.client_state.initialise(&msg.consensus_state)?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_type = msg.client_state.client_type();
    let latest_height = msg.client_state.latest_height();

    ctx.store_consensus_state(
        ClientConsensusStatePath::new(&msg.client_id, latest_height),
        msg.consensus_state,
    )?;
    ctx.store_client_state(ClientStatePath::new(&msg.client_id), msg.client_state)?;

    ctx.log_message("success: create_client".to_string())?;
    tracing::debug!(client_id = %msg.client_id, %latest_height, "client created");

    ctx.emit_event(CoreEvent::CreateClient(CreateClient::new(
        msg.client_id,
        client_type,
        latest_height,
    )))?;

    Ok(())
}
