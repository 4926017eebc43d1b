//! Protocol logic for processing `MsgUpdateClient` messages.

use crate::core::client::events::UpdateClient;
use crate::core::client::msgs::MsgUpdateClient;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ClientConsensusStatePath, ClientStatePath};
use crate::prelude::*;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    // Read client state from the host chain store. The client must already
    // exist and must not be frozen.
    let client_state = ctx.client_state(&msg.client_id)?;
    client_state.verify_is_active(&msg.client_id)?;

    // Verify the header against the latest trusted consensus state.
    let trusted = ctx.consensus_state(&ClientConsensusStatePath::new(
        &msg.client_id,
        client_state.latest_height(),
    ))?;
    client_state.verify_header(&trusted, &msg.header)?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpdateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_state = ctx.client_state(&msg.client_id)?;

    let (new_client_state, new_consensus_state) = client_state.update_state(&msg.header)?;

    let client_type = new_client_state.client_type();
    let consensus_height = msg.header.height();

    ctx.store_consensus_state(
        ClientConsensusStatePath::new(&msg.client_id, consensus_height),
        new_consensus_state,
    )?;
    ctx.store_client_state(ClientStatePath::new(&msg.client_id), new_client_state)?;

    ctx.log_message("success: update_client".to_string())?;
    tracing::debug!(client_id = %msg.client_id, %consensus_height, "client updated");

    ctx.emit_event(CoreEvent::UpdateClient(UpdateClient::new(
        msg.client_id,
        client_type,
        consensus_height,
    )))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::client::error::ClientError;
    use crate::core::client::msgs::{ClientMsg, MsgCreateClient};
    use crate::core::entrypoint::dispatch;
    use crate::core::host::identifier::ClientId;
    use crate::core::routing::MsgEnvelope;
    use crate::mock::client_state::{MockClientState, MockConsensusState, MockHeader};
    use crate::mock::context::MockContext;
    use crate::mock::router::MockRouter;
    use crate::Height;
    use crate::Signer;

    fn signer() -> Signer {
        Signer::from("testsigner")
    }

    fn client_id() -> ClientId {
        ClientId::from_str("07-tendermint-0").expect("valid identifier")
    }

    fn create_client_at_height_one(ctx: &mut MockContext, router: &mut MockRouter) {
        let msg = MsgCreateClient::new(
            client_id(),
            MockClientState::new(Height::min()).into(),
            MockConsensusState::new(b"root at height one").into(),
            signer(),
        );
        dispatch(ctx, router, MsgEnvelope::Client(ClientMsg::CreateClient(msg)))
            .expect("client created");
    }

    #[test]
    fn update_advances_the_latest_height() {
        let mut ctx = MockContext::default();
        let mut router = MockRouter::new();
        create_client_at_height_one(&mut ctx, &mut router);

        let header = MockHeader::new(Height::new(2).expect("non-zero"), b"root at height two");
        let msg = MsgUpdateClient {
            client_id: client_id(),
            header: header.into(),
            signer: signer(),
        };
        dispatch(&mut ctx, &mut router, MsgEnvelope::Client(ClientMsg::UpdateClient(msg)))
            .expect("update accepted");

        let client_state = ctx.client_state(&client_id()).expect("client exists");
        assert_eq!(client_state.latest_height(), Height::new(2).expect("non-zero"));

        // The consensus state at the new height is retrievable.
        let consensus = ctx
            .consensus_state(&crate::core::host::path::ClientConsensusStatePath::new(
                &client_id(),
                Height::new(2).expect("non-zero"),
            ))
            .expect("consensus stored");
        assert_eq!(consensus.root().as_bytes(), b"root at height two");
    }

    #[test]
    fn conflicting_header_at_a_populated_height_is_rejected() {
        let mut ctx = MockContext::default();
        let mut router = MockRouter::new();
        create_client_at_height_one(&mut ctx, &mut router);

        let header = MockHeader::new(Height::new(2).expect("non-zero"), b"root at height two");
        let msg = MsgUpdateClient {
            client_id: client_id(),
            header: header.into(),
            signer: signer(),
        };
        dispatch(&mut ctx, &mut router, MsgEnvelope::Client(ClientMsg::UpdateClient(msg)))
            .expect("update accepted");

        // A second header for height 2 with a different root: ties favor
        // the existing record.
        let conflicting = MockHeader::new(Height::new(2).expect("non-zero"), b"another root");
        let msg = MsgUpdateClient {
            client_id: client_id(),
            header: conflicting.into(),
            signer: signer(),
        };
        let res = dispatch(
            &mut ctx,
            &mut router,
            MsgEnvelope::Client(ClientMsg::UpdateClient(msg)),
        );
        assert!(matches!(
            res,
            Err(ContextError::Client(ClientError::LowHeaderHeight { .. }))
        ));

        // The first record survives.
        let consensus = ctx
            .consensus_state(&crate::core::host::path::ClientConsensusStatePath::new(
                &client_id(),
                Height::new(2).expect("non-zero"),
            ))
            .expect("consensus stored");
        assert_eq!(consensus.root().as_bytes(), b"root at height two");
    }

    #[test]
    fn update_of_a_missing_client_fails() {
        let mut ctx = MockContext::default();
        let mut router = MockRouter::new();

        let header = MockHeader::new(Height::new(2).expect("non-zero"), b"some root");
        let msg = MsgUpdateClient {
            client_id: client_id(),
            header: header.into(),
            signer: signer(),
        };
        let res = dispatch(
            &mut ctx,
            &mut router,
            MsgEnvelope::Client(ClientMsg::UpdateClient(msg)),
        );
        assert!(matches!(
            res,
            Err(ContextError::Client(ClientError::ClientStateNotFound(_)))
        ));
    }

    #[test]
    fn empty_signer_is_rejected() {
        let mut ctx = MockContext::default();
        let mut router = MockRouter::new();
        create_client_at_height_one(&mut ctx, &mut router);

        let header = MockHeader::new(Height::new(2).expect("non-zero"), b"some root");
        let msg = MsgUpdateClient {
            client_id: client_id(),
            header: header.into(),
            signer: Signer::from(""),
        };
        let res = dispatch(
            &mut ctx,
            &mut router,
            MsgEnvelope::Client(ClientMsg::UpdateClient(msg)),
        );
        assert!(res.is_err());
    }
}
