//! Protocol logic for processing `MsgSubmitMisbehaviour` messages.

use crate::core::client::events::ClientMisbehaviour;
use crate::core::client::msgs::MsgSubmitMisbehaviour;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ClientConsensusStatePath, ClientStatePath};
use crate::prelude::*;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgSubmitMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    let client_state = ctx.client_state(&msg.client_id)?;
    client_state.verify_is_active(&msg.client_id)?;

    let trusted = ctx.consensus_state(&ClientConsensusStatePath::new(
        &msg.client_id,
        client_state.latest_height(),
    ))?;

    // Only checks the evidence; the freeze happens in execute.
    client_state.check_misbehaviour_and_freeze(&trusted, &msg.misbehaviour)?;

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgSubmitMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_state = ctx.client_state(&msg.client_id)?;

    let trusted = ctx.consensus_state(&ClientConsensusStatePath::new(
        &msg.client_id,
        client_state.latest_height(),
    ))?;
    let frozen_client_state =
        client_state.check_misbehaviour_and_freeze(&trusted, &msg.misbehaviour)?;

    let client_type = frozen_client_state.client_type();
    ctx.store_client_state(ClientStatePath::new(&msg.client_id), frozen_client_state)?;

    ctx.log_message("misbehaviour detected: client frozen".to_string())?;
    tracing::warn!(client_id = %msg.client_id, "misbehaviour detected, client frozen");

    ctx.emit_event(CoreEvent::ClientMisbehaviour(ClientMisbehaviour::new(
        msg.client_id,
        client_type,
    )))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::client::error::ClientError;
    use crate::core::client::msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient};
    use crate::core::client::status::Status;
    use crate::core::entrypoint::dispatch;
    use crate::core::events::CoreEvent;
    use crate::core::host::identifier::ClientId;
    use crate::core::routing::MsgEnvelope;
    use crate::mock::client_state::{
        MockClientState, MockConsensusState, MockHeader, MockMisbehaviour,
    };
    use crate::mock::context::MockContext;
    use crate::mock::router::MockRouter;
    use crate::Height;
    use crate::Signer;

    fn signer() -> Signer {
        Signer::from("testsigner")
    }

    fn client_id() -> ClientId {
        ClientId::from_str("mockclientaa").expect("valid identifier")
    }

    fn setup() -> (MockContext, MockRouter) {
        let mut ctx = MockContext::default();
        let mut router = MockRouter::new();
        let msg = MsgCreateClient::new(
            client_id(),
            MockClientState::new(Height::min()).into(),
            MockConsensusState::new(b"initial root").into(),
            signer(),
        );
        dispatch(&mut ctx, &mut router, MsgEnvelope::Client(ClientMsg::CreateClient(msg)))
            .expect("client created");
        (ctx, router)
    }

    fn conflicting_evidence() -> MockMisbehaviour {
        let height = Height::new(2).expect("non-zero");
        MockMisbehaviour {
            header_a: MockHeader::new(height, b"one root"),
            header_b: MockHeader::new(height, b"another root"),
        }
    }

    #[test]
    fn valid_evidence_freezes_the_client() {
        let (mut ctx, mut router) = setup();

        let msg = MsgSubmitMisbehaviour {
            client_id: client_id(),
            misbehaviour: crate::core::client::client_state::AnyMisbehaviour::Mock(
                conflicting_evidence(),
            ),
            signer: signer(),
        };
        dispatch(&mut ctx, &mut router, MsgEnvelope::Client(ClientMsg::Misbehaviour(msg)))
            .expect("evidence accepted");

        let client_state = ctx.client_state(&client_id()).expect("client exists");
        assert_eq!(client_state.status(), Status::Frozen);
        assert!(matches!(
            ctx.events.last(),
            Some(CoreEvent::ClientMisbehaviour(_))
        ));

        // A frozen client accepts no further updates; only this trust
        // relationship degrades, nothing else breaks.
        let update = MsgUpdateClient {
            client_id: client_id(),
            header: MockHeader::new(Height::new(3).expect("non-zero"), b"later root").into(),
            signer: signer(),
        };
        let res = dispatch(
            &mut ctx,
            &mut router,
            MsgEnvelope::Client(ClientMsg::UpdateClient(update)),
        );
        assert!(matches!(
            res,
            Err(ContextError::Client(ClientError::ClientFrozen(_)))
        ));
    }

    #[test]
    fn identical_headers_are_not_evidence() {
        let (mut ctx, mut router) = setup();

        let height = Height::new(2).expect("non-zero");
        let msg = MsgSubmitMisbehaviour {
            client_id: client_id(),
            misbehaviour: crate::core::client::client_state::AnyMisbehaviour::Mock(
                MockMisbehaviour {
                    header_a: MockHeader::new(height, b"same root"),
                    header_b: MockHeader::new(height, b"same root"),
                },
            ),
            signer: signer(),
        };
        let res = dispatch(
            &mut ctx,
            &mut router,
            MsgEnvelope::Client(ClientMsg::Misbehaviour(msg)),
        );
        assert!(matches!(
            res,
            Err(ContextError::Client(
                ClientError::FailedMisbehaviourHandling { .. }
            ))
        ));

        let client_state = ctx.client_state(&client_id()).expect("client exists");
        assert_eq!(client_state.status(), Status::Active);
    }
}
