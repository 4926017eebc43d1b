//! Protocol logic for processing `MsgConnectionOpenInit` messages.

use crate::core::connection::connection::{ConnectionEnd, State};
use crate::core::connection::error::ConnectionError;
use crate::core::connection::events::OpenInit;
use crate::core::connection::msgs::MsgConnectionOpenInit;
use crate::core::connection::version::get_compatible_versions;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::ConnectionPath;
use crate::prelude::*;

pub fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    // The first mover picks the identifier; it must be fresh.
    if ctx_a.connection_end(&msg.connection_id).is_ok() {
        return Err(ConnectionError::ConnectionAlreadyExists(msg.connection_id.clone()).into());
    }

    // The local client must exist and be usable before anchoring a
    // connection to it.
    let client_state_of_b_on_a = ctx_a.client_state(&msg.client_id)?;
    client_state_of_b_on_a.verify_is_active(&msg.client_id)?;

    // No counterparty connection can exist before its OpenTry ran.
    if msg.counterparty.connection_id().is_some() {
        return Err(ConnectionError::InvalidCounterparty.into());
    }

    Ok(())
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let versions = match &msg.version {
        Some(version) => vec![version.clone()],
        None => get_compatible_versions(),
    };

    let conn_end_on_a = ConnectionEnd::new(
        State::Init,
        msg.client_id.clone(),
        msg.counterparty.clone(),
        versions,
    )?;

    ctx_a.store_connection(ConnectionPath::new(&msg.connection_id), conn_end_on_a)?;

    ctx_a.log_message("success: conn_open_init verification passed".to_string())?;
    tracing::debug!(connection_id = %msg.connection_id, "connection open init");

    ctx_a.emit_event(CoreEvent::OpenInitConnection(OpenInit::new(
        msg.connection_id,
        msg.client_id,
        None,
        msg.counterparty.client_id().clone(),
    )))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::connection::connection::{Counterparty, State};
    use crate::core::connection::msgs::ConnectionMsg;
    use crate::core::commitment::CommitmentPrefix;
    use crate::core::entrypoint::dispatch;
    use crate::core::host::identifier::{ClientId, ConnectionId};
    use crate::core::routing::MsgEnvelope;
    use crate::mock::client_state::{MockClientState, MockConsensusState};
    use crate::mock::context::MockContext;
    use crate::mock::router::MockRouter;
    use crate::Height;
    use crate::Signer;

    fn msg_conn_open_init() -> MsgConnectionOpenInit {
        MsgConnectionOpenInit {
            connection_id: ConnectionId::from_str("connectionatob").expect("valid identifier"),
            client_id: ClientId::from_str("mockclientaa").expect("valid identifier"),
            counterparty: Counterparty::new(
                ClientId::from_str("mockclientbb").expect("valid identifier"),
                None,
                CommitmentPrefix::try_from(b"peerprefix".to_vec()).expect("non-empty"),
            ),
            version: None,
            signer: Signer::from("testsigner"),
        }
    }

    fn ctx_with_client() -> MockContext {
        MockContext::default().with_client_state(
            &ClientId::from_str("mockclientaa").expect("valid identifier"),
            MockClientState::new(Height::min()),
            MockConsensusState::new(b"root"),
        )
    }

    #[test]
    fn conn_open_init_msg_processing() {
        struct Test {
            name: &'static str,
            ctx: MockContext,
            msg: MsgConnectionOpenInit,
            want_pass: bool,
        }

        let default_msg = msg_conn_open_init();

        let msg_with_counterparty_conn_id = MsgConnectionOpenInit {
            counterparty: Counterparty::new(
                ClientId::from_str("mockclientbb").expect("valid identifier"),
                Some(ConnectionId::from_str("connectionbtoa").expect("valid identifier")),
                CommitmentPrefix::try_from(b"peerprefix".to_vec()).expect("non-empty"),
            ),
            ..default_msg.clone()
        };

        let tests = vec![
            Test {
                name: "processing fails because no client exists",
                ctx: MockContext::default(),
                msg: default_msg.clone(),
                want_pass: false,
            },
            Test {
                name: "processing fails because the counterparty connection id is already set",
                ctx: ctx_with_client(),
                msg: msg_with_counterparty_conn_id,
                want_pass: false,
            },
            Test {
                name: "good parameters",
                ctx: ctx_with_client(),
                msg: default_msg,
                want_pass: true,
            },
        ];

        for test in tests {
            let mut ctx = test.ctx;
            let mut router = MockRouter::new();
            let res = dispatch(
                &mut ctx,
                &mut router,
                MsgEnvelope::Connection(ConnectionMsg::OpenInit(test.msg.clone())),
            );
            assert_eq!(res.is_ok(), test.want_pass, "case `{}`: {res:?}", test.name);

            if test.want_pass {
                let end = ctx
                    .connection_end(&test.msg.connection_id)
                    .expect("connection stored");
                assert!(end.state_matches(&State::Init));

                // A second submission of the same identifier must fail.
                let res = dispatch(
                    &mut ctx,
                    &mut router,
                    MsgEnvelope::Connection(ConnectionMsg::OpenInit(test.msg)),
                );
                assert!(matches!(
                    res,
                    Err(ContextError::Connection(
                        ConnectionError::ConnectionAlreadyExists(_)
                    ))
                ));
            }
        }
    }
}
