//! Protocol logic for processing `MsgChannelCloseInit` messages.

use crate::core::channel::channel::{ChannelEnd, State};
use crate::core::channel::events::CloseInit;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgChannelCloseInit;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::ChannelEndPath;
use crate::core::routing::module::Module;
use crate::prelude::*;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    module: &dyn Module,
    msg: &MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    chan_end_on_a.verify_not_closed()?;

    module
        .on_chan_close_init_validate(&msg.port_id_on_a, &msg.chan_id_on_a)
        .map_err(ContextError::Channel)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let extras = module
        .on_chan_close_init_execute(&msg.port_id_on_a, &msg.chan_id_on_a)
        .map_err(ContextError::Channel)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let counterparty_port_id = chan_end_on_a.counterparty().port_id().clone();
    let counterparty_chan_id = chan_end_on_a.counterparty().channel_id().cloned();
    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

    let new_chan_end_on_a = ChannelEnd::new(
        State::Closed,
        *chan_end_on_a.ordering(),
        chan_end_on_a.counterparty().clone(),
        chan_end_on_a.connection_hops().to_vec(),
        chan_end_on_a.version().clone(),
    )?;

    ctx_a.store_channel(chan_end_path_on_a, new_chan_end_on_a)?;

    ctx_a.log_message("success: chan_close_init verification passed".to_string())?;
    tracing::debug!(port_id = %msg.port_id_on_a, channel_id = %msg.chan_id_on_a, "channel close init");

    ctx_a.emit_event(CoreEvent::CloseInitChannel(CloseInit::new(
        msg.port_id_on_a,
        msg.chan_id_on_a,
        counterparty_port_id,
        counterparty_chan_id,
        conn_id_on_a,
    )))?;
    emit_module_extras(ctx_a, extras)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::channel::channel::{Counterparty, Order};
    use crate::core::channel::error::ChannelError;
    use crate::core::channel::msgs::ChannelMsg;
    use crate::core::channel::version::Version;
    use crate::core::entrypoint::dispatch;
    use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
    use crate::core::routing::module::ModuleId;
    use crate::core::routing::MsgEnvelope;
    use crate::mock::context::MockContext;
    use crate::mock::dummy_module::DummyModule;
    use crate::mock::router::MockRouter;
    use crate::Signer;

    fn port_id() -> PortId {
        PortId::from_str("testportid").expect("valid identifier")
    }

    fn chan_id() -> ChannelId {
        ChannelId::from_str("channelatob").expect("valid identifier")
    }

    fn open_channel_end() -> ChannelEnd {
        ChannelEnd::new(
            State::Open,
            Order::Unordered,
            Counterparty::new(
                PortId::from_str("testcpportid").expect("valid identifier"),
                Some(ChannelId::from_str("channelbtoa").expect("valid identifier")),
            ),
            vec![ConnectionId::from_str("connectionatob").expect("valid identifier")],
            Version::from("dummyversion"),
        )
        .expect("one hop")
    }

    fn setup() -> (MockContext, MockRouter) {
        let ctx = MockContext::default().with_channel(&port_id(), &chan_id(), open_channel_end());
        let mut router = MockRouter::new();
        let module_id = ModuleId::new("dummymodule");
        router.add_route(module_id.clone(), DummyModule::default());
        router.bind_port(port_id(), module_id).expect("fresh binding");
        (ctx, router)
    }

    #[test]
    fn close_init_is_immediate_and_terminal() {
        let (mut ctx, mut router) = setup();

        let msg = MsgChannelCloseInit {
            port_id_on_a: port_id(),
            chan_id_on_a: chan_id(),
            signer: Signer::from("testsigner"),
        };
        dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::CloseInit(msg.clone())))
            .expect("channel closed");

        let chan_end = ctx
            .channel_end(&ChannelEndPath::new(&port_id(), &chan_id()))
            .expect("channel exists");
        assert!(chan_end.state_matches(&State::Closed));

        // Closing twice fails: CLOSED is terminal.
        let res = dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::CloseInit(msg)));
        assert!(matches!(
            res,
            Err(ContextError::Channel(ChannelError::InvalidState { .. }))
        ));
    }
}
