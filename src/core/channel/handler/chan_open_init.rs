//! Protocol logic for processing `MsgChannelOpenInit` messages.

use crate::core::channel::channel::{ChannelEnd, Counterparty, State};
use crate::core::channel::error::ChannelError;
use crate::core::channel::events::OpenInit;
use crate::core::channel::handler::emit_module_extras;
use crate::core::channel::msgs::MsgChannelOpenInit;
use crate::core::context::{ContextError, ExecutionContext, ValidationContext};
use crate::core::events::CoreEvent;
use crate::core::host::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use crate::core::routing::module::Module;
use crate::prelude::*;

pub fn validate<Ctx>(
    ctx_a: &Ctx,
    module: &dyn Module,
    msg: &MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    if ctx_a.channel_end(&chan_end_path_on_a).is_ok() {
        return Err(ChannelError::ChannelAlreadyExists {
            port_id: msg.port_id_on_a.clone(),
            channel_id: msg.chan_id_on_a.clone(),
        }
        .into());
    }

    if msg.connection_hops_on_a.len() != 1 {
        return Err(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            actual: msg.connection_hops_on_a.len() as u64,
        }
        .into());
    }

    // Channels may only be opened on top of an open connection.
    let conn_id_on_a = &msg.connection_hops_on_a[0];
    let conn_end_on_a = ctx_a.connection_end(conn_id_on_a)?;
    if !conn_end_on_a.state().is_open() {
        return Err(ChannelError::ConnectionNotOpen {
            connection_id: conn_id_on_a.clone(),
        }
        .into());
    }

    let counterparty = Counterparty::new(msg.port_id_on_b.clone(), None);
    module
        .on_chan_open_init_validate(
            msg.ordering,
            &msg.connection_hops_on_a,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &counterparty,
            &msg.version_proposal,
        )
        .map_err(ContextError::Channel)?;

    Ok(())
}

pub fn execute<Ctx>(
    ctx_a: &mut Ctx,
    module: &mut dyn Module,
    msg: MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let counterparty = Counterparty::new(msg.port_id_on_b.clone(), None);
    let (extras, version) = module
        .on_chan_open_init_execute(
            msg.ordering,
            &msg.connection_hops_on_a,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &counterparty,
            &msg.version_proposal,
        )
        .map_err(ContextError::Channel)?;

    let conn_id_on_a = msg.connection_hops_on_a[0].clone();
    let chan_end_on_a = ChannelEnd::new(
        State::Init,
        msg.ordering,
        counterparty,
        msg.connection_hops_on_a,
        version,
    )?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    ctx_a.store_channel(chan_end_path_on_a, chan_end_on_a)?;

    // Fresh channels start all three counters at one.
    ctx_a.store_next_sequence_send(
        SeqSendPath::new(&msg.port_id_on_a, &msg.chan_id_on_a),
        1.into(),
    )?;
    ctx_a.store_next_sequence_recv(
        SeqRecvPath::new(&msg.port_id_on_a, &msg.chan_id_on_a),
        1.into(),
    )?;
    ctx_a.store_next_sequence_ack(
        SeqAckPath::new(&msg.port_id_on_a, &msg.chan_id_on_a),
        1.into(),
    )?;

    ctx_a.log_message("success: chan_open_init verification passed".to_string())?;
    tracing::debug!(port_id = %msg.port_id_on_a, channel_id = %msg.chan_id_on_a, "channel open init");

    ctx_a.emit_event(CoreEvent::OpenInitChannel(OpenInit::new(
        msg.port_id_on_a,
        msg.chan_id_on_a,
        msg.port_id_on_b,
        None,
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
    use crate::core::channel::channel::Order;
    use crate::core::channel::msgs::ChannelMsg;
    use crate::core::channel::version::Version;
    use crate::core::commitment::CommitmentPrefix;
    use crate::core::connection::connection::{
        ConnectionEnd, Counterparty as ConnectionCounterparty, State as ConnectionState,
    };
    use crate::core::connection::version::get_compatible_versions;
    use crate::core::entrypoint::dispatch;
    use crate::core::host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::core::port::error::PortError;
    use crate::core::routing::module::ModuleId;
    use crate::core::routing::MsgEnvelope;
    use crate::mock::dummy_module::DummyModule;
    use crate::mock::context::MockContext;
    use crate::mock::router::MockRouter;
    use crate::Signer;

    fn port_id() -> PortId {
        PortId::from_str("testportid").expect("valid identifier")
    }

    fn conn_id() -> ConnectionId {
        ConnectionId::from_str("connectionatob").expect("valid identifier")
    }

    fn connection_end(state: ConnectionState) -> ConnectionEnd {
        ConnectionEnd::new(
            state,
            ClientId::from_str("mockclientaa").expect("valid identifier"),
            ConnectionCounterparty::new(
                ClientId::from_str("mockclientbb").expect("valid identifier"),
                Some(ConnectionId::from_str("connectionbtoa").expect("valid identifier")),
                CommitmentPrefix::try_from(b"peerprefix".to_vec()).expect("non-empty"),
            ),
            get_compatible_versions(),
        )
        .expect("non-empty versions")
    }

    fn msg() -> MsgChannelOpenInit {
        MsgChannelOpenInit {
            port_id_on_a: port_id(),
            chan_id_on_a: ChannelId::from_str("channelatob").expect("valid identifier"),
            connection_hops_on_a: vec![conn_id()],
            port_id_on_b: PortId::from_str("testcpportid").expect("valid identifier"),
            ordering: Order::Unordered,
            version_proposal: Version::empty(),
            signer: Signer::from("testsigner"),
        }
    }

    fn router_with_dummy() -> MockRouter {
        let mut router = MockRouter::new();
        let module_id = ModuleId::new("dummymodule");
        router.add_route(module_id.clone(), DummyModule::default());
        router.bind_port(port_id(), module_id).expect("fresh binding");
        router
    }

    #[test]
    fn open_init_creates_the_channel_and_counters() {
        let mut ctx = MockContext::default().with_connection(
            &conn_id(),
            connection_end(ConnectionState::Open),
        );
        let mut router = router_with_dummy();

        dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::OpenInit(msg())))
            .expect("channel created");

        let chan_end = ctx
            .channel_end(&ChannelEndPath::new(&msg().port_id_on_a, &msg().chan_id_on_a))
            .expect("channel stored");
        assert!(chan_end.state_matches(&State::Init));

        let seq = ctx
            .get_next_sequence_send(&SeqSendPath::new(&msg().port_id_on_a, &msg().chan_id_on_a))
            .expect("counter seeded");
        assert_eq!(u64::from(seq), 1);
    }

    #[test]
    fn open_init_requires_an_open_connection() {
        let mut ctx = MockContext::default().with_connection(
            &conn_id(),
            connection_end(ConnectionState::Init),
        );
        let mut router = router_with_dummy();

        let res = dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::OpenInit(msg())));
        assert!(matches!(
            res,
            Err(ContextError::Channel(ChannelError::ConnectionNotOpen { .. }))
        ));
    }

    #[test]
    fn open_init_requires_a_bound_port() {
        let mut ctx = MockContext::default().with_connection(
            &conn_id(),
            connection_end(ConnectionState::Open),
        );
        let mut router = MockRouter::new();

        let res = dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::OpenInit(msg())));
        assert!(matches!(
            res,
            Err(ContextError::Port(PortError::UnknownPort { .. }))
        ));
    }

    #[test]
    fn open_init_rejects_a_duplicate_channel() {
        let mut ctx = MockContext::default().with_connection(
            &conn_id(),
            connection_end(ConnectionState::Open),
        );
        let mut router = router_with_dummy();

        dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::OpenInit(msg())))
            .expect("channel created");
        let res = dispatch(&mut ctx, &mut router, MsgEnvelope::Channel(ChannelMsg::OpenInit(msg())));
        assert!(matches!(
            res,
            Err(ContextError::Channel(
                ChannelError::ChannelAlreadyExists { .. }
            ))
        ));
    }
}
