//! Channel handshake and packet lifecycle handlers, one module per message,
//! each split into a side-effect-free `validate` and a state-writing
//! `execute`.

pub mod acknowledgement;
pub mod chan_close_confirm;
pub mod chan_close_init;
pub mod chan_open_ack;
pub mod chan_open_confirm;
pub mod chan_open_init;
pub mod chan_open_try;
pub mod recv_packet;
pub mod send_packet;
pub mod timeout;

pub use send_packet::{send_packet, send_packet_execute, send_packet_validate};

use crate::core::context::{ContextError, ExecutionContext};
use crate::core::events::CoreEvent;
use crate::core::routing::module::ModuleExtras;

/// Forwards events and logs produced by a module callback to the host.
pub(crate) fn emit_module_extras<Ctx>(
    ctx: &mut Ctx,
    extras: ModuleExtras,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    for event in extras.events {
        ctx.emit_event(CoreEvent::Module(event))?;
    }
    for log in extras.log {
        ctx.log_message(log)?;
    }
    Ok(())
}
