//! Routing: binds application modules to ports and carries the message
//! envelope consumed by the entrypoint.

pub mod module;
pub mod msgs;
pub mod router;

pub use module::{Module, ModuleEvent, ModuleExtras, ModuleId};
pub use msgs::MsgEnvelope;
pub use router::Router;
