//! The core protocol: host requirements, commitment verification, the
//! client/connection/channel/packet state machines, routing, and the
//! message entrypoint.

pub mod channel;
pub mod client;
pub mod commitment;
pub mod connection;
pub mod context;
pub mod entrypoint;
pub mod events;
pub mod host;
pub mod port;
pub mod routing;

pub use context::{ContextError, ExecutionContext, ValidationContext};
pub use entrypoint::{dispatch, execute, validate};
