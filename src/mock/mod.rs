//! Development-time fixtures: an in-memory provable store, a trivial light
//! client, a host context, a router, and a bank. Everything here exists to
//! exercise the handlers; none of it ships in a production host.

pub mod bank;
pub mod client_state;
pub mod context;
pub mod dummy_module;
pub mod link;
pub mod router;
pub mod store;

pub use bank::MockBank;
pub use client_state::{MockClientState, MockConsensusState, MockHeader, MockMisbehaviour};
pub use context::MockContext;
pub use dummy_module::DummyModule;
pub use link::MockLink;
pub use router::MockRouter;
pub use store::MockStore;
