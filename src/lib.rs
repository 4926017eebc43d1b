#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]
#![forbid(unsafe_code)]
//! This library implements the core lifecycle protocol that lets two
//! independently operated ledgers establish mutual trust and exchange
//! authenticated, ordered application data without a trusted intermediary.
//!
//! The crate is organized in three layers:
//!
//! + [Core](core) implements the transport, authentication, and ordering
//!   machinery: light-client state tracking, the connection and channel
//!   handshakes, and the packet commitment/acknowledgement/timeout
//!   lifecycle, all driven by externally supplied Merkle proofs.
//!
//! + [Clients](clients) contains client verification algorithms (following
//!   the tagged-union client interface defined in `core`) for specific
//!   consensus schemes. A chain uses these to authenticate the state of a
//!   remote chain.
//!
//! + [Applications](applications) contains protocol applications built on
//!   top of the packet lifecycle; the escrow-and-mint token transfer app
//!   ships as the concrete example.
//!
//! When processing a message `M`, if any handler in this library returns an
//! error, the host is expected to roll back all state modifications made to
//! the context (e.g. [`ExecutionContext`](core::ExecutionContext)) while
//! processing `M`: one message is one atomic state transition, and partial
//! application must never be observable.

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

/// Represents a block height on a chain.
pub use crate::core::client::height::Height;
pub use signer::Signer;

pub mod applications;
pub mod clients;
pub mod core;

#[cfg(any(test, feature = "mocks"))]
pub mod mock;

mod prelude;
mod signer;
mod utils;
