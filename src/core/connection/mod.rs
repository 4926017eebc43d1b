//! The connection subsystem: a mutually verified pairing between two
//! clients, established through a four-step handshake in which every step
//! after the first is existence-proved against the counterparty's client.

#[allow(clippy::module_inception)]
pub mod connection;
pub mod error;
pub mod events;
pub mod handler;
pub mod msgs;
pub mod version;
