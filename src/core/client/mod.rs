//! The light-client subsystem: per-counterparty trust anchors, header
//! verification, and the proof-verification entry points used by the
//! connection and channel layers.

pub mod client_state;
pub mod client_type;
pub mod error;
pub mod events;
pub mod handler;
pub mod height;
pub mod msgs;
pub mod status;
