//! The escrow-and-mint token transfer application.
//!
//! Coins leaving their source chain are escrowed there and minted as
//! port/channel-prefixed vouchers on the destination; vouchers travelling
//! home are burned and the original escrow released. A failed
//! acknowledgement or a timeout refunds the sender, reversing whichever
//! debit the send performed.

pub mod acknowledgement;
pub mod amount;
pub mod coin;
pub mod context;
pub mod denom;
pub mod error;
pub mod events;
pub mod handler;
pub mod module;
pub mod msgs;
pub mod packet;

pub use acknowledgement::AckStatus;
pub use amount::Amount;
pub use coin::Coin;
pub use denom::{BaseDenom, PrefixedDenom, TracePrefix};
pub use error::TokenTransferError;
pub use module::TransferModule;

/// The port this application binds by default.
pub const PORT_ID_STR: &str = "tokentransfer";

/// The module id this application registers under.
pub const MODULE_ID_STR: &str = "tokentransfer";

/// The channel version this application speaks.
pub const VERSION: &str = "ft-transfer-1";
