//! Connection handshake handlers, one module per message, each split into a
//! side-effect-free `validate` and a state-writing `execute`.

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;
