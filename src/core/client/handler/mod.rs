//! Client handlers, one module per message, each split into a
//! side-effect-free `validate` and a state-writing `execute`.

pub mod create_client;
pub mod misbehaviour;
pub mod update_client;
