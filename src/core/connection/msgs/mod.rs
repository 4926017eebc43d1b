//! Message definitions for the connection handshake.

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

pub use conn_open_ack::MsgConnectionOpenAck;
pub use conn_open_confirm::MsgConnectionOpenConfirm;
pub use conn_open_init::MsgConnectionOpenInit;
pub use conn_open_try::MsgConnectionOpenTry;

/// All connection messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionMsg {
    OpenInit(MsgConnectionOpenInit),
    OpenTry(MsgConnectionOpenTry),
    OpenAck(MsgConnectionOpenAck),
    OpenConfirm(MsgConnectionOpenConfirm),
}
