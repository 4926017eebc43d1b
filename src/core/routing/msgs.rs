//! The top-level message envelope.

use crate::core::channel::msgs::{ChannelMsg, PacketMsg};
use crate::core::client::msgs::ClientMsg;
use crate::core::connection::msgs::ConnectionMsg;

/// Every externally submitted protocol message. One envelope corresponds to
/// one atomic state transition.
#[derive(Clone, Debug)]
pub enum MsgEnvelope {
    Client(ClientMsg),
    Connection(ConnectionMsg),
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

impl From<ClientMsg> for MsgEnvelope {
    fn from(msg: ClientMsg) -> Self {
        Self::Client(msg)
    }
}

impl From<ConnectionMsg> for MsgEnvelope {
    fn from(msg: ConnectionMsg) -> Self {
        Self::Connection(msg)
    }
}

impl From<ChannelMsg> for MsgEnvelope {
    fn from(msg: ChannelMsg) -> Self {
        Self::Channel(msg)
    }
}

impl From<PacketMsg> for MsgEnvelope {
    fn from(msg: PacketMsg) -> Self {
        Self::Packet(msg)
    }
}
