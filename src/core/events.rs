//! The aggregate event type.
//!
//! Every successful state transition emits one structured notification so an
//! external relayer can discover pending handshake and packet steps. The
//! host receives events through `ExecutionContext::emit_event` and renders
//! them with [`CoreEvent::event_type`] and [`CoreEvent::attributes`]; the
//! transport format is the host's concern.

use crate::core::channel::events as channel_events;
use crate::core::client::events as client_events;
use crate::core::connection::events as connection_events;
use crate::core::routing::module::ModuleEvent;
use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreEvent {
    CreateClient(client_events::CreateClient),
    UpdateClient(client_events::UpdateClient),
    ClientMisbehaviour(client_events::ClientMisbehaviour),

    OpenInitConnection(connection_events::OpenInit),
    OpenTryConnection(connection_events::OpenTry),
    OpenAckConnection(connection_events::OpenAck),
    OpenConfirmConnection(connection_events::OpenConfirm),

    OpenInitChannel(channel_events::OpenInit),
    OpenTryChannel(channel_events::OpenTry),
    OpenAckChannel(channel_events::OpenAck),
    OpenConfirmChannel(channel_events::OpenConfirm),
    CloseInitChannel(channel_events::CloseInit),
    CloseConfirmChannel(channel_events::CloseConfirm),
    ChannelClosed(channel_events::ChannelClosed),

    SendPacket(channel_events::SendPacket),
    ReceivePacket(channel_events::ReceivePacket),
    WriteAcknowledgement(channel_events::WriteAcknowledgement),
    AcknowledgePacket(channel_events::AcknowledgePacket),
    TimeoutPacket(channel_events::TimeoutPacket),

    Module(ModuleEvent),
}

impl CoreEvent {
    pub fn event_type(&self) -> &str {
        match self {
            Self::CreateClient(_) => "create_client",
            Self::UpdateClient(_) => "update_client",
            Self::ClientMisbehaviour(_) => "client_misbehaviour",
            Self::OpenInitConnection(_) => "connection_open_init",
            Self::OpenTryConnection(_) => "connection_open_try",
            Self::OpenAckConnection(_) => "connection_open_ack",
            Self::OpenConfirmConnection(_) => "connection_open_confirm",
            Self::OpenInitChannel(_) => "channel_open_init",
            Self::OpenTryChannel(_) => "channel_open_try",
            Self::OpenAckChannel(_) => "channel_open_ack",
            Self::OpenConfirmChannel(_) => "channel_open_confirm",
            Self::CloseInitChannel(_) => "channel_close_init",
            Self::CloseConfirmChannel(_) => "channel_close_confirm",
            Self::ChannelClosed(_) => "channel_closed",
            Self::SendPacket(_) => "send_packet",
            Self::ReceivePacket(_) => "recv_packet",
            Self::WriteAcknowledgement(_) => "write_acknowledgement",
            Self::AcknowledgePacket(_) => "acknowledge_packet",
            Self::TimeoutPacket(_) => "timeout_packet",
            Self::Module(e) => e.kind.as_str(),
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        match self {
            Self::CreateClient(e) => e.attributes(),
            Self::UpdateClient(e) => e.attributes(),
            Self::ClientMisbehaviour(e) => e.attributes(),
            Self::OpenInitConnection(e) => e.attributes(),
            Self::OpenTryConnection(e) => e.attributes(),
            Self::OpenAckConnection(e) => e.attributes(),
            Self::OpenConfirmConnection(e) => e.attributes(),
            Self::OpenInitChannel(e) => e.attributes(),
            Self::OpenTryChannel(e) => e.attributes(),
            Self::OpenAckChannel(e) => e.attributes(),
            Self::OpenConfirmChannel(e) => e.attributes(),
            Self::CloseInitChannel(e) => e.attributes(),
            Self::CloseConfirmChannel(e) => e.attributes(),
            Self::ChannelClosed(e) => e.attributes(),
            Self::SendPacket(e) => e.attributes(),
            Self::ReceivePacket(e) => e.attributes(),
            Self::WriteAcknowledgement(e) => e.attributes(),
            Self::AcknowledgePacket(e) => e.attributes(),
            Self::TimeoutPacket(e) => e.attributes(),
            Self::Module(e) => e.attributes.clone(),
        }
    }
}
