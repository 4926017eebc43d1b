//! Channel handshake and packet lifecycle events.

use crate::core::channel::acknowledgement::Acknowledgement;
use crate::core::channel::channel::Order;
use crate::core::channel::packet::Packet;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::prelude::*;

fn hex(bytes: &[u8]) -> String {
    String::from_utf8(subtle_encoding::hex::encode(bytes)).unwrap_or_default()
}

macro_rules! channel_handshake_event {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub port_id: PortId,
            pub channel_id: ChannelId,
            pub counterparty_port_id: PortId,
            pub counterparty_channel_id: Option<ChannelId>,
            pub connection_id: ConnectionId,
        }

        impl $name {
            pub fn new(
                port_id: PortId,
                channel_id: ChannelId,
                counterparty_port_id: PortId,
                counterparty_channel_id: Option<ChannelId>,
                connection_id: ConnectionId,
            ) -> Self {
                Self {
                    port_id,
                    channel_id,
                    counterparty_port_id,
                    counterparty_channel_id,
                    connection_id,
                }
            }

            pub fn attributes(&self) -> Vec<(String, String)> {
                vec![
                    ("port_id".to_string(), self.port_id.to_string()),
                    ("channel_id".to_string(), self.channel_id.to_string()),
                    (
                        "counterparty_port_id".to_string(),
                        self.counterparty_port_id.to_string(),
                    ),
                    (
                        "counterparty_channel_id".to_string(),
                        self.counterparty_channel_id
                            .as_ref()
                            .map(|id| id.to_string())
                            .unwrap_or_default(),
                    ),
                    ("connection_id".to_string(), self.connection_id.to_string()),
                ]
            }
        }
    };
}

channel_handshake_event!(
    /// First handshake step ran locally.
    OpenInit
);
channel_handshake_event!(
    /// Counterparty `INIT` was proved; local end moved to `TRYOPEN`.
    OpenTry
);
channel_handshake_event!(
    /// Counterparty `TRYOPEN` was proved; local end moved to `OPEN`.
    OpenAck
);
channel_handshake_event!(
    /// Counterparty `OPEN` was proved; local end moved to `OPEN`.
    OpenConfirm
);
channel_handshake_event!(
    /// The port owner closed the channel locally.
    CloseInit
);
channel_handshake_event!(
    /// Counterparty `CLOSED` was proved; local end moved to `CLOSED`.
    CloseConfirm
);
channel_handshake_event!(
    /// An ordered channel was closed by a packet timeout.
    ChannelClosed
);

fn packet_attributes(packet: &Packet) -> Vec<(String, String)> {
    vec![
        ("packet_sequence".to_string(), packet.seq_on_a.to_string()),
        ("packet_src_port".to_string(), packet.port_id_on_a.to_string()),
        (
            "packet_src_channel".to_string(),
            packet.chan_id_on_a.to_string(),
        ),
        ("packet_dst_port".to_string(), packet.port_id_on_b.to_string()),
        (
            "packet_dst_channel".to_string(),
            packet.chan_id_on_b.to_string(),
        ),
        (
            "packet_timeout_height".to_string(),
            packet.timeout_height_on_b.to_string(),
        ),
        ("packet_data_hex".to_string(), hex(&packet.data)),
    ]
}

macro_rules! packet_event {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub packet: Packet,
            pub ordering: Order,
            pub connection_id: ConnectionId,
        }

        impl $name {
            pub fn new(packet: Packet, ordering: Order, connection_id: ConnectionId) -> Self {
                Self {
                    packet,
                    ordering,
                    connection_id,
                }
            }

            pub fn attributes(&self) -> Vec<(String, String)> {
                let mut attrs = packet_attributes(&self.packet);
                attrs.push(("packet_ordering".to_string(), self.ordering.to_string()));
                attrs.push((
                    "packet_connection".to_string(),
                    self.connection_id.to_string(),
                ));
                attrs
            }
        }
    };
}

packet_event!(
    /// A commitment was written for an outgoing packet.
    SendPacket
);
packet_event!(
    /// An incoming packet was proved and handed to its module.
    ReceivePacket
);
packet_event!(
    /// The counterparty acknowledgement was proved and the local commitment
    /// released.
    AcknowledgePacket
);
packet_event!(
    /// Non-receipt was proved past the timeout; the local commitment was
    /// released.
    TimeoutPacket
);

/// An acknowledgement was written for a received packet, for the relayer to
/// carry back to the sender.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WriteAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    pub connection_id: ConnectionId,
}

impl WriteAcknowledgement {
    pub fn new(
        packet: Packet,
        acknowledgement: Acknowledgement,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            packet,
            acknowledgement,
            connection_id,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs = packet_attributes(&self.packet);
        attrs.push((
            "packet_ack_hex".to_string(),
            hex(self.acknowledgement.as_bytes()),
        ));
        attrs.push((
            "packet_connection".to_string(),
            self.connection_id.to_string(),
        ));
        attrs
    }
}
