use crate::core::channel::channel::Order;
use crate::prelude::*;
use crate::core::channel::version::Version;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::Signer;

/// Starts the channel handshake on the port owner's behalf. No proof; the
/// counterparty channel id is unknown until its `OpenTry` runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id_on_a: PortId,
    /// The (caller-chosen) identifier of the new local channel.
    pub chan_id_on_a: ChannelId,
    pub connection_hops_on_a: Vec<ConnectionId>,
    pub port_id_on_b: PortId,
    pub ordering: Order,
    /// The version the module proposes; the counterparty's module answers
    /// with its own during `OpenTry`.
    pub version_proposal: Version,
    pub signer: Signer,
}
