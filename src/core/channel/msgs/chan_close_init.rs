use crate::core::host::identifier::{ChannelId, PortId};
use crate::Signer;

/// Closes a channel locally, immediately and without proof. Only reachable
/// through the port owner, which the entrypoint enforces via the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelCloseInit {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub signer: Signer,
}
