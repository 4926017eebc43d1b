use crate::core::channel::channel::Order;
use crate::prelude::*;
use crate::core::channel::version::Version;
use crate::core::commitment::CommitmentProof;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::{Height, Signer};

/// Second handshake step: run on the responding chain with a proof that the
/// initiating chain committed a matching channel in `INIT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id_on_b: PortId,
    /// The (caller-chosen) identifier of the new local channel.
    pub chan_id_on_b: ChannelId,
    pub connection_hops_on_b: Vec<ConnectionId>,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub ordering: Order,
    /// The version the counterparty module proposed in `INIT`.
    pub version_on_a: Version,
    pub proof_chan_end_on_a: CommitmentProof,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}
