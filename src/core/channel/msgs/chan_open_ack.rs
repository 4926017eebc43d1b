use crate::core::channel::version::Version;
use crate::core::commitment::CommitmentProof;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::{Height, Signer};

/// Third handshake step: run on the initiating chain with a proof that the
/// counterparty committed a matching channel in `TRYOPEN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenAck {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub chan_id_on_b: ChannelId,
    /// The version the counterparty module settled on.
    pub version_on_b: Version,
    pub proof_chan_end_on_b: CommitmentProof,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}
