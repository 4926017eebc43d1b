use crate::core::commitment::CommitmentProof;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::{Height, Signer};

/// Closes the local channel end after proving the counterparty end is
/// already `CLOSED`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelCloseConfirm {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub proof_chan_end_on_a: CommitmentProof,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}
