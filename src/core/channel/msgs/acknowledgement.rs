use crate::core::channel::acknowledgement::Acknowledgement;
use crate::core::channel::packet::Packet;
use crate::core::commitment::CommitmentProof;
use crate::{Height, Signer};

/// Returns the receiver's acknowledgement to the sending chain, with a
/// proof that the receiver committed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    pub proof_acked_on_b: CommitmentProof,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}
