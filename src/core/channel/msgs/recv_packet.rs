use crate::core::channel::packet::Packet;
use crate::core::commitment::CommitmentProof;
use crate::{Height, Signer};

/// Delivers a packet to the destination chain, with a proof that the
/// sending chain committed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    pub packet: Packet,
    pub proof_commitment_on_a: CommitmentProof,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}
