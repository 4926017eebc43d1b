use crate::core::channel::packet::{Packet, Sequence};
use crate::core::commitment::CommitmentProof;
use crate::{Height, Signer};

/// Resolves a packet that was never received before its timeout height
/// passed on the destination chain.
///
/// For unordered channels `proof_unreceived_on_b` is a non-membership proof
/// of the packet receipt; for ordered channels it is a membership proof
/// that `nextSequenceRecv` on the counterparty is still at
/// `next_seq_recv_on_b`, which must not exceed the packet's sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProof,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}
