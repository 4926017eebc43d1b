use crate::core::commitment::CommitmentProof;
use crate::core::host::identifier::ConnectionId;
use crate::{Height, Signer};

/// Final handshake step: run on the responding chain with a proof that the
/// counterparty connection reached `OPEN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenConfirm {
    pub connection_id: ConnectionId,
    pub proof_ack: CommitmentProof,
    pub proof_height: Height,
    pub signer: Signer,
}
