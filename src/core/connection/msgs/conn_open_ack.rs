use crate::core::commitment::CommitmentProof;
use crate::core::connection::version::Version;
use crate::core::host::identifier::ConnectionId;
use crate::{Height, Signer};

/// Third handshake step: run on the initiating chain with a proof that the
/// counterparty committed a matching connection in `TRYOPEN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    pub connection_id: ConnectionId,
    pub counterparty_connection_id: ConnectionId,
    /// The version the counterparty picked.
    pub version: Version,
    pub proof_try: CommitmentProof,
    pub proof_height: Height,
    pub signer: Signer,
}
