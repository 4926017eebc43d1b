use crate::core::commitment::CommitmentProof;
use crate::prelude::*;
use crate::core::connection::connection::Counterparty;
use crate::core::connection::version::Version;
use crate::core::host::identifier::{ClientId, ConnectionId};
use crate::{Height, Signer};

/// Second handshake step: run on the responding chain with a proof that the
/// initiating chain committed a matching connection in `INIT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    /// The (caller-chosen) identifier of the new local connection.
    pub connection_id: ConnectionId,
    /// The local client tracking the counterparty chain.
    pub client_id: ClientId,
    /// The counterparty, with its connection id filled in.
    pub counterparty: Counterparty,
    /// The version set the counterparty offered in `INIT`.
    pub counterparty_versions: Vec<Version>,
    pub proof_init: CommitmentProof,
    pub proof_height: Height,
    pub signer: Signer,
}
