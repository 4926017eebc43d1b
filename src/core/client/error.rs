//! Defines the client error type

use displaydoc::Display;

use crate::core::commitment::error::CommitmentError;
use crate::core::host::error::IdentifierError;
use crate::core::host::identifier::ClientId;
use crate::prelude::*;
use crate::Height;

/// Encodes all the possible client errors
#[derive(Debug, Display)]
pub enum ClientError {
    /// client state not found: `{0}`
    ClientStateNotFound(ClientId),
    /// client state already exists: `{0}`
    ClientStateAlreadyExists(ClientId),
    /// consensus state not found for client `{client_id}` at height `{height}`
    MissingConsensusState { client_id: ClientId, height: Height },
    /// client `{0}` is frozen
    ClientFrozen(ClientId),
    /// invalid height; cannot be zero
    InvalidHeight,
    /// invalid height result
    InvalidHeightResult,
    /// invalid consensus state: `{description}`
    InvalidConsensusState { description: String },
    /// mismatched client message type: `{description}`
    MismatchedClientMessageType { description: String },
    /// header height `{header_height}` is not greater than latest client height `{latest_height}`
    LowHeaderHeight {
        header_height: Height,
        latest_height: Height,
    },
    /// invalid proof height; `{proof_height}` exceeds latest client height `{latest_height}`
    InvalidProofHeight {
        proof_height: Height,
        latest_height: Height,
    },
    /// failed header verification: `{description}`
    FailedHeaderVerification { description: String },
    /// failed misbehaviour handling: `{description}`
    FailedMisbehaviourHandling { description: String },
    /// failed proof verification: `{0}`
    FailedProofVerification(CommitmentError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// other error: `{description}`
    Other { description: String },
}

impl From<CommitmentError> for ClientError {
    fn from(e: CommitmentError) -> Self {
        Self::FailedProofVerification(e)
    }
}

impl From<IdentifierError> for ClientError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::FailedProofVerification(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            _ => None,
        }
    }
}
