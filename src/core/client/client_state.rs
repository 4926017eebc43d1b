//! The tagged unions over every supported client type.
//!
//! Client behavior is polymorphic over the verification capability set
//! (verify a header, check for misbehaviour, verify proofs against a stored
//! root). Following the host model, dispatch is a `match` on the client type
//! tag — no inheritance, no trait objects in stored state.

use crate::clients::quorum::{
    QuorumClientState, QuorumConsensusState, QuorumHeader, QuorumMisbehaviour,
};
use crate::core::client::client_type::ClientType;
use crate::core::client::error::ClientError;
use crate::core::client::status::Status;
use crate::core::commitment::{
    verify_membership, verify_non_membership, CommitmentPrefix, CommitmentProof, CommitmentRoot,
};
use crate::core::host::identifier::ClientId;
use crate::core::host::path::Path;
#[cfg(any(test, feature = "mocks"))]
use crate::mock::client_state::{MockClientState, MockConsensusState, MockHeader};
use crate::prelude::*;
use crate::Height;

/// Per-client-type client state: the trust anchor metadata for one remote
/// chain (type tag, latest trusted height, freeze marker, verification
/// parameters).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnyClientState {
    Quorum(QuorumClientState),
    #[cfg(any(test, feature = "mocks"))]
    Mock(MockClientState),
}

/// Per-client-type consensus state: the immutable record produced by
/// verifying one header (commitment root plus consensus-specific metadata).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnyConsensusState {
    Quorum(QuorumConsensusState),
    #[cfg(any(test, feature = "mocks"))]
    Mock(MockConsensusState),
}

/// Per-client-type header: the externally submitted update material.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnyHeader {
    Quorum(QuorumHeader),
    #[cfg(any(test, feature = "mocks"))]
    Mock(MockHeader),
}

/// Per-client-type misbehaviour evidence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnyMisbehaviour {
    Quorum(QuorumMisbehaviour),
    #[cfg(any(test, feature = "mocks"))]
    Mock(crate::mock::client_state::MockMisbehaviour),
}

impl AnyClientState {
    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Quorum(cs) => cs.client_type(),
            #[cfg(any(test, feature = "mocks"))]
            Self::Mock(cs) => cs.client_type(),
        }
    }

    pub fn latest_height(&self) -> Height {
        match self {
            Self::Quorum(cs) => cs.latest_height,
            #[cfg(any(test, feature = "mocks"))]
            Self::Mock(cs) => cs.latest_height,
        }
    }

    pub fn status(&self) -> Status {
        let frozen = match self {
            Self::Quorum(cs) => cs.frozen_height.is_some(),
            #[cfg(any(test, feature = "mocks"))]
            Self::Mock(cs) => cs.frozen_height.is_some(),
        };
        if frozen {
            Status::Frozen
        } else {
            Status::Active
        }
    }

    /// Fails when the client can no longer be updated or used for proof
    /// verification.
    pub fn verify_is_active(&self, client_id: &ClientId) -> Result<(), ClientError> {
        match self.status() {
            Status::Active => Ok(()),
            Status::Frozen => Err(ClientError::ClientFrozen(client_id.clone())),
        }
    }

    /// Proofs can only be checked against a height this client has actually
    /// verified.
    pub fn validate_proof_height(&self, proof_height: Height) -> Result<(), ClientError> {
        let latest_height = self.latest_height();
        if proof_height > latest_height {
            return Err(ClientError::InvalidProofHeight {
                proof_height,
                latest_height,
            });
        }
        Ok(())
    }

    /// Sanity checks performed once, at client creation.
    pub fn initialise(&self, consensus_state: &AnyConsensusState) -> Result<(), ClientError> {
        match (self, consensus_state) {
            (Self::Quorum(cs), AnyConsensusState::Quorum(cons)) => cs.initialise(cons),
            #[cfg(any(test, feature = "mocks"))]
            (Self::Mock(cs), AnyConsensusState::Mock(cons)) => cs.initialise(cons),
            #[allow(unreachable_patterns)]
            _ => Err(ClientError::InvalidConsensusState {
                description: format!(
                    "consensus state does not match client type {}",
                    self.client_type()
                ),
            }),
        }
    }

    /// Runs the client-type-specific header verification algorithm against
    /// the latest trusted consensus state. Read-only.
    pub fn verify_header(
        &self,
        trusted: &AnyConsensusState,
        header: &AnyHeader,
    ) -> Result<(), ClientError> {
        match (self, trusted, header) {
            (Self::Quorum(cs), AnyConsensusState::Quorum(cons), AnyHeader::Quorum(h)) => {
                cs.verify_header(cons, h)
            }
            #[cfg(any(test, feature = "mocks"))]
            (Self::Mock(cs), AnyConsensusState::Mock(cons), AnyHeader::Mock(h)) => {
                cs.verify_header(cons, h)
            }
            #[allow(unreachable_patterns)]
            _ => Err(mismatched_message_type(&self.client_type())),
        }
    }

    /// Produces the advanced client state and the new consensus state for a
    /// header that passed [`Self::verify_header`].
    pub fn update_state(
        &self,
        header: &AnyHeader,
    ) -> Result<(AnyClientState, AnyConsensusState), ClientError> {
        match (self, header) {
            (Self::Quorum(cs), AnyHeader::Quorum(h)) => {
                let (client, consensus) = cs.update_state(h)?;
                Ok((Self::Quorum(client), AnyConsensusState::Quorum(consensus)))
            }
            #[cfg(any(test, feature = "mocks"))]
            (Self::Mock(cs), AnyHeader::Mock(h)) => {
                let (client, consensus) = cs.update_state(h)?;
                Ok((Self::Mock(client), AnyConsensusState::Mock(consensus)))
            }
            #[allow(unreachable_patterns)]
            _ => Err(mismatched_message_type(&self.client_type())),
        }
    }

    /// Checks misbehaviour evidence and returns the frozen client state.
    pub fn check_misbehaviour_and_freeze(
        &self,
        trusted: &AnyConsensusState,
        misbehaviour: &AnyMisbehaviour,
    ) -> Result<AnyClientState, ClientError> {
        match (self, trusted, misbehaviour) {
            (Self::Quorum(cs), AnyConsensusState::Quorum(cons), AnyMisbehaviour::Quorum(m)) => {
                Ok(Self::Quorum(cs.check_misbehaviour_and_freeze(cons, m)?))
            }
            #[cfg(any(test, feature = "mocks"))]
            (Self::Mock(cs), AnyConsensusState::Mock(cons), AnyMisbehaviour::Mock(m)) => {
                Ok(Self::Mock(cs.check_misbehaviour_and_freeze(cons, m)?))
            }
            #[allow(unreachable_patterns)]
            _ => Err(mismatched_message_type(&self.client_type())),
        }
    }

    /// Proves that `value` is stored under `path` on the remote chain, using
    /// the root this client verified at the proof height. Pure read.
    pub fn verify_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        root: &CommitmentRoot,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        verify_membership(root, prefix, proof, &path.into_bytes(), &value)
            .map_err(ClientError::FailedProofVerification)
    }

    /// Proves that nothing is stored under `path` on the remote chain.
    pub fn verify_non_membership(
        &self,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        root: &CommitmentRoot,
        path: Path,
    ) -> Result<(), ClientError> {
        verify_non_membership(root, prefix, proof, &path.into_bytes())
            .map_err(ClientError::FailedProofVerification)
    }
}

impl AnyConsensusState {
    /// The commitment root this consensus state vouches for.
    pub fn root(&self) -> &CommitmentRoot {
        match self {
            Self::Quorum(cs) => &cs.root,
            #[cfg(any(test, feature = "mocks"))]
            Self::Mock(cs) => &cs.root,
        }
    }
}

impl AnyHeader {
    pub fn height(&self) -> Height {
        match self {
            Self::Quorum(h) => h.height,
            #[cfg(any(test, feature = "mocks"))]
            Self::Mock(h) => h.height,
        }
    }
}

fn mismatched_message_type(client_type: &ClientType) -> ClientError {
    ClientError::MismatchedClientMessageType {
        description: format!("message does not match client type {client_type}"),
    }
}
