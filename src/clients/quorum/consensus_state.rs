use crate::core::client::error::ClientError;
use crate::core::commitment::CommitmentRoot;
use crate::prelude::*;

/// The immutable record produced by verifying one header: the commitment
/// root proofs are checked against, and the hash of the validator set
/// entitled to commit the next header.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuorumConsensusState {
    pub root: CommitmentRoot,
    pub next_validators_hash: [u8; 32],
}

impl QuorumConsensusState {
    pub fn new(root: CommitmentRoot, next_validators_hash: [u8; 32]) -> Self {
        Self {
            root,
            next_validators_hash,
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.root.as_bytes().is_empty() {
            return Err(ClientError::InvalidConsensusState {
                description: "commitment root cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
