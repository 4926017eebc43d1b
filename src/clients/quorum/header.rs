use sha2::{Digest, Sha256};

use crate::core::commitment::CommitmentRoot;
use crate::prelude::*;
use crate::Height;

/// A validator's public identity. The concrete key scheme belongs to the
/// host's consensus engine; the light client only needs equality and
/// hashing over it.
pub type ValidatorKey = [u8; 32];

const VALIDATOR_SET_DOMAIN: u8 = 0x56;
const COMMIT_DOMAIN: &[u8] = b"commit";

/// One validator's commitment to a header.
///
/// The signature is the deterministic commit digest for (validator, height,
/// root). Hosts with a real signature scheme verify signatures before
/// handing headers to this client and fill this field with the same digest;
/// the client checks set membership, distinctness and the digest itself.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommitSignature {
    pub validator: ValidatorKey,
    pub signature: [u8; 32],
}

/// The externally submitted update material: the claimed new state root at
/// a height, the validator set entitled to commit it, and their signatures.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuorumHeader {
    pub height: Height,
    pub root: CommitmentRoot,
    pub validators: Vec<ValidatorKey>,
    pub next_validators_hash: [u8; 32],
    pub signatures: Vec<CommitSignature>,
}

impl QuorumHeader {
    pub fn validators_hash(&self) -> [u8; 32] {
        hash_validator_set(&self.validators)
    }
}

/// Hashes a validator set, binding its size and order.
pub fn hash_validator_set(validators: &[ValidatorKey]) -> [u8; 32] {
    let mut input = Vec::with_capacity(1 + 8 + validators.len() * 32);
    input.push(VALIDATOR_SET_DOMAIN);
    input.extend_from_slice(&(validators.len() as u64).to_be_bytes());
    for validator in validators {
        input.extend_from_slice(validator);
    }
    Sha256::digest(&input).into()
}

/// The digest a validator commits to for a given header.
pub fn commit_digest(validator: &ValidatorKey, height: Height, root: &CommitmentRoot) -> [u8; 32] {
    let mut input = Vec::with_capacity(COMMIT_DOMAIN.len() + 32 + 8 + root.as_bytes().len());
    input.extend_from_slice(COMMIT_DOMAIN);
    input.extend_from_slice(validator);
    input.extend_from_slice(&height.value().to_be_bytes());
    input.extend_from_slice(root.as_bytes());
    Sha256::digest(&input).into()
}
