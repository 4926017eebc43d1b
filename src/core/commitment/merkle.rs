//! Merkle accumulator over a chain's key-value store, plus the proof
//! verification primitives.
//!
//! Leaves are the store entries sorted by key. The leaf layer is padded to a
//! power of two with a fixed padding hash, and the final root binds the
//! number of real leaves, so a proof cannot lie about the tree shape:
//!
//! ```text
//! leaf  = H(0x00 || len(key) || key || H(value))
//! inner = H(0x01 || left || right)
//! pad   = H(0x02)
//! root  = H(0x03 || top || len(leaves))
//! ```
//!
//! Membership is an audit path from a leaf to the root. Non-membership is
//! proven by exhibiting the two adjacent leaves that straddle the queried
//! key (or a single edge leaf, or the empty tree).

use sha2::{Digest, Sha256};

use crate::core::commitment::commitment::{apply_prefix, CommitmentPrefix, CommitmentRoot};
use crate::core::commitment::error::CommitmentError;
use crate::prelude::*;

type Hash = [u8; 32];

const LEAF_DOMAIN: u8 = 0x00;
const INNER_DOMAIN: u8 = 0x01;
const PAD_DOMAIN: u8 = 0x02;
const ROOT_DOMAIN: u8 = 0x03;

fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

fn leaf_hash(key: &[u8], value_hash: &Hash) -> Hash {
    let mut input = Vec::with_capacity(1 + 8 + key.len() + 32);
    input.push(LEAF_DOMAIN);
    input.extend_from_slice(&(key.len() as u64).to_be_bytes());
    input.extend_from_slice(key);
    input.extend_from_slice(value_hash);
    sha256(&input)
}

fn inner_hash(left: &Hash, right: &Hash) -> Hash {
    let mut input = [0u8; 65];
    input[0] = INNER_DOMAIN;
    input[1..33].copy_from_slice(left);
    input[33..].copy_from_slice(right);
    sha256(&input)
}

fn pad_hash() -> Hash {
    sha256(&[PAD_DOMAIN])
}

fn finalize_root(top: &Hash, total: u64) -> Vec<u8> {
    let mut input = [0u8; 41];
    input[0] = ROOT_DOMAIN;
    input[1..33].copy_from_slice(top);
    input[33..].copy_from_slice(&total.to_be_bytes());
    sha256(&input).to_vec()
}

/// The commitment root of a store with no entries.
pub fn empty_root() -> CommitmentRoot {
    finalize_root(&pad_hash(), 0).into()
}

/// Proof that `key` is bound to a value hashing to `value_hash` in the tree
/// committed to by a [`CommitmentRoot`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExistenceProof {
    pub key: Vec<u8>,
    pub value_hash: Hash,
    /// Position of the leaf in the sorted leaf layer.
    pub index: u64,
    /// Number of real (unpadded) leaves in the tree.
    pub total: u64,
    /// Sibling hashes from the leaf layer up to the top of the tree.
    pub audit_path: Vec<Hash>,
}

/// Proof that `key` is absent from the tree: its would-be position is
/// straddled by two adjacent leaves (either of which may be missing when the
/// key sorts before the first or after the last entry).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NonExistenceProof {
    pub key: Vec<u8>,
    pub left: Option<ExistenceProof>,
    pub right: Option<ExistenceProof>,
}

/// An opaque-to-the-caller proof blob, interpretable only by this verifier.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CommitmentProof {
    Existence(ExistenceProof),
    NonExistence(NonExistenceProof),
}

impl ExistenceProof {
    /// Recomputes the root from the leaf and audit path and checks it
    /// against the trusted one.
    fn verify_against(&self, root: &CommitmentRoot) -> Result<(), CommitmentError> {
        if self.index >= self.total {
            return Err(CommitmentError::MalformedProof {
                description: "leaf index out of range".to_string(),
            });
        }

        let padded = self.total.next_power_of_two();
        let expected_depth = padded.trailing_zeros() as usize;
        if self.audit_path.len() != expected_depth {
            return Err(CommitmentError::MalformedProof {
                description: format!(
                    "audit path has {} nodes, expected {expected_depth}",
                    self.audit_path.len()
                ),
            });
        }

        let mut node = leaf_hash(&self.key, &self.value_hash);
        let mut index = self.index;
        for sibling in &self.audit_path {
            node = if index & 1 == 1 {
                inner_hash(sibling, &node)
            } else {
                inner_hash(&node, sibling)
            };
            index >>= 1;
        }

        if finalize_root(&node, self.total) != root.as_bytes() {
            return Err(CommitmentError::MismatchedRoot);
        }

        Ok(())
    }
}

/// Verifies that `value` is stored under `path` (namespaced by `prefix`) in
/// the store committed to by `root`.
pub fn verify_membership(
    root: &CommitmentRoot,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProof,
    path: &[u8],
    value: &[u8],
) -> Result<(), CommitmentError> {
    if root.as_bytes().is_empty() {
        return Err(CommitmentError::EmptyCommitmentRoot);
    }

    let CommitmentProof::Existence(proof) = proof else {
        return Err(CommitmentError::ExpectedExistenceProof);
    };

    if proof.key != apply_prefix(prefix, path) {
        return Err(CommitmentError::MismatchedKey);
    }
    if proof.value_hash != sha256(value) {
        return Err(CommitmentError::MismatchedValue);
    }

    proof.verify_against(root)
}

/// Verifies that nothing is stored under `path` (namespaced by `prefix`) in
/// the store committed to by `root`.
pub fn verify_non_membership(
    root: &CommitmentRoot,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProof,
    path: &[u8],
) -> Result<(), CommitmentError> {
    if root.as_bytes().is_empty() {
        return Err(CommitmentError::EmptyCommitmentRoot);
    }

    let CommitmentProof::NonExistence(proof) = proof else {
        return Err(CommitmentError::ExpectedNonExistenceProof);
    };

    let key = apply_prefix(prefix, path);
    if proof.key != key {
        return Err(CommitmentError::MismatchedKey);
    }

    match (&proof.left, &proof.right) {
        (None, None) => {
            // Only the empty store has no neighbors anywhere.
            if root != &empty_root() {
                return Err(CommitmentError::MismatchedRoot);
            }
        }
        (Some(left), None) => {
            left.verify_against(root)?;
            if left.key.as_slice() >= key.as_slice() {
                return Err(CommitmentError::KeyOutsideNeighborGap);
            }
            if left.index + 1 != left.total {
                return Err(CommitmentError::NonAdjacentNeighbors);
            }
        }
        (None, Some(right)) => {
            right.verify_against(root)?;
            if right.key.as_slice() <= key.as_slice() {
                return Err(CommitmentError::KeyOutsideNeighborGap);
            }
            if right.index != 0 {
                return Err(CommitmentError::NonAdjacentNeighbors);
            }
        }
        (Some(left), Some(right)) => {
            left.verify_against(root)?;
            right.verify_against(root)?;
            if left.key.as_slice() >= key.as_slice() || right.key.as_slice() <= key.as_slice() {
                return Err(CommitmentError::KeyOutsideNeighborGap);
            }
            if left.total != right.total || left.index + 1 != right.index {
                return Err(CommitmentError::NonAdjacentNeighbors);
            }
        }
    }

    Ok(())
}

/// A Merkle tree over a snapshot of store entries; produces the root and
/// both kinds of proofs. Hosts with a native commitment store supply their
/// own prover; this one backs the mock store and the verifier tests.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// Sorted by key.
    leaves: Vec<(Vec<u8>, Hash)>,
}

impl MerkleTree {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
    {
        let mut leaves: Vec<(Vec<u8>, Hash)> = entries
            .into_iter()
            .map(|(k, v)| (k.to_vec(), sha256(v)))
            .collect();
        leaves.sort_by(|a, b| a.0.cmp(&b.0));
        Self { leaves }
    }

    pub fn root(&self) -> CommitmentRoot {
        let total = self.leaves.len() as u64;
        if total == 0 {
            return empty_root();
        }
        let levels = self.levels();
        let top = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_else(pad_hash);
        finalize_root(&top, total).into()
    }

    /// Returns `None` when the key is not in the tree.
    pub fn existence_proof(&self, key: &[u8]) -> Option<ExistenceProof> {
        let index = self
            .leaves
            .binary_search_by(|(k, _)| k.as_slice().cmp(key))
            .ok()?;
        Some(self.proof_at(index))
    }

    /// Returns `None` when the key is present in the tree.
    pub fn non_existence_proof(&self, key: &[u8]) -> Option<NonExistenceProof> {
        match self.leaves.binary_search_by(|(k, _)| k.as_slice().cmp(key)) {
            Ok(_) => None,
            Err(insertion) => {
                let left = insertion.checked_sub(1).map(|i| self.proof_at(i));
                let right = (insertion < self.leaves.len()).then(|| self.proof_at(insertion));
                Some(NonExistenceProof {
                    key: key.to_vec(),
                    left,
                    right,
                })
            }
        }
    }

    fn proof_at(&self, index: usize) -> ExistenceProof {
        let levels = self.levels();
        let mut audit_path = Vec::new();
        let mut position = index;
        // The last level is the single top node and contributes no sibling.
        for level in &levels[..levels.len().saturating_sub(1)] {
            let sibling = position ^ 1;
            audit_path.push(level[sibling]);
            position >>= 1;
        }

        let (key, value_hash) = self.leaves[index].clone();
        ExistenceProof {
            key,
            value_hash,
            index: index as u64,
            total: self.leaves.len() as u64,
            audit_path,
        }
    }

    /// All tree levels, bottom-up; the leaf layer is padded to a power of
    /// two. For an empty tree this returns a single padding node.
    fn levels(&self) -> Vec<Vec<Hash>> {
        let mut level: Vec<Hash> = self
            .leaves
            .iter()
            .map(|(k, vh)| leaf_hash(k, vh))
            .collect();
        let padded = level.len().next_power_of_two().max(1);
        level.resize(padded, pad_hash());

        let mut levels = vec![level];
        while levels[levels.len() - 1].len() > 1 {
            let previous = &levels[levels.len() - 1];
            let next = previous
                .chunks(2)
                .map(|pair| inner_hash(&pair[0], &pair[1]))
                .collect();
            levels.push(next);
        }
        levels
    }
}
