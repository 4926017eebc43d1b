//! The commitment proof verifier: commitment roots, store prefixes, and
//! Merkle membership / non-membership proofs. Everything here is a pure
//! function of its inputs; no subsystem state is read or written.

pub mod commitment;
pub mod error;
pub mod merkle;

pub use commitment::{apply_prefix, CommitmentPrefix, CommitmentRoot};
pub use error::CommitmentError;
pub use merkle::{
    verify_membership, verify_non_membership, CommitmentProof, ExistenceProof, MerkleTree,
    NonExistenceProof,
};
