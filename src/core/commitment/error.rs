//! Defines the commitment error type

use crate::prelude::*;
use displaydoc::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty commitment root
    EmptyCommitmentRoot,
    /// proof key does not match the queried key
    MismatchedKey,
    /// proof value does not match the expected value
    MismatchedValue,
    /// recomputed root does not match the trusted root
    MismatchedRoot,
    /// malformed proof: `{description}`
    MalformedProof { description: String },
    /// neighbor leaves are not adjacent
    NonAdjacentNeighbors,
    /// queried key does not fall in the proven gap
    KeyOutsideNeighborGap,
    /// expected an existence proof
    ExpectedExistenceProof,
    /// expected a non-existence proof
    ExpectedNonExistenceProof,
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
