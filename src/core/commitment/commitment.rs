//! Commitment roots and store prefixes.

use core::fmt;

use crate::core::commitment::error::CommitmentError;
use crate::prelude::*;

/// The root of a chain's commitment store at some height. Obtained from a
/// verified header and used as the trust anchor for proof verification.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CommitmentRoot(Vec<u8>);

impl CommitmentRoot {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for CommitmentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentRoot({})", hex(&self.0))
    }
}

impl From<Vec<u8>> for CommitmentRoot {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// The store namespace a chain keeps its protocol state under. Counterparty
/// chains prepend this prefix to every path they verify.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct CommitmentPrefix(Vec<u8>);

impl CommitmentPrefix {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl TryFrom<Vec<u8>> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(CommitmentError::EmptyCommitmentPrefix)
        } else {
            Ok(Self(bytes))
        }
    }
}

impl fmt::Debug for CommitmentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentPrefix({})", hex(&self.0))
    }
}

/// Produces the full store key for `path` under `prefix`.
pub fn apply_prefix(prefix: &CommitmentPrefix, path: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.as_bytes().len() + 1 + path.len());
    key.extend_from_slice(prefix.as_bytes());
    key.push(b'/');
    key.extend_from_slice(path);
    key
}

fn hex(bytes: &[u8]) -> String {
    String::from_utf8(subtle_encoding::hex::encode(bytes)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_is_rejected() {
        assert_eq!(
            CommitmentPrefix::try_from(Vec::new()),
            Err(CommitmentError::EmptyCommitmentPrefix)
        );
    }

    #[test]
    fn prefix_is_applied_with_separator() {
        let prefix = CommitmentPrefix::try_from(b"link".to_vec()).expect("non-empty");
        assert_eq!(apply_prefix(&prefix, b"connections/c"), b"link/connections/c");
    }
}
