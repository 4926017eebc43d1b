//! The in-memory realization of the storage collaborator: a keyed
//! byte-string store with a commitment root and proof generation.

use alloc::collections::BTreeMap;

use crate::core::commitment::{CommitmentPrefix, CommitmentProof, CommitmentRoot, MerkleTree};
use crate::prelude::*;

/// All protocol state of one mock chain, keyed by prefixed path strings.
#[derive(Clone, Debug)]
pub struct MockStore {
    prefix: CommitmentPrefix,
    entries: BTreeMap<String, Vec<u8>>,
}

impl MockStore {
    pub fn new(prefix: CommitmentPrefix) -> Self {
        Self {
            prefix,
            entries: BTreeMap::new(),
        }
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }

    fn key(&self, path: &str) -> String {
        let prefix = core::str::from_utf8(self.prefix.as_bytes()).unwrap_or_default();
        format!("{prefix}/{path}")
    }

    pub fn get(&self, path: &str) -> Option<&Vec<u8>> {
        self.entries.get(&self.key(path))
    }

    pub fn set(&mut self, path: &str, value: Vec<u8>) {
        self.entries.insert(self.key(path), value);
    }

    pub fn delete(&mut self, path: &str) {
        self.entries.remove(&self.key(path));
    }

    fn tree(&self) -> MerkleTree {
        MerkleTree::from_entries(
            self.entries
                .iter()
                .map(|(k, v)| (k.as_bytes(), v.as_slice())),
        )
    }

    /// The commitment root over the current contents.
    pub fn root(&self) -> CommitmentRoot {
        self.tree().root()
    }

    /// A membership or non-membership proof for `path`, depending on
    /// whether it is populated.
    pub fn prove(&self, path: &str) -> CommitmentProof {
        let key = self.key(path);
        let tree = self.tree();
        match tree.existence_proof(key.as_bytes()) {
            Some(proof) => CommitmentProof::Existence(proof),
            None => CommitmentProof::NonExistence(
                tree.non_existence_proof(key.as_bytes())
                    .unwrap_or_else(|| unreachable("key is neither present nor absent")),
            ),
        }
    }
}

fn unreachable(msg: &str) -> ! {
    panic!("mock store invariant broken: {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commitment::{verify_membership, verify_non_membership};

    fn store() -> MockStore {
        let prefix = CommitmentPrefix::try_from(b"link".to_vec()).expect("non-empty");
        let mut store = MockStore::new(prefix);
        store.set("connections/connectionone", b"end".to_vec());
        store.set("channels/testportid/testchannel", b"chan".to_vec());
        store
    }

    #[test]
    fn proofs_track_store_contents() {
        let store = store();
        let root = store.root();

        let present = store.prove("connections/connectionone");
        verify_membership(
            &root,
            store.prefix(),
            &present,
            b"connections/connectionone",
            b"end",
        )
        .expect("membership verifies");

        let absent = store.prove("connections/connectiontwo");
        verify_non_membership(
            &root,
            store.prefix(),
            &absent,
            b"connections/connectiontwo",
        )
        .expect("non-membership verifies");
    }

    #[test]
    fn deletion_moves_a_key_from_present_to_absent() {
        let mut store = store();
        store.delete("connections/connectionone");
        let root = store.root();

        let proof = store.prove("connections/connectionone");
        assert!(matches!(proof, CommitmentProof::NonExistence(_)));
        verify_non_membership(
            &root,
            store.prefix(),
            &proof,
            b"connections/connectionone",
        )
        .expect("non-membership verifies");
    }
}
