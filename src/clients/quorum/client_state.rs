use core::str::FromStr;

use crate::clients::quorum::consensus_state::QuorumConsensusState;
use crate::clients::quorum::header::{commit_digest, QuorumHeader, ValidatorKey};
use crate::clients::quorum::misbehaviour::QuorumMisbehaviour;
use crate::core::client::client_type::ClientType;
use crate::core::client::error::ClientError;
use crate::prelude::*;
use crate::Height;

pub const QUORUM_CLIENT_TYPE: &str = "quorum";

/// The fraction of the validator set that must have committed to a header
/// before it is trusted. Strictly more than `numerator/denominator` is
/// required, so the default corresponds to the usual Byzantine two-thirds
/// bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrustThreshold {
    numerator: u64,
    denominator: u64,
}

impl TrustThreshold {
    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, ClientError> {
        if denominator == 0 || numerator >= denominator {
            return Err(ClientError::Other {
                description: format!("invalid trust threshold: {numerator}/{denominator}"),
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn is_met(&self, signed: u64, total: u64) -> bool {
        signed * self.denominator > total * self.numerator
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::TWO_THIRDS
    }
}

/// Client state for the quorum light client: the trust anchor metadata for
/// one remote chain.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuorumClientState {
    pub latest_height: Height,
    pub frozen_height: Option<Height>,
    pub trust_threshold: TrustThreshold,
}

impl QuorumClientState {
    pub fn new(latest_height: Height, trust_threshold: TrustThreshold) -> Self {
        Self {
            latest_height,
            frozen_height: None,
            trust_threshold,
        }
    }

    pub fn client_type(&self) -> ClientType {
        ClientType::from_str(QUORUM_CLIENT_TYPE).expect("valid client type")
    }

    pub fn initialise(&self, consensus_state: &QuorumConsensusState) -> Result<(), ClientError> {
        if self.frozen_height.is_some() {
            return Err(ClientError::InvalidConsensusState {
                description: "cannot create a frozen client".to_string(),
            });
        }
        consensus_state.validate()
    }

    /// Runs the full update check: monotonic height plus a valid commit.
    pub fn verify_header(
        &self,
        trusted: &QuorumConsensusState,
        header: &QuorumHeader,
    ) -> Result<(), ClientError> {
        if header.height <= self.latest_height {
            // Ties favor the existing record: a second header at an
            // already-populated height is rejected, never overwritten.
            return Err(ClientError::LowHeaderHeight {
                header_height: header.height,
                latest_height: self.latest_height,
            });
        }

        self.verify_commit(trusted, header)
    }

    /// Checks a header's commit against the trusted consensus state,
    /// without any height-monotonicity requirement. Misbehaviour evidence
    /// reuses this for headers at already-trusted heights.
    fn verify_commit(
        &self,
        trusted: &QuorumConsensusState,
        header: &QuorumHeader,
    ) -> Result<(), ClientError> {
        if header.root.as_bytes().is_empty() {
            return Err(ClientError::FailedHeaderVerification {
                description: "header carries an empty commitment root".to_string(),
            });
        }

        if header.validators_hash() != trusted.next_validators_hash {
            return Err(ClientError::FailedHeaderVerification {
                description: "validator set does not hash to the trusted next validators hash"
                    .to_string(),
            });
        }

        let signed = count_valid_signatures(header);
        let total = header.validators.len() as u64;
        if !self.trust_threshold.is_met(signed, total) {
            return Err(ClientError::FailedHeaderVerification {
                description: format!("insufficient quorum: {signed} of {total} validators signed"),
            });
        }

        Ok(())
    }

    /// Produces the advanced client state and the new consensus state for a
    /// header that passed [`Self::verify_header`].
    pub fn update_state(
        &self,
        header: &QuorumHeader,
    ) -> Result<(QuorumClientState, QuorumConsensusState), ClientError> {
        if header.height <= self.latest_height {
            return Err(ClientError::LowHeaderHeight {
                header_height: header.height,
                latest_height: self.latest_height,
            });
        }

        let client_state = QuorumClientState {
            latest_height: header.height,
            frozen_height: self.frozen_height,
            trust_threshold: self.trust_threshold,
        };
        let consensus_state =
            QuorumConsensusState::new(header.root.clone(), header.next_validators_hash);

        Ok((client_state, consensus_state))
    }

    /// Two correctly committed headers for the same height with different
    /// roots prove the validator set equivocated; the client freezes at
    /// that height.
    pub fn check_misbehaviour_and_freeze(
        &self,
        trusted: &QuorumConsensusState,
        misbehaviour: &QuorumMisbehaviour,
    ) -> Result<QuorumClientState, ClientError> {
        let QuorumMisbehaviour { header_a, header_b } = misbehaviour;

        if header_a.height != header_b.height {
            return Err(ClientError::FailedMisbehaviourHandling {
                description: "headers are for different heights".to_string(),
            });
        }

        self.verify_commit(trusted, header_a)?;
        self.verify_commit(trusted, header_b)?;

        if header_a.root == header_b.root {
            return Err(ClientError::FailedMisbehaviourHandling {
                description: "headers commit to the same root".to_string(),
            });
        }

        Ok(QuorumClientState {
            latest_height: self.latest_height,
            frozen_height: Some(header_a.height),
            trust_threshold: self.trust_threshold,
        })
    }
}

/// Counts distinct listed validators whose signature carries the correct
/// commit digest for this header.
fn count_valid_signatures(header: &QuorumHeader) -> u64 {
    let mut seen: Vec<&ValidatorKey> = Vec::with_capacity(header.signatures.len());
    let mut signed = 0u64;

    for commit_sig in &header.signatures {
        if !header.validators.contains(&commit_sig.validator) {
            continue;
        }
        if seen.contains(&&commit_sig.validator) {
            continue;
        }
        if commit_sig.signature != commit_digest(&commit_sig.validator, header.height, &header.root)
        {
            continue;
        }
        seen.push(&commit_sig.validator);
        signed += 1;
    }

    signed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::quorum::header::hash_validator_set;
    use crate::core::commitment::CommitmentRoot;
    use crate::clients::quorum::header::CommitSignature;

    fn validators(n: u8) -> Vec<ValidatorKey> {
        (0..n).map(|i| [i; 32]).collect()
    }

    fn signed_header(height: u64, root: &[u8], signers: &[ValidatorKey]) -> QuorumHeader {
        let height = Height::new(height).expect("non-zero");
        let root = CommitmentRoot::from_bytes(root);
        let vals = validators(4);
        let signatures = signers
            .iter()
            .map(|v| CommitSignature {
                validator: *v,
                signature: commit_digest(v, height, &root),
            })
            .collect();
        QuorumHeader {
            height,
            root,
            next_validators_hash: hash_validator_set(&vals),
            validators: vals,
            signatures,
        }
    }

    fn trusted_state() -> QuorumConsensusState {
        QuorumConsensusState::new(
            CommitmentRoot::from_bytes(b"trusted root"),
            hash_validator_set(&validators(4)),
        )
    }

    fn client_at(height: u64) -> QuorumClientState {
        QuorumClientState::new(Height::new(height).expect("non-zero"), TrustThreshold::default())
    }

    #[test]
    fn header_with_full_quorum_verifies() {
        let header = signed_header(2, b"new root", &validators(4));
        client_at(1)
            .verify_header(&trusted_state(), &header)
            .expect("quorum met");
    }

    #[test]
    fn three_of_four_meets_two_thirds() {
        let header = signed_header(2, b"new root", &validators(3));
        client_at(1)
            .verify_header(&trusted_state(), &header)
            .expect("3/4 > 2/3");
    }

    #[test]
    fn two_of_four_is_insufficient() {
        let header = signed_header(2, b"new root", &validators(2));
        let err = client_at(1)
            .verify_header(&trusted_state(), &header)
            .unwrap_err();
        assert!(matches!(err, ClientError::FailedHeaderVerification { .. }));
    }

    #[test]
    fn duplicate_signatures_do_not_inflate_the_count() {
        let mut header = signed_header(2, b"new root", &validators(2));
        let dup = header.signatures[0].clone();
        header.signatures.push(dup.clone());
        header.signatures.push(dup);
        let err = client_at(1)
            .verify_header(&trusted_state(), &header)
            .unwrap_err();
        assert!(matches!(err, ClientError::FailedHeaderVerification { .. }));
    }

    #[test]
    fn unknown_signers_are_ignored() {
        let mut header = signed_header(2, b"new root", &validators(2));
        let outsider: ValidatorKey = [9u8; 32];
        header.signatures.push(CommitSignature {
            validator: outsider,
            signature: commit_digest(&outsider, header.height, &header.root),
        });
        assert!(client_at(1).verify_header(&trusted_state(), &header).is_err());
    }

    #[test]
    fn stale_header_is_rejected() {
        let header = signed_header(2, b"new root", &validators(4));
        let err = client_at(2)
            .verify_header(&trusted_state(), &header)
            .unwrap_err();
        assert!(matches!(err, ClientError::LowHeaderHeight { .. }));
    }

    #[test]
    fn wrong_validator_set_is_rejected() {
        let mut header = signed_header(2, b"new root", &validators(4));
        header.validators.pop();
        let err = client_at(1)
            .verify_header(&trusted_state(), &header)
            .unwrap_err();
        assert!(matches!(err, ClientError::FailedHeaderVerification { .. }));
    }

    #[test]
    fn conflicting_headers_freeze_the_client() {
        let misbehaviour = QuorumMisbehaviour {
            header_a: signed_header(2, b"one root", &validators(4)),
            header_b: signed_header(2, b"another root", &validators(4)),
        };
        let frozen = client_at(1)
            .check_misbehaviour_and_freeze(&trusted_state(), &misbehaviour)
            .expect("valid evidence");
        assert_eq!(frozen.frozen_height, Some(Height::new(2).expect("non-zero")));
    }

    #[test]
    fn identical_headers_are_not_misbehaviour() {
        let misbehaviour = QuorumMisbehaviour {
            header_a: signed_header(2, b"same root", &validators(4)),
            header_b: signed_header(2, b"same root", &validators(4)),
        };
        assert!(client_at(1)
            .check_misbehaviour_and_freeze(&trusted_state(), &misbehaviour)
            .is_err());
    }
}
