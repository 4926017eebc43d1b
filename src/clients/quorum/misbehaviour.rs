use crate::clients::quorum::header::QuorumHeader;

/// Evidence that the trusted validator set committed two different roots at
/// the same height.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuorumMisbehaviour {
    pub header_a: QuorumHeader,
    pub header_b: QuorumHeader,
}
