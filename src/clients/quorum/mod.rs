//! A light client for chains finalized by a Byzantine quorum of a known
//! validator set.
//!
//! The client trusts an initial consensus state `{root,
//! next_validators_hash}` and advances by verifying headers: the submitted
//! validator set must hash to the trusted `next_validators_hash`, and more
//! than the trust threshold of it must have committed to the header. Each
//! verified header yields the next consensus state, hash-linking the
//! validator sets across heights.

pub mod client_state;
pub mod consensus_state;
pub mod header;
pub mod misbehaviour;

pub use client_state::{QuorumClientState, TrustThreshold, QUORUM_CLIENT_TYPE};
pub use consensus_state::QuorumConsensusState;
pub use header::{commit_digest, hash_validator_set, CommitSignature, QuorumHeader, ValidatorKey};
pub use misbehaviour::QuorumMisbehaviour;
