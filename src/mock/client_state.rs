//! A trivial client type for handler-local tests: headers are accepted
//! purely on height monotonicity, with no commit verification.

use core::str::FromStr;

use crate::core::client::client_state::{AnyClientState, AnyConsensusState, AnyHeader};
use crate::core::client::client_type::ClientType;
use crate::core::client::error::ClientError;
use crate::core::commitment::CommitmentRoot;
use crate::prelude::*;
use crate::Height;

pub const MOCK_CLIENT_TYPE: &str = "mock";

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MockClientState {
    pub latest_height: Height,
    pub frozen_height: Option<Height>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MockConsensusState {
    pub root: CommitmentRoot,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MockHeader {
    pub height: Height,
    pub root: CommitmentRoot,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MockMisbehaviour {
    pub header_a: MockHeader,
    pub header_b: MockHeader,
}

impl MockClientState {
    pub fn new(latest_height: Height) -> Self {
        Self {
            latest_height,
            frozen_height: None,
        }
    }

    pub fn client_type(&self) -> ClientType {
        ClientType::from_str(MOCK_CLIENT_TYPE).expect("valid client type")
    }

    pub fn initialise(&self, consensus_state: &MockConsensusState) -> Result<(), ClientError> {
        if consensus_state.root.as_bytes().is_empty() {
            return Err(ClientError::InvalidConsensusState {
                description: "commitment root cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn verify_header(
        &self,
        _trusted: &MockConsensusState,
        header: &MockHeader,
    ) -> Result<(), ClientError> {
        if header.height <= self.latest_height {
            return Err(ClientError::LowHeaderHeight {
                header_height: header.height,
                latest_height: self.latest_height,
            });
        }
        Ok(())
    }

    pub fn update_state(
        &self,
        header: &MockHeader,
    ) -> Result<(MockClientState, MockConsensusState), ClientError> {
        self.verify_header(
            &MockConsensusState {
                root: header.root.clone(),
            },
            header,
        )?;
        Ok((
            MockClientState {
                latest_height: header.height,
                frozen_height: self.frozen_height,
            },
            MockConsensusState {
                root: header.root.clone(),
            },
        ))
    }

    pub fn check_misbehaviour_and_freeze(
        &self,
        _trusted: &MockConsensusState,
        misbehaviour: &MockMisbehaviour,
    ) -> Result<MockClientState, ClientError> {
        if misbehaviour.header_a.height != misbehaviour.header_b.height {
            return Err(ClientError::FailedMisbehaviourHandling {
                description: "headers are for different heights".to_string(),
            });
        }
        if misbehaviour.header_a.root == misbehaviour.header_b.root {
            return Err(ClientError::FailedMisbehaviourHandling {
                description: "headers commit to the same root".to_string(),
            });
        }
        Ok(MockClientState {
            latest_height: self.latest_height,
            frozen_height: Some(misbehaviour.header_a.height),
        })
    }
}

impl MockHeader {
    pub fn new(height: Height, root: &[u8]) -> Self {
        Self {
            height,
            root: CommitmentRoot::from_bytes(root),
        }
    }
}

impl MockConsensusState {
    pub fn new(root: &[u8]) -> Self {
        Self {
            root: CommitmentRoot::from_bytes(root),
        }
    }
}

impl From<MockClientState> for AnyClientState {
    fn from(cs: MockClientState) -> Self {
        Self::Mock(cs)
    }
}

impl From<MockConsensusState> for AnyConsensusState {
    fn from(cs: MockConsensusState) -> Self {
        Self::Mock(cs)
    }
}

impl From<MockHeader> for AnyHeader {
    fn from(header: MockHeader) -> Self {
        Self::Mock(header)
    }
}
