//! The acknowledgement payload this application writes.

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::applications::transfer::error::TokenTransferError;
use crate::core::channel::acknowledgement::Acknowledgement;
use crate::prelude::*;

const ACK_SUCCESS: &str = "success";

/// A successful or failed transfer receipt, JSON-encoded into the channel
/// acknowledgement. A failure carries the error text back to the sender so
/// the refund path can run there.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AckStatus {
    #[serde(rename = "result")]
    Success(String),
    #[serde(rename = "error")]
    Error(String),
}

impl AckStatus {
    pub fn success() -> Self {
        Self::Success(ACK_SUCCESS.to_string())
    }

    pub fn from_error(err: TokenTransferError) -> Self {
        Self::Error(err.to_string())
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|_| br#"{"error":"ack serialization"}"#.to_vec())
    }

    pub fn from_ack(ack: &Acknowledgement) -> Result<Self, TokenTransferError> {
        serde_json::from_slice(ack.as_bytes())
            .map_err(|_| TokenTransferError::FailedToDeserializeAck)
    }
}

impl Display for AckStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::Success(s) => write!(f, "{s}"),
            Self::Error(e) => write!(f, "{e}"),
        }
    }
}

impl From<AckStatus> for Acknowledgement {
    fn from(status: AckStatus) -> Self {
        // Both variants serialize to non-empty JSON objects.
        Acknowledgement::try_from(status.to_bytes())
            .unwrap_or_else(|_| unreachable!("ack status serialization is never empty"))
    }
}
