//! Defines the acknowledgement type, the application's answer to a
//! received packet.

use crate::core::channel::error::PacketError;
use crate::prelude::*;

/// An opaque acknowledgement payload, produced by the receiving module and
/// relayed back to the sender. Must be non-empty: its hash is stored
/// on-chain, and an empty payload would be indistinguishable from "not yet
/// acknowledged".
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = PacketError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(PacketError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_acknowledgement_is_rejected() {
        assert!(Acknowledgement::try_from(Vec::new()).is_err());
    }
}
