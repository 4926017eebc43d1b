//! Types and utilities related to packet commitments.
//!
//! A packet commitment is the hash stored on the sending chain under
//! `commitments/{port}/{channel}/{sequence}`; its presence is the proof
//! obligation the receiver discharges, and its deletion is what makes
//! acknowledgement and timeout mutually exclusive.

use crate::core::channel::acknowledgement::Acknowledgement;
use crate::core::channel::timeout::TimeoutHeight;
use crate::prelude::*;

/// Packet commitment
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Acknowledgement commitment to be stored
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for AcknowledgementCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Compute the commitment for a packet.
///
/// The absence of a timeout height is committed as zero, so a packet with
/// and without a timeout can never share a commitment.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
) -> PacketCommitment {
    let mut hash_input = [0; 8 + 32];

    hash_input[..8].copy_from_slice(&timeout_height.commitment_value().to_be_bytes());
    hash_input[8..].copy_from_slice(&hash(packet_data));

    hash(&hash_input).to_vec().into()
}

/// Compute the commitment for an acknowledgement.
pub fn compute_ack_commitment(ack: &Acknowledgement) -> AcknowledgementCommitment {
    hash(ack.as_bytes()).to_vec().into()
}

/// Helper function to hash a byte slice using SHA256.
///
/// Note that computing commitments with anything other than SHA256 will
/// break the Merkle proofs of the provable store.
fn hash(data: &[u8]) -> [u8; 32] {
    use sha2::Digest;

    sha2::Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Height;

    #[test]
    fn test_compute_packet_commitment() {
        let expected: [u8; 32] = [
            0xaa, 0xce, 0xd6, 0x10, 0xd0, 0xcf, 0x87, 0x5a, 0x2a, 0x3f, 0x8c, 0x9f, 0x97, 0x31,
            0x18, 0xf0, 0xc4, 0xfc, 0xc2, 0x74, 0x5b, 0xe4, 0x32, 0xe2, 0xda, 0x3c, 0x97, 0xcd,
            0xf4, 0xc8, 0xf4, 0x7f,
        ];
        let actual = compute_packet_commitment(
            b"packet data",
            &TimeoutHeight::At(Height::new(42).expect("non-zero")),
        );
        assert_eq!(&expected[..], actual.as_ref());
    }

    #[test]
    fn test_compute_ack_commitment() {
        let expected: [u8; 32] = [
            0x05, 0x4e, 0xde, 0xc1, 0xd0, 0x21, 0x1f, 0x62, 0x4f, 0xed, 0x0c, 0xbc, 0xa9, 0xd4,
            0xf9, 0x40, 0x0b, 0x0e, 0x49, 0x1c, 0x43, 0x74, 0x2a, 0xf2, 0xc5, 0xb0, 0xab, 0xeb,
            0xf0, 0xc9, 0x90, 0xd8,
        ];
        let ack = Acknowledgement::try_from(vec![0u8, 1, 2, 3]).expect("non-empty");
        let actual = compute_ack_commitment(&ack);
        assert_eq!(&expected[..], actual.as_ref())
    }
}
