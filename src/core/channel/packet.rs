//! Defines the packet type and its sequence numbers.

use core::fmt::{Display, Error as FmtError, Formatter};

use derive_more::{From, Into};

use crate::core::channel::timeout::TimeoutHeight;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::prelude::*;
use crate::Height;

/// A per-channel-direction packet counter. Monotonically assigned on send;
/// ordered channels additionally enforce it on receive and acknowledge,
/// unordered channels use it solely to detect duplicates.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Sequence(u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// Packet receipt, stored on receive over unordered channels. Its presence
/// is what duplicate detection and timeout non-receipt proofs key on.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Receipt {
    Ok,
}

/// The packet type; this is what applications send to one another.
///
/// Each application defines the structure of the `data` field. A packet is
/// never mutated after creation; its identity is (ports, channels,
/// sequence).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
}

impl Packet {
    /// Whether this packet can no longer be received at the given height of
    /// the destination chain and should be timed out instead.
    pub fn timed_out(&self, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.has_expired(dst_chain_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_increments() {
        let seq = Sequence::from(41);
        assert_eq!(seq.increment().value(), 42);
        assert_eq!(u64::from(seq), 41);
    }
}
