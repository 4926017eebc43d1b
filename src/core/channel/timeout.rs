//! Height-based packet timeouts.

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::prelude::*;
use crate::Height;

/// Indicates a height on the destination chain after which the packet will
/// no longer be processed, and will instead count as having timed out.
///
/// Expiry is defined purely in terms of the destination chain's height
/// counter; there is no wall-clock component, which keeps the decision
/// deterministic and replay-safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeoutHeight {
    Never,
    At(Height),
}

impl TimeoutHeight {
    /// A timeout has been reached once the chain height is no longer below
    /// it.
    pub fn has_expired(&self, height: Height) -> bool {
        match self {
            Self::At(timeout_height) => height >= *timeout_height,
            Self::Never => false,
        }
    }

    /// The representation folded into packet commitments; "no timeout" is
    /// committed as zero.
    pub fn commitment_value(&self) -> u64 {
        match self {
            Self::At(height) => height.value(),
            Self::Never => 0,
        }
    }
}

impl From<Height> for TimeoutHeight {
    fn from(height: Height) -> Self {
        Self::At(height)
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_height) => write!(f, "{timeout_height}"),
            Self::Never => write!(f, "no timeout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_at_the_timeout_height() {
        let timeout = TimeoutHeight::At(Height::new(10).expect("non-zero"));
        assert!(!timeout.has_expired(Height::new(9).expect("non-zero")));
        assert!(timeout.has_expired(Height::new(10).expect("non-zero")));
        assert!(timeout.has_expired(Height::new(11).expect("non-zero")));
    }

    #[test]
    fn never_does_not_expire() {
        assert!(!TimeoutHeight::Never.has_expired(Height::new(u64::MAX - 1).expect("non-zero")));
        assert_eq!(TimeoutHeight::Never.commitment_value(), 0);
    }
}
