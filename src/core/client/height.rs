//! Defines the core `Height` type used throughout the library

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::str::FromStr;

use crate::core::client::error::ClientError;

/// The height of a chain: the number of blocks since genesis. Strictly
/// positive; expiry and ordering decisions are made exclusively against this
/// counter, never against wall-clock time, so they are deterministic and
/// replay-safe.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Height(u64);

impl Height {
    pub fn new(height: u64) -> Result<Self, ClientError> {
        if height == 0 {
            return Err(ClientError::InvalidHeight);
        }

        Ok(Self(height))
    }

    /// The lowest valid height.
    pub fn min() -> Self {
        Self(1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn add(&self, delta: u64) -> Height {
        Height(self.0 + delta)
    }

    pub fn increment(&self) -> Height {
        self.add(1)
    }

    pub fn sub(&self, delta: u64) -> Result<Height, ClientError> {
        if self.0 <= delta {
            return Err(ClientError::InvalidHeightResult);
        }

        Ok(Height(self.0 - delta))
    }

    pub fn decrement(&self) -> Result<Height, ClientError> {
        self.sub(1)
    }
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, displaydoc::Display)]
pub enum HeightError {
    /// cannot convert into a `Height` type from string `{height}`
    HeightConversion {
        height: crate::prelude::String,
        error: ParseIntError,
    },
    /// attempted to parse an invalid zero height
    ZeroHeight,
}

#[cfg(feature = "std")]
impl std::error::Error for HeightError {}

impl FromStr for Height {
    type Err = HeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use crate::prelude::*;

        let height = s.parse::<u64>().map_err(|e| HeightError::HeightConversion {
            height: s.to_string(),
            error: e,
        })?;
        Height::new(height).map_err(|_| HeightError::ZeroHeight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_is_invalid() {
        assert!(Height::new(0).is_err());
        assert!("0".parse::<Height>().is_err());
    }

    #[test]
    fn height_arithmetic_and_ordering() {
        let h = Height::new(5).expect("non-zero");
        assert_eq!(h.increment().value(), 6);
        assert_eq!(h.decrement().expect("above minimum").value(), 4);
        assert!(Height::min().decrement().is_err());
        assert!(h < h.increment());
        assert_eq!("5".parse::<Height>().expect("valid"), h);
    }
}
