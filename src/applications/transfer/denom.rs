//! Defines the denomination types: base denominations and their
//! port/channel trace prefixes.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::applications::transfer::error::TokenTransferError;
use crate::core::host::identifier::{ChannelId, PortId};
use crate::prelude::*;

const BASE_DENOM_MIN_LENGTH: usize = 3;
const BASE_DENOM_MAX_LENGTH: usize = 16;

/// The "base" of a denomination: the name a token carries on its source
/// chain. Bounded lowercase alphanumeric, starting with a letter.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct BaseDenom(String);

impl BaseDenom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TokenTransferError::EmptyBaseDenom);
        }

        let length_ok = (BASE_DENOM_MIN_LENGTH..=BASE_DENOM_MAX_LENGTH).contains(&s.len());
        let alphabet_ok = s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            && s.starts_with(|c: char| c.is_ascii_lowercase());

        if !(length_ok && alphabet_ok) {
            return Err(TokenTransferError::InvalidBaseDenom {
                denom: s.to_string(),
            });
        }

        Ok(BaseDenom(s.to_string()))
    }
}

impl Display for BaseDenom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

/// One hop in a voucher's provenance: the port and channel it was received
/// through on its current chain.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct TracePrefix {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// A denomination as it circulates: either a native base denomination, or a
/// voucher carrying the trace of the channel it arrived through.
///
/// A single hop of provenance is tracked; forwarding a voucher onwards over
/// yet another channel is not supported.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct PrefixedDenom {
    pub trace: Option<TracePrefix>,
    pub base: BaseDenom,
}

impl PrefixedDenom {
    pub fn native(base: BaseDenom) -> Self {
        Self { trace: None, base }
    }

    pub fn is_native(&self) -> bool {
        self.trace.is_none()
    }

    /// Whether this is a voucher received through the given port/channel.
    pub fn has_prefix(&self, port_id: &PortId, channel_id: &ChannelId) -> bool {
        self.trace
            .as_ref()
            .is_some_and(|p| &p.port_id == port_id && &p.channel_id == channel_id)
    }

    pub fn add_trace_prefix(&mut self, prefix: TracePrefix) -> Result<(), TokenTransferError> {
        if self.trace.is_some() {
            return Err(TokenTransferError::InvalidCoin {
                description: format!("denomination {self} already carries a trace prefix"),
            });
        }
        self.trace = Some(prefix);
        Ok(())
    }

    pub fn remove_trace_prefix(&mut self) -> Option<TracePrefix> {
        self.trace.take()
    }
}

impl FromStr for PrefixedDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [base] => Ok(Self {
                trace: None,
                base: base.parse()?,
            }),
            [port, channel, base] => Ok(Self {
                trace: Some(TracePrefix::new(
                    port.parse::<PortId>()?,
                    channel.parse::<ChannelId>()?,
                )),
                base: base.parse()?,
            }),
            _ => Err(TokenTransferError::InvalidCoin {
                description: format!("malformed denomination: {s}"),
            }),
        }
    }
}

impl From<BaseDenom> for PrefixedDenom {
    fn from(base: BaseDenom) -> Self {
        Self::native(base)
    }
}

impl Display for PrefixedDenom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.trace {
            Some(prefix) => write!(f, "{}/{}", prefix, self.base),
            None => write!(f, "{}", self.base),
        }
    }
}

// Denominations travel in packet data in their path form.
impl serde::Serialize for PrefixedDenom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PrefixedDenom {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PrefixedDenom::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::simple("atom", true)]
    #[case::with_digits("atom2x", true)]
    #[case::min_length("aom", true)]
    #[case::dash("ato-m", false)]
    #[case::uppercase("Atom", false)]
    #[case::too_short("at", false)]
    #[case::too_long("averyverylongdenom", false)]
    #[case::leading_digit("0atom", false)]
    fn base_denom_validation(#[case] denom: &str, #[case] valid: bool) {
        assert_eq!(BaseDenom::from_str(denom).is_ok(), valid);
    }

    #[test]
    fn prefixed_denom_roundtrip() {
        let denom: PrefixedDenom = "testportid/testchannel/atom".parse().expect("valid");
        assert!(!denom.is_native());
        assert_eq!(denom.to_string(), "testportid/testchannel/atom");

        let native: PrefixedDenom = "atom".parse().expect("valid");
        assert!(native.is_native());
    }

    #[test]
    fn double_prefixing_is_rejected() {
        let mut denom: PrefixedDenom = "testportid/testchannel/atom".parse().expect("valid");
        let prefix = TracePrefix::new(
            "othertestport".parse().expect("valid identifier"),
            "otherchannel".parse().expect("valid identifier"),
        );
        assert!(denom.add_trace_prefix(prefix).is_err());
    }
}
