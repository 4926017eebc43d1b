//! Defines the channel types

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::core::channel::error::ChannelError;
use crate::core::channel::version::Version;
use crate::core::host::identifier::{ChannelId, ConnectionId, PortId};
use crate::prelude::*;

/// The channel handshake state machine. Unlike connections, channels have a
/// terminal `Closed` state: a closed channel sends and receives nothing,
/// though in-flight packets may still be timed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum State {
    Init,
    TryOpen,
    Open,
    Closed,
}

impl State {
    /// Yields the state as a string
    pub fn as_string(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_string())
    }
}

/// The delivery guarantee of a channel, fixed at creation.
///
/// `Ordered` enforces strict sequence delivery; `Unordered` accepts any
/// sequence once, rejecting duplicates through receipts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Order {
    Unordered,
    Ordered,
}

impl Order {
    /// Yields the order as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

/// The remote end of a channel, as known locally. The channel id is absent
/// until the counterparty's handshake step ran.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.channel_id {
            Some(channel_id) => write!(
                f,
                "Counterparty(port_id: {}, channel_id: {})",
                self.port_id, channel_id
            ),
            None => write!(f, "Counterparty(port_id: {}, channel_id: None)", self.port_id),
        }
    }
}

/// One end of a channel. Owned by the port that created it; the connection
/// is referenced by id through `connection_hops` (exactly one hop is
/// supported).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub remote: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
}

impl ChannelEnd {
    pub fn new(
        state: State,
        ordering: Order,
        remote: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Result<Self, ChannelError> {
        let channel_end = Self {
            state,
            ordering,
            remote,
            connection_hops,
            version,
        };
        channel_end.verify_connection_hops_length()?;
        Ok(channel_end)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ordering(&self) -> &Order {
        &self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.remote
    }

    pub fn connection_hops(&self) -> &[ConnectionId] {
        &self.connection_hops
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn state_matches(&self, other: &State) -> bool {
        self.state.eq(other)
    }

    pub fn order_matches(&self, other: &Order) -> bool {
        self.ordering.eq(other)
    }

    /// Checks if the state of this channel end matches the expected state.
    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ChannelError> {
        if !self.state_matches(expected) {
            return Err(ChannelError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Checks if the state of this channel end is not closed.
    pub fn verify_not_closed(&self) -> Result<(), ChannelError> {
        if self.state_matches(&State::Closed) {
            return Err(ChannelError::InvalidState {
                expected: "Channel state cannot be Closed".to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Checks if the counterparty of this channel end matches the expected one.
    pub fn verify_counterparty_matches(&self, expected: &Counterparty) -> Result<(), ChannelError> {
        if !self.counterparty().eq(expected) {
            return Err(ChannelError::InvalidCounterparty {
                expected: expected.clone(),
                actual: self.counterparty().clone(),
            });
        }
        Ok(())
    }

    /// Only a single connection hop is supported.
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        if self.connection_hops.len() != 1 {
            return Err(ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: self.connection_hops.len() as u64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    fn dummy_counterparty() -> Counterparty {
        Counterparty::new(
            PortId::from_str("testcpport").expect("valid identifier"),
            None,
        )
    }

    #[test]
    fn channel_end_requires_exactly_one_hop() {
        let no_hops = ChannelEnd::new(
            State::Init,
            Order::Unordered,
            dummy_counterparty(),
            vec![],
            Version::default(),
        );
        assert!(no_hops.is_err());

        let conn = ConnectionId::from_str("connectionone").expect("valid identifier");
        let two_hops = ChannelEnd::new(
            State::Init,
            Order::Unordered,
            dummy_counterparty(),
            vec![conn.clone(), conn.clone()],
            Version::default(),
        );
        assert!(two_hops.is_err());

        let one_hop = ChannelEnd::new(
            State::Init,
            Order::Unordered,
            dummy_counterparty(),
            vec![conn],
            Version::default(),
        );
        assert!(one_hop.is_ok());
    }

    #[test]
    fn state_checks() {
        let conn = ConnectionId::from_str("connectionone").expect("valid identifier");
        let chan_end = ChannelEnd::new(
            State::Closed,
            Order::Ordered,
            dummy_counterparty(),
            vec![conn],
            Version::default(),
        )
        .expect("one hop");

        assert!(chan_end.verify_not_closed().is_err());
        assert!(chan_end.verify_state_matches(&State::Open).is_err());
        assert!(chan_end.verify_state_matches(&State::Closed).is_ok());
    }
}
