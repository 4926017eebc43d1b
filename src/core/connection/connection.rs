//! Defines the types that define a connection

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::core::commitment::CommitmentPrefix;
use crate::core::connection::error::ConnectionError;
use crate::core::connection::version::Version;
use crate::core::host::identifier::{ClientId, ConnectionId};
use crate::prelude::*;

/// The connection handshake state machine.
///
/// `Open` is terminal: it is the only state from which channels may be
/// opened on top of the connection, and nothing transitions out of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum State {
    Init,
    TryOpen,
    Open,
}

impl State {
    /// Yields the state as a string
    pub fn as_string(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
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

/// The remote side of a connection, as known locally: the counterparty's
/// client for us, its connection id (absent until its handshake step ran),
/// and the store prefix its proofs must be checked under.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Counterparty {
    client_id: ClientId,
    connection_id: Option<ConnectionId>,
    prefix: CommitmentPrefix,
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }
}

/// One end of a connection: the pairing of a local client with a remote
/// counterparty, carried through the handshake states.
///
/// The client is referenced by id; many connections may reference the same
/// client, but each connection end has exactly one.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConnectionEnd {
    state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
    ) -> Result<Self, ConnectionError> {
        if versions.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }

        Ok(Self {
            state,
            client_id,
            counterparty,
            versions,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn state_matches(&self, other: &State) -> bool {
        self.state.eq(other)
    }
}
