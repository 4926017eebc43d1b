//! Defines the connection error type

use displaydoc::Display;

use crate::core::client::error::ClientError;
use crate::core::connection::version::Version;
use crate::core::host::error::IdentifierError;
use crate::core::host::identifier::ConnectionId;
use crate::prelude::*;

#[derive(Debug, Display)]
pub enum ConnectionError {
    /// connection `{0}` not found
    ConnectionNotFound(ConnectionId),
    /// connection `{0}` already exists
    ConnectionAlreadyExists(ConnectionId),
    /// connection `{connection_id}` is in the wrong state for this handshake step
    ConnectionMismatch { connection_id: ConnectionId },
    /// counterparty is missing a required connection identifier
    InvalidCounterparty,
    /// empty supported versions
    EmptyVersions,
    /// no common version between the proposed and the supported sets
    NoCommonVersion,
    /// version `{0}` is not in the supported set
    UnsupportedVersion(Version),
    /// failed to verify the counterparty connection state: `{0}`
    VerifyConnectionState(ClientError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// other error: `{description}`
    Other { description: String },
}

impl From<IdentifierError> for ConnectionError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::VerifyConnectionState(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            _ => None,
        }
    }
}
