use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use crate::core::host::error::IdentifierError;
use crate::core::host::validate::validate_client_type;
use crate::prelude::*;

/// Tags which light-client verification algorithm a client runs. Dispatch
/// over client behavior is keyed by this tag, stored in the client state.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClientType(String);

impl ClientType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientType {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_type(s).map(|_| Self(s.to_string()))
    }
}

impl Display for ClientType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
