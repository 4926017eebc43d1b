//! Protocol-visible identifier newtypes.
//!
//! Identifiers are caller-chosen strings, constrained to a small alphabet
//! and to 10–20 characters. Parsing through [`FromStr`] is the only way to
//! construct one, so a held identifier is always valid.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::Into;

use crate::core::host::error::IdentifierError;
use crate::core::host::validate::{
    validate_channel_identifier, validate_client_identifier, validate_connection_identifier,
    validate_port_identifier,
};
use crate::prelude::*;

macro_rules! identifier {
    ($(#[$docs:meta])* $name:ident, $validator:ident) => {
        $(#[$docs])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Into,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            /// Get this identifier as a borrowed `&str`
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Get this identifier as a borrowed byte slice
            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        /// This implementation provides a `to_string` method.
        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $validator(s).map(|_| Self(s.to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        /// Equality check against string literal (satisfies `&$name == &str`).
        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str().eq(other)
            }
        }
    };
}

identifier!(
    /// Identifies a light client tracking one remote chain.
    ClientId,
    validate_client_identifier
);

identifier!(
    /// Identifies a connection between a local and a remote client.
    ConnectionId,
    validate_connection_identifier
);

identifier!(
    /// Identifies an application endpoint; the application itself is bound
    /// to the port through the router.
    PortId,
    validate_port_identifier
);

identifier!(
    /// Identifies a channel scoped under a port.
    ChannelId,
    validate_channel_identifier
);
