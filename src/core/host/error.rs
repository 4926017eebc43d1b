//! Foundational error types applicable across subsystems.

use crate::prelude::*;
use displaydoc::Display;

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` has invalid length; must be between `{min}` and `{max}` characters
    InvalidLength { id: String, min: u64, max: u64 },
    /// identifier `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
}

/// Errors that originate from the host surface itself.
#[derive(Debug, Display)]
pub enum HostError {
    /// message signer cannot be empty
    EmptySigner,
    /// invalid data: `{description}`
    InvalidData { description: String },
    /// missing data: `{description}`
    MissingData { description: String },
    /// failed to parse data: `{description}`
    FailedToParseData { description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}
