use crate::core::host::error::IdentifierError as Error;
use crate::prelude::*;

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// The length bounds shared by all protocol-visible identifier classes
/// (clients, connections, ports, channels).
pub const ID_MIN_LENGTH: u64 = 10;
pub const ID_MAX_LENGTH: u64 = 20;

/// The length bounds for client type tags, which are internal to the chain
/// and shorter than protocol-visible identifiers.
pub const CLIENT_TYPE_MIN_LENGTH: u64 = 4;
pub const CLIENT_TYPE_MAX_LENGTH: u64 = 30;

/// Checks that the identifier only contains valid characters: alphanumeric
/// plus a small set of separators. The path separator `/` is notably absent,
/// since identifiers are embedded into store paths.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Checks that the identifier length falls within the given (inclusive)
/// bounds. Empty identifiers are always rejected.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    // Make sure min is at least one so we reject empty identifiers.
    let min = min.max(1);
    let length = id.len() as u64;
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// Default validator function for client identifiers.
pub fn validate_client_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, ID_MIN_LENGTH, ID_MAX_LENGTH)
}

/// Default validator function for client type tags.
pub fn validate_client_type(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, CLIENT_TYPE_MIN_LENGTH, CLIENT_TYPE_MAX_LENGTH)
}

/// Default validator function for connection identifiers.
pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, ID_MIN_LENGTH, ID_MAX_LENGTH)
}

/// Default validator function for port identifiers.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, ID_MIN_LENGTH, ID_MAX_LENGTH)
}

/// Default validator function for channel identifiers.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, ID_MIN_LENGTH, ID_MAX_LENGTH)
}
