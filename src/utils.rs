//! Small internal helpers.

use crate::core::host::error::HostError;
use crate::prelude::*;

/// The canonical value codec of the store: anything persisted or proven is
/// encoded this way. Wire compatibility with external encodings is an
/// external contract, not fixed here.
pub(crate) fn encode_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, HostError> {
    serde_json::to_vec(value).map_err(|e| HostError::FailedToParseData {
        description: e.to_string(),
    })
}

#[cfg(any(test, feature = "mocks"))]
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, HostError> {
    serde_json::from_slice(bytes).map_err(|e| HostError::FailedToParseData {
        description: e.to_string(),
    })
}
