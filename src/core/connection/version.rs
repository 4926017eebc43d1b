//! Connection version negotiation.

use core::fmt::{Display, Error as FmtError, Formatter};

use crate::core::connection::error::ConnectionError;
use crate::prelude::*;

/// A connection version: an identifier plus the feature set both ends agree
/// to support on channels built over the connection.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Version {
    identifier: String,
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: String, features: Vec<String>) -> Self {
        Self {
            identifier,
            features,
        }
    }

    /// Checks whether the given feature is advertised by this version.
    pub fn is_supported_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self {
            identifier: "1".to_string(),
            features: vec!["ORDER_ORDERED".to_string(), "ORDER_UNORDERED".to_string()],
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.identifier)
    }
}

/// The set of versions this implementation speaks, most preferred first.
pub fn get_compatible_versions() -> Vec<Version> {
    vec![Version::default()]
}

/// Picks the first supported version out of the counterparty's proposals,
/// in our order of preference.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, ConnectionError> {
    if supported_versions.is_empty() || counterparty_versions.is_empty() {
        return Err(ConnectionError::EmptyVersions);
    }

    supported_versions
        .iter()
        .find(|sv| counterparty_versions.contains(sv))
        .cloned()
        .ok_or(ConnectionError::NoCommonVersion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_version_prefers_local_order() {
        let ours = vec![
            Version::new("2".to_string(), vec![]),
            Version::default(),
        ];
        let theirs = vec![Version::default(), Version::new("2".to_string(), vec![])];
        let picked = pick_version(&ours, &theirs).expect("common version");
        assert_eq!(picked, Version::new("2".to_string(), vec![]));
    }

    #[test]
    fn pick_version_fails_without_overlap() {
        let theirs = vec![Version::new("9".to_string(), vec![])];
        assert!(pick_version(&get_compatible_versions(), &theirs).is_err());
        assert!(pick_version(&get_compatible_versions(), &[]).is_err());
    }
}
