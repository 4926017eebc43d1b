//! Client event types emitted for relayers.

use crate::core::client::client_type::ClientType;
use crate::core::host::identifier::ClientId;
use crate::prelude::*;
use crate::Height;

/// Emitted when a new client is created.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateClient {
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub consensus_height: Height,
}

impl CreateClient {
    pub fn new(client_id: ClientId, client_type: ClientType, consensus_height: Height) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        vec![
            ("client_id".to_string(), self.client_id.to_string()),
            ("client_type".to_string(), self.client_type.to_string()),
            (
                "consensus_height".to_string(),
                self.consensus_height.to_string(),
            ),
        ]
    }
}

/// Emitted when a client is updated with a verified header.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateClient {
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub consensus_height: Height,
}

impl UpdateClient {
    pub fn new(client_id: ClientId, client_type: ClientType, consensus_height: Height) -> Self {
        Self {
            client_id,
            client_type,
            consensus_height,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        vec![
            ("client_id".to_string(), self.client_id.to_string()),
            ("client_type".to_string(), self.client_type.to_string()),
            (
                "consensus_height".to_string(),
                self.consensus_height.to_string(),
            ),
        ]
    }
}

/// Emitted when misbehaviour evidence freezes a client.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClientMisbehaviour {
    pub client_id: ClientId,
    pub client_type: ClientType,
}

impl ClientMisbehaviour {
    pub fn new(client_id: ClientId, client_type: ClientType) -> Self {
        Self {
            client_id,
            client_type,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        vec![
            ("client_id".to_string(), self.client_id.to_string()),
            ("client_type".to_string(), self.client_type.to_string()),
        ]
    }
}
