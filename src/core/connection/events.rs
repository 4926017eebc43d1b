//! Connection handshake events.

use crate::core::host::identifier::{ClientId, ConnectionId};
use crate::prelude::*;

macro_rules! connection_event {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub connection_id: ConnectionId,
            pub client_id: ClientId,
            pub counterparty_connection_id: Option<ConnectionId>,
            pub counterparty_client_id: ClientId,
        }

        impl $name {
            pub fn new(
                connection_id: ConnectionId,
                client_id: ClientId,
                counterparty_connection_id: Option<ConnectionId>,
                counterparty_client_id: ClientId,
            ) -> Self {
                Self {
                    connection_id,
                    client_id,
                    counterparty_connection_id,
                    counterparty_client_id,
                }
            }

            pub fn attributes(&self) -> Vec<(String, String)> {
                vec![
                    ("connection_id".to_string(), self.connection_id.to_string()),
                    ("client_id".to_string(), self.client_id.to_string()),
                    (
                        "counterparty_connection_id".to_string(),
                        self.counterparty_connection_id
                            .as_ref()
                            .map(|id| id.to_string())
                            .unwrap_or_default(),
                    ),
                    (
                        "counterparty_client_id".to_string(),
                        self.counterparty_client_id.to_string(),
                    ),
                ]
            }
        }
    };
}

connection_event!(
    /// First handshake step ran locally; no counterparty connection yet.
    OpenInit
);
connection_event!(
    /// Counterparty `INIT` was proved; local end moved to `TRYOPEN`.
    OpenTry
);
connection_event!(
    /// Counterparty `TRYOPEN` was proved; local end moved to `OPEN`.
    OpenAck
);
connection_event!(
    /// Counterparty `OPEN` was proved; local end moved to `OPEN`.
    OpenConfirm
);
