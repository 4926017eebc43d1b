use crate::core::connection::connection::Counterparty;
use crate::core::connection::version::Version;
use crate::core::host::identifier::{ClientId, ConnectionId};
use crate::Signer;

/// Starts the connection handshake. The first mover needs no proof; the
/// counterparty's connection id stays empty until its `OpenTry` runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    /// The (caller-chosen) identifier of the new local connection.
    pub connection_id: ConnectionId,
    /// The local client tracking the counterparty chain.
    pub client_id: ClientId,
    pub counterparty: Counterparty,
    /// Optional single-version proposal; the full compatible set is offered
    /// otherwise.
    pub version: Option<Version>,
    pub signer: Signer,
}
