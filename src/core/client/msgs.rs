//! Message definitions for the client subsystem.

use crate::core::client::client_state::{AnyClientState, AnyConsensusState, AnyHeader, AnyMisbehaviour};
use crate::core::host::identifier::ClientId;
use crate::Signer;

/// All client messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMsg {
    CreateClient(MsgCreateClient),
    UpdateClient(MsgUpdateClient),
    Misbehaviour(MsgSubmitMisbehaviour),
}

/// Creates a new client from an initial client state and consensus state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgCreateClient {
    pub client_id: ClientId,
    pub client_state: AnyClientState,
    pub consensus_state: AnyConsensusState,
    pub signer: Signer,
}

impl MsgCreateClient {
    pub fn new(
        client_id: ClientId,
        client_state: AnyClientState,
        consensus_state: AnyConsensusState,
        signer: Signer,
    ) -> Self {
        Self {
            client_id,
            client_state,
            consensus_state,
            signer,
        }
    }
}

/// Updates an existing client with a new header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateClient {
    pub client_id: ClientId,
    pub header: AnyHeader,
    pub signer: Signer,
}

/// Submits evidence of misbehaviour to freeze a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSubmitMisbehaviour {
    pub client_id: ClientId,
    pub misbehaviour: AnyMisbehaviour,
    pub signer: Signer,
}
