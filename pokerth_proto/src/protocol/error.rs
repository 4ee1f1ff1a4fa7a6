use thiserror::Error;

use super::states::ClientState;
use crate::{
    game::GameError,
    lobby::LobbyError,
    net::errors::{EnvelopeError, TransportError},
    poker::CardError,
};

/// Everything that can go wrong while driving a PokerTH session.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),

    /// A message arrived that the current state does not accept
    #[error("{operation} is not allowed in state {state}")]
    InvalidState {
        state: ClientState,
        operation: &'static str,
    },

    /// We were told we administer a game the server advertised with
    /// another admin
    #[error("game {game_id} is administered by {advertised}, not by us ({my_id})")]
    AdminMismatch {
        game_id: u32,
        advertised: u32,
        my_id: u32,
    },

    #[error("no active game")]
    NoActiveGame,

    /// The embedder did not supply a decision the protocol needs
    #[error("{hook} is not implemented")]
    Unimplemented { hook: &'static str },
}

impl ProtocolError {
    /// Fatal errors mean the connection cannot continue: the byte stream lost
    /// its frame boundaries, or the embedding is incomplete. Everything else
    /// only costs the message that caused it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_framing(),
            Self::Unimplemented { .. } | Self::AdminMismatch { .. } => true,
            _ => false,
        }
    }
}
