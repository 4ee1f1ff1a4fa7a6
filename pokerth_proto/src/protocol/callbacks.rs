//! Decision points supplied by the embedding application.

use super::{error::ProtocolError, session::Session};
use crate::net::messages::ChatMessage;

/// Embedder hooks called by [`ClientProtocol`](super::ClientProtocol).
///
/// Every hook gets the session so it can inspect lobby and game state and
/// queue replies through the session's `send_*` builders. Hooks without a
/// meaningful default return [`ProtocolError::Unimplemented`], which is fatal:
/// a client that never acts on its turn cannot play.
pub trait ClientCallbacks {
    /// Called some time after the server accepted the login.
    fn handle_inside_lobby(&mut self, _session: &mut Session) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_inside_lobby",
        })
    }

    /// Called right after the local game was created from a join ack.
    fn handle_game_joined(&mut self, _session: &mut Session) -> Result<(), ProtocolError> {
        Ok(())
    }

    fn handle_my_turn(&mut self, _session: &mut Session) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_my_turn",
        })
    }

    fn handle_others_turn(
        &mut self,
        _session: &mut Session,
        _player_id: u32,
    ) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_others_turn",
        })
    }

    fn handle_chat(
        &mut self,
        _session: &mut Session,
        _chat: &ChatMessage,
    ) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_chat",
        })
    }

    fn handle_end_of_hand(&mut self, _session: &mut Session) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_end_of_hand",
        })
    }

    fn handle_end_of_game(
        &mut self,
        _session: &mut Session,
        _winner_id: u32,
    ) -> Result<(), ProtocolError> {
        Err(ProtocolError::Unimplemented {
            hook: "handle_end_of_game",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ClientConfig;

    struct Bare;

    impl ClientCallbacks for Bare {}

    #[test]
    fn test_defaults() {
        let mut session = Session::new(ClientConfig::default());
        let mut bare = Bare;
        assert!(bare.handle_game_joined(&mut session).is_ok());
        assert!(matches!(
            bare.handle_my_turn(&mut session),
            Err(ProtocolError::Unimplemented {
                hook: "handle_my_turn"
            })
        ));
        assert!(matches!(
            bare.handle_inside_lobby(&mut session),
            Err(ProtocolError::Unimplemented { .. })
        ));
        assert!(matches!(
            bare.handle_end_of_game(&mut session, 1),
            Err(ProtocolError::Unimplemented { .. })
        ));
    }
}
