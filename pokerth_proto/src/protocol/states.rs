use std::fmt;

/// Where the client stands in the connection lifecycle.
///
/// The progression is linear: `Init -> Lobby -> GameJoined -> GameStarted`.
/// End of game returns to `GameJoined`, and removal from a game returns to
/// `Lobby`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ClientState {
    #[default]
    Init,
    Lobby,
    GameJoined,
    GameStarted,
}

impl ClientState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Lobby => "LOBBY",
            Self::GameJoined => "GAME_JOINED",
            Self::GameStarted => "GAME_STARTED",
        }
    }

    #[must_use]
    pub const fn in_game(self) -> bool {
        matches!(self, Self::GameJoined | Self::GameStarted)
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(ClientState::default(), ClientState::Init);
        assert_eq!(ClientState::GameJoined.to_string(), "GAME_JOINED");
        assert!(ClientState::GameStarted.in_game());
        assert!(!ClientState::Lobby.in_game());
    }
}
