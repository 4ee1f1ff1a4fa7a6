//! A bot that sits in one named game and plays check/call.

use log::{debug, info, warn};
use pokerth_proto::{
    Action, ClientCallbacks, GameInfo, LobbyError, ProtocolError, Session,
    messages::{ChatMessage, StartEventType},
};

/// Joins the game called `game_name` (creating it when nobody has), starts
/// it with computer players when it administers it, checks when it can and
/// calls otherwise. Answers "ping" in chat.
#[derive(Debug)]
pub struct CheckCallBot {
    game_name: String,
    hands_played: u32,
    games_finished: u32,
}

impl CheckCallBot {
    #[must_use]
    pub fn new(game_name: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            hands_played: 0,
            games_finished: 0,
        }
    }

    #[must_use]
    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    #[must_use]
    pub const fn hands_played(&self) -> u32 {
        self.hands_played
    }

    #[must_use]
    pub const fn games_finished(&self) -> u32 {
        self.games_finished
    }

    fn is_admin(session: &Session) -> bool {
        match (session.game.as_ref(), session.player_id()) {
            (Some(game), Some(my_id)) => game.admin_player_id == Some(my_id),
            _ => false,
        }
    }

    fn start_game(session: &mut Session) -> Result<(), ProtocolError> {
        let game_id = session.active_game()?.game_id();
        info!("Starting game {game_id}");
        session.send_start_event(game_id, StartEventType::Start, true)
    }
}

impl ClientCallbacks for CheckCallBot {
    fn handle_inside_lobby(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        match session.lobby.game_info_id(&self.game_name) {
            Ok(game_id) => {
                info!("Joining game {game_id} ({})", self.game_name);
                session.send_join_existing_game(game_id, true)
            }
            Err(LobbyError::GameNameNotFound(_)) => {
                info!("Creating game {}", self.game_name);
                let info = GameInfo::new(self.game_name.clone());
                session.send_join_new_game(&info, None, true)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn handle_game_joined(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        if Self::is_admin(session) {
            Self::start_game(session)?;
        }
        Ok(())
    }

    fn handle_my_turn(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        let game = session.active_game()?;
        let action = if game.is_bet_placed()? {
            Action::Call
        } else {
            Action::Check
        };
        let bet = game.highest_set;
        debug!("My turn in {}: {action} to {bet}", game.current_round()?.round);
        session.send_my_action(action, bet, false)
    }

    fn handle_others_turn(
        &mut self,
        _session: &mut Session,
        player_id: u32,
    ) -> Result<(), ProtocolError> {
        debug!("Waiting for player {player_id}");
        Ok(())
    }

    fn handle_chat(
        &mut self,
        session: &mut Session,
        chat: &ChatMessage,
    ) -> Result<(), ProtocolError> {
        if !chat.chat_text.trim().eq_ignore_ascii_case("ping") {
            return Ok(());
        }
        match (chat.game_id, chat.player_id) {
            (Some(game_id), Some(player_id)) => {
                session.send_chat("Pooong", Some(game_id), Some(player_id))
            }
            _ => session.send_chat("Pong", None, None),
        }
    }

    fn handle_end_of_hand(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        self.hands_played += 1;
        let game = session.active_game()?;
        if let Some(money) = game.player(game.my_id()).ok().and_then(|me| me.money) {
            debug!("Hand {} over, {money} chips left", self.hands_played);
        }
        Ok(())
    }

    fn handle_end_of_game(
        &mut self,
        session: &mut Session,
        winner_id: u32,
    ) -> Result<(), ProtocolError> {
        self.games_finished += 1;
        if session.player_id() == Some(winner_id) {
            info!("Won game {}", self.games_finished);
        }
        if session.game.is_none() {
            warn!("Game ended but we are not seated anymore");
            return Ok(());
        }
        if Self::is_admin(session) {
            Self::start_game(session)?;
        }
        Ok(())
    }
}
