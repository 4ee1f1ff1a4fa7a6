//! Per-connection client state plus the outbound message builders.

use bytes::Bytes;
use log::debug;
use std::time::Duration;

use super::{config::ClientConfig, error::ProtocolError, states::ClientState};
use crate::{
    game::Game,
    lobby::{GameInfo, Lobby},
    net::{
        messages::{
            ChatRequestMessage, InitMessage, JoinExistingGameMessage, JoinNewGameMessage,
            LeaveGameRequestMessage, LoginType, Message, MyActionRequestMessage,
            PlayerInfoRequestMessage, ResetTimeoutMessage, StartEventAckMessage,
            StartEventMessage, StartEventType,
        },
        protocol_version::ProtocolVersion,
        utils::pack_envelop,
    },
    poker::Action,
};

/// Work scheduled by the protocol that must not run synchronously inside
/// message handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Deferred {
    EnterLobby,
    EndOfGame { winner_id: u32 },
}

/// Actions returned by the protocol state machine for the driver to execute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolAction {
    /// Write this frame to the server
    Send(Bytes),

    /// Run the task through [`ClientProtocol::run_deferred`] once `delay`
    /// has passed
    ///
    /// [`ClientProtocol::run_deferred`]: super::ClientProtocol::run_deferred
    Schedule { delay: Duration, task: Deferred },
}

/// Everything the protocol knows about one connection: the lobby, the game
/// this client sits in, and the ids the server assigned.
///
/// A fresh session is created for every connection.
#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    pub(super) state: ClientState,
    pub lobby: Lobby,
    pub game: Option<Game>,
    pub(super) player_id: Option<u32>,
    pub(super) session_id: Option<Vec<u8>>,
    pub(super) server_version: Option<ProtocolVersion>,
    actions: Vec<ProtocolAction>,
}

impl Session {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: ClientState::Init,
            lobby: Lobby::new(),
            game: None,
            player_id: None,
            session_id: None,
            server_version: None,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.state
    }

    /// Our player id, assigned by the init acknowledgment.
    #[must_use]
    pub const fn player_id(&self) -> Option<u32> {
        self.player_id
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&[u8]> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub const fn server_version(&self) -> Option<ProtocolVersion> {
        self.server_version
    }

    pub fn active_game(&self) -> Result<&Game, ProtocolError> {
        self.game.as_ref().ok_or(ProtocolError::NoActiveGame)
    }

    pub fn active_game_mut(&mut self) -> Result<&mut Game, ProtocolError> {
        self.game.as_mut().ok_or(ProtocolError::NoActiveGame)
    }

    pub(super) fn require_state(
        &self,
        expected: ClientState,
        operation: &'static str,
    ) -> Result<(), ProtocolError> {
        if self.state != expected {
            return Err(ProtocolError::InvalidState {
                state: self.state,
                operation,
            });
        }
        Ok(())
    }

    pub(super) fn my_id(&self, operation: &'static str) -> Result<u32, ProtocolError> {
        self.player_id.ok_or(ProtocolError::InvalidState {
            state: self.state,
            operation,
        })
    }

    // === Actions ===

    /// Drains the actions queued since the last call.
    pub fn take_actions(&mut self) -> Vec<ProtocolAction> {
        std::mem::take(&mut self.actions)
    }

    #[must_use]
    pub fn pending_actions(&self) -> &[ProtocolAction] {
        &self.actions
    }

    pub fn send(&mut self, message: impl Into<Message>) -> Result<(), ProtocolError> {
        let message = message.into();
        debug!("Sending {}", message.message_type());
        let frame = pack_envelop(message)?;
        self.actions.push(ProtocolAction::Send(frame));
        Ok(())
    }

    pub fn schedule(&mut self, delay: Duration, task: Deferred) {
        self.actions.push(ProtocolAction::Schedule { delay, task });
    }

    // === Outbound builders ===

    /// Unauthenticated login requesting `version`.
    pub fn send_init(&mut self, version: ProtocolVersion) -> Result<(), ProtocolError> {
        let init = InitMessage {
            requested_version: version.into(),
            build_id: self.config.build_id,
            login: LoginType::Unauthenticated,
            nick_name: Some(self.config.nickname.clone()),
            ..InitMessage::default()
        };
        self.send(init)
    }

    pub fn send_player_info_request(&mut self, player_ids: Vec<u32>) -> Result<(), ProtocolError> {
        self.send(PlayerInfoRequestMessage {
            player_id: player_ids,
        })
    }

    pub fn send_join_existing_game(
        &mut self,
        game_id: u32,
        auto_leave: bool,
    ) -> Result<(), ProtocolError> {
        self.send(JoinExistingGameMessage {
            game_id,
            password: None,
            auto_leave,
            spectate_only: false,
        })
    }

    pub fn send_join_new_game(
        &mut self,
        game_info: &GameInfo,
        password: Option<&str>,
        auto_leave: bool,
    ) -> Result<(), ProtocolError> {
        self.send(JoinNewGameMessage {
            game_info: game_info.to_net(),
            password: password.map(str::to_string),
            auto_leave,
        })
    }

    /// Chat to the lobby, to a game, or privately to a player.
    pub fn send_chat(
        &mut self,
        text: impl Into<String>,
        game_id: Option<u32>,
        player_id: Option<u32>,
    ) -> Result<(), ProtocolError> {
        self.send(ChatRequestMessage {
            target_game_id: game_id,
            target_player_id: player_id,
            chat_text: text.into(),
        })
    }

    /// Sends an action for the current hand and round.
    ///
    /// The wire expects the stake relative to the highest set of the round.
    /// Unless `relative` is set, `bet` is taken as an absolute total and the
    /// highest set is subtracted.
    pub fn send_my_action(
        &mut self,
        action: Action,
        bet: u32,
        relative: bool,
    ) -> Result<(), ProtocolError> {
        let game = self.active_game()?;
        let my_relative_bet = if relative {
            bet
        } else {
            bet.saturating_sub(game.highest_set)
        };
        let request = MyActionRequestMessage {
            game_id: game.game_id(),
            hand_num: game.hands_started(),
            game_state: game.current_round()?.round,
            my_action: action,
            my_relative_bet,
        };
        self.send(request)
    }

    pub fn send_start_event(
        &mut self,
        game_id: u32,
        kind: StartEventType,
        fill_with_bots: bool,
    ) -> Result<(), ProtocolError> {
        self.send(StartEventMessage {
            game_id,
            start_event_type: kind,
            fill_with_computer_players: Some(fill_with_bots),
        })
    }

    pub fn send_start_event_ack(&mut self, game_id: u32) -> Result<(), ProtocolError> {
        self.send(StartEventAckMessage { game_id })
    }

    pub fn send_leave_game(&mut self, game_id: u32) -> Result<(), ProtocolError> {
        self.send(LeaveGameRequestMessage { game_id })
    }

    pub fn send_reset_timeout(&mut self) -> Result<(), ProtocolError> {
        self.send(ResetTimeoutMessage {})
    }
}
