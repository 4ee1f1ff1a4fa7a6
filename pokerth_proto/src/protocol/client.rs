//! The client protocol state machine.
//!
//! [`ClientProtocol`] is sans-IO: the driver feeds it received bytes and
//! executes the [`ProtocolAction`]s it queues (frames to write, tasks to run
//! later). Each complete frame is developed into a [`Message`] and dispatched
//! through one `match`, so every message type of the schema has a handler by
//! construction. Types without a dedicated handler fall through to
//! [`ClientProtocol::unhandled_message_received`], which only logs.

use log::{debug, error, info, warn};

use super::{
    callbacks::ClientCallbacks,
    config::ClientConfig,
    error::ProtocolError,
    session::{Deferred, ProtocolAction, Session},
    states::ClientState,
};
use crate::{
    game::Game,
    lobby::GameInfo,
    net::{
        buffer::FrameBuffer,
        messages::{
            AnnounceMessage, ChatMessage, DealFlopCardsMessage, DealRiverCardMessage,
            DealTurnCardMessage, EndOfGameMessage, EndOfHandHideCardsMessage,
            EndOfHandShowCardsMessage, GameAdminChangedMessage, GameListAdminChangedMessage,
            GameListNewMessage, GameListPlayerJoinedMessage, GameListPlayerLeftMessage,
            GameListSpectatorJoinedMessage, GameListSpectatorLeftMessage, GameListUpdateMessage,
            GameMode, GamePlayerJoinedMessage, GamePlayerLeftMessage, GameStartInitialMessage,
            GameStartRejoinMessage, HandStartMessage, InitAckMessage, JoinGameAckMessage,
            JoinGameFailedMessage, Message, PlayerIdChangedMessage, PlayerInfoReplyMessage,
            PlayerListMessage, PlayerListNotification, PlayersActionDoneMessage,
            PlayersTurnMessage, RemovedFromGameMessage, ServerType, StartEventMessage,
        },
        protocol_version::ProtocolVersion,
        utils::{develop, unpack},
    },
    player::Player,
    poker::{Action, Card, Round},
};

pub struct ClientProtocol<C> {
    buffer: FrameBuffer,
    session: Session,
    callbacks: C,
}

impl<C: ClientCallbacks> ClientProtocol<C> {
    #[must_use]
    pub fn new(config: ClientConfig, callbacks: C) -> Self {
        Self {
            buffer: FrameBuffer::new(config.max_frame_size),
            session: Session::new(config),
            callbacks,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub const fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.session.state()
    }

    pub fn take_actions(&mut self) -> Vec<ProtocolAction> {
        self.session.take_actions()
    }

    /// Starts over with an empty buffer and a fresh session, keeping the
    /// callbacks.
    pub fn reset(&mut self) {
        let config = self.session.config().clone();
        self.buffer = FrameBuffer::new(config.max_frame_size);
        self.session = Session::new(config);
    }

    pub fn connection_made(&mut self) {
        info!("Connection established.");
    }

    pub fn connection_lost(&mut self, reason: &str) {
        info!("Connection lost due to: {reason}");
    }

    /// Buffers `data` and dispatches every frame completed so far.
    ///
    /// Frames that fail to decode or develop are logged and dropped. The first
    /// handler error stops processing and is returned; frames still buffered
    /// are handled by the next call, which may pass an empty slice.
    pub fn data_received(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        self.buffer.extend(data);
        while let Some(frame) = self.buffer.next_frame()? {
            let envelope = match unpack(&frame) {
                Ok(envelope) => envelope,
                Err(e) if e.is_framing() => return Err(e.into()),
                Err(e) => {
                    warn!("Dropping undecodable frame of {} bytes: {e}", frame.len());
                    continue;
                }
            };
            match develop(envelope) {
                Ok(message) => self.dispatch(message)?,
                Err(e) => warn!("Dropping malformed envelope: {e}"),
            }
        }
        Ok(())
    }

    /// Runs a task previously queued as [`ProtocolAction::Schedule`].
    pub fn run_deferred(&mut self, task: Deferred) -> Result<(), ProtocolError> {
        match task {
            Deferred::EnterLobby => {
                if self.session.state() != ClientState::Lobby {
                    debug!("Not in the lobby anymore, skipping lobby callback");
                    return Ok(());
                }
                self.callbacks.handle_inside_lobby(&mut self.session)
            }
            Deferred::EndOfGame { winner_id } => {
                self.callbacks.handle_end_of_game(&mut self.session, winner_id)
            }
        }
    }

    pub fn dispatch(&mut self, message: Message) -> Result<(), ProtocolError> {
        debug!("Calling {}", message.message_type().hook_name());
        match message {
            Message::AnnounceMessage(msg) => self.announce_received(&msg),
            Message::InitAckMessage(msg) => self.init_ack_received(msg),
            Message::PlayerListMessage(msg) => self.player_list_received(&msg),
            Message::PlayerInfoReplyMessage(msg) => self.player_info_reply_received(&msg),
            Message::GameListNewMessage(msg) => self.game_list_new_received(&msg),
            Message::GameListUpdateMessage(msg) => self.game_list_update_received(&msg),
            Message::GameListPlayerJoinedMessage(msg) => {
                self.game_list_player_joined_received(&msg)
            }
            Message::GameListPlayerLeftMessage(msg) => self.game_list_player_left_received(&msg),
            Message::GameListAdminChangedMessage(msg) => {
                self.game_list_admin_changed_received(&msg)
            }
            Message::GameListSpectatorJoinedMessage(msg) => {
                self.game_list_spectator_joined_received(&msg)
            }
            Message::GameListSpectatorLeftMessage(msg) => {
                self.game_list_spectator_left_received(&msg)
            }
            Message::JoinGameAckMessage(msg) => self.join_game_ack_received(&msg),
            Message::JoinGameFailedMessage(msg) => {
                self.join_game_failed_received(&msg);
                Ok(())
            }
            Message::GamePlayerJoinedMessage(msg) => self.game_player_joined_received(&msg),
            Message::GamePlayerLeftMessage(msg) => self.game_player_left_received(&msg),
            Message::GameAdminChangedMessage(msg) => self.game_admin_changed_received(&msg),
            Message::RemovedFromGameMessage(msg) => {
                self.removed_from_game_received(&msg);
                Ok(())
            }
            Message::StartEventMessage(msg) => self.start_event_received(&msg),
            Message::GameStartInitialMessage(msg) => self.game_start_initial_received(&msg),
            Message::GameStartRejoinMessage(msg) => self.game_start_rejoin_received(&msg),
            Message::HandStartMessage(msg) => self.hand_start_received(&msg),
            Message::PlayersTurnMessage(msg) => self.players_turn_received(&msg),
            Message::PlayersActionDoneMessage(msg) => self.players_action_done_received(&msg),
            Message::DealFlopCardsMessage(msg) => self.deal_flop_cards_received(&msg),
            Message::DealTurnCardMessage(msg) => self.deal_turn_card_received(&msg),
            Message::DealRiverCardMessage(msg) => self.deal_river_card_received(&msg),
            Message::EndOfHandShowCardsMessage(msg) => self.end_of_hand_show_cards_received(&msg),
            Message::EndOfHandHideCardsMessage(msg) => self.end_of_hand_hide_cards_received(&msg),
            Message::EndOfGameMessage(msg) => self.end_of_game_received(&msg),
            Message::ChatMessage(msg) => self.chat_received(&msg),
            Message::TimeoutWarningMessage(msg) => {
                info!(
                    "Timeout warning ({:?}), {} seconds left",
                    msg.timeout_reason, msg.remaining_seconds
                );
                self.session.send_reset_timeout()
            }
            Message::PlayerIdChangedMessage(msg) => self.player_id_changed_received(&msg),
            Message::YourActionRejectedMessage(msg) => {
                warn!(
                    "Action {} ({}) in {} rejected: {:?}",
                    msg.your_action, msg.your_relative_bet, msg.game_state, msg.rejection_reason
                );
                Ok(())
            }
            Message::ErrorMessage(msg) => {
                error!("Server reported error: {:?}", msg.error_reason);
                Ok(())
            }
            Message::DialogMessage(msg) => {
                info!("Server dialog: {}", msg.notification_text);
                Ok(())
            }
            Message::ChatRejectMessage(msg) => {
                warn!("Chat rejected: {}", msg.chat_text);
                Ok(())
            }
            other => {
                self.unhandled_message_received(&other);
                Ok(())
            }
        }
    }

    pub fn unhandled_message_received(&mut self, message: &Message) {
        info!("Received unhandled message:\n{message:?}");
    }

    // === Login ===

    fn announce_received(&mut self, msg: &AnnounceMessage) -> Result<(), ProtocolError> {
        self.session.require_state(ClientState::Init, "announceReceived")?;
        let version = ProtocolVersion::from(msg.protocol_version);
        if !ProtocolVersion::current().is_compatible_with(&version) {
            warn!(
                "Server speaks protocol {version}, this client speaks {}",
                ProtocolVersion::current()
            );
        }
        self.session.server_version = Some(version);

        match msg.server_type {
            ServerType::Lan | ServerType::InternetNoAuth => {
                self.session.send_init(version)?;
                info!("InitMessage sent");
                Ok(())
            }
            ServerType::InternetAuth => Err(ProtocolError::Unimplemented {
                hook: "authenticated login",
            }),
        }
    }

    fn init_ack_received(&mut self, msg: InitAckMessage) -> Result<(), ProtocolError> {
        self.session.require_state(ClientState::Init, "initAckReceived")?;
        let my_id = msg.your_player_id;
        self.session.player_id = Some(my_id);
        self.session.session_id = Some(msg.your_session_id);
        if !self.session.lobby.exist_player(my_id) {
            self.session.lobby.add_player(my_id)?;
        }
        if let Some(game_id) = msg.rejoin_game_id {
            info!("Server offers to rejoin game {game_id}");
        }
        self.session.state = ClientState::Lobby;
        info!("Logged in as player {my_id}");

        let delay = self.session.config().lobby_delay;
        self.session.schedule(delay, Deferred::EnterLobby);
        Ok(())
    }

    // === Lobby ===

    fn player_list_received(&mut self, msg: &PlayerListMessage) -> Result<(), ProtocolError> {
        let lobby = &mut self.session.lobby;
        match msg.player_list_notification {
            PlayerListNotification::New => {
                if !lobby.exist_player(msg.player_id) {
                    lobby.add_player(msg.player_id)?;
                }
                self.session.send_player_info_request(vec![msg.player_id])
            }
            PlayerListNotification::Left => {
                lobby.del_player(msg.player_id)?;
                Ok(())
            }
        }
    }

    fn player_info_reply_received(
        &mut self,
        msg: &PlayerInfoReplyMessage,
    ) -> Result<(), ProtocolError> {
        let Some(info) = &msg.player_info_data else {
            debug!("No info available for player {}", msg.player_id);
            return Ok(());
        };
        let lobby = &mut self.session.lobby;
        if !lobby.exist_player(msg.player_id) {
            lobby.add_player(msg.player_id)?;
        }
        lobby.set_player_info(msg.player_id, info)?;
        if let Some(game) = self.session.game.as_mut() {
            if let Ok(player) = game.player_mut(msg.player_id) {
                player.set_info(info);
            }
        }
        Ok(())
    }

    fn game_list_new_received(&mut self, msg: &GameListNewMessage) -> Result<(), ProtocolError> {
        let mut info = GameInfo::from(&msg.game_info);
        info.game_id = Some(msg.game_id);
        info.game_mode = Some(msg.game_mode);
        info.is_private = Some(msg.is_private);
        info.admin_player_id = Some(msg.admin_player_id);
        info.player_ids.clone_from(&msg.player_ids);
        info.spectator_ids.clone_from(&msg.spectator_ids);

        let lobby = &mut self.session.lobby;
        if lobby.exist_game_info(msg.game_id) {
            *lobby.game_info_mut(msg.game_id)? = info;
        } else {
            lobby.add_game_info(info)?;
        }
        Ok(())
    }

    fn game_list_update_received(
        &mut self,
        msg: &GameListUpdateMessage,
    ) -> Result<(), ProtocolError> {
        let lobby = &mut self.session.lobby;
        if msg.game_mode == GameMode::Closed {
            lobby.del_game_info(msg.game_id)?;
        } else {
            lobby.game_info_mut(msg.game_id)?.game_mode = Some(msg.game_mode);
        }
        Ok(())
    }

    fn game_list_player_joined_received(
        &mut self,
        msg: &GameListPlayerJoinedMessage,
    ) -> Result<(), ProtocolError> {
        self.session
            .lobby
            .add_player_to_game(msg.player_id, msg.game_id)?;
        Ok(())
    }

    fn game_list_player_left_received(
        &mut self,
        msg: &GameListPlayerLeftMessage,
    ) -> Result<(), ProtocolError> {
        self.session
            .lobby
            .del_player_from_game(msg.player_id, msg.game_id)?;
        Ok(())
    }

    fn game_list_admin_changed_received(
        &mut self,
        msg: &GameListAdminChangedMessage,
    ) -> Result<(), ProtocolError> {
        self.session.lobby.game_info_mut(msg.game_id)?.admin_player_id =
            Some(msg.new_admin_player_id);
        Ok(())
    }

    fn game_list_spectator_joined_received(
        &mut self,
        msg: &GameListSpectatorJoinedMessage,
    ) -> Result<(), ProtocolError> {
        self.session
            .lobby
            .add_spectator_to_game(msg.player_id, msg.game_id)?;
        Ok(())
    }

    fn game_list_spectator_left_received(
        &mut self,
        msg: &GameListSpectatorLeftMessage,
    ) -> Result<(), ProtocolError> {
        self.session
            .lobby
            .del_spectator_from_game(msg.player_id, msg.game_id)?;
        Ok(())
    }

    fn player_id_changed_received(
        &mut self,
        msg: &PlayerIdChangedMessage,
    ) -> Result<(), ProtocolError> {
        let (old_id, new_id) = (msg.old_player_id, msg.new_player_id);
        if self.session.lobby.exist_player(old_id) {
            self.session.lobby.rename_player(old_id, new_id)?;
        }
        if let Some(game) = self.session.game.as_mut() {
            if game.exist_player(old_id) {
                game.rename_player(old_id, new_id)?;
            }
        }
        if self.session.player_id == Some(old_id) {
            self.session.player_id = Some(new_id);
        }
        Ok(())
    }

    // === Joining ===

    fn join_game_ack_received(&mut self, msg: &JoinGameAckMessage) -> Result<(), ProtocolError> {
        self.session.require_state(ClientState::Lobby, "joinGameAckReceived")?;
        let my_id = self.session.my_id("joinGameAckReceived")?;
        let lobby = &mut self.session.lobby;

        let advertised = lobby
            .game_info(msg.game_id)
            .ok()
            .and_then(|info| info.admin_player_id);
        if msg.are_you_game_admin {
            if let Some(advertised) = advertised.filter(|id| *id != my_id) {
                return Err(ProtocolError::AdminMismatch {
                    game_id: msg.game_id,
                    advertised,
                    my_id,
                });
            }
        }
        if !lobby.exist_game_info(msg.game_id) {
            let mut info = GameInfo::from(&msg.game_info);
            info.game_id = Some(msg.game_id);
            info.admin_player_id = msg.are_you_game_admin.then_some(my_id);
            lobby.add_game_info(info)?;
        }

        let mut game = Game::new(msg.game_id, my_id);
        let me = lobby
            .player(my_id)
            .cloned()
            .unwrap_or_else(|_| Player::new(my_id));
        game.add_player(me)?;
        game.admin_player_id = if msg.are_you_game_admin {
            Some(my_id)
        } else {
            advertised
        };
        game.small_blind = msg.game_info.first_small_blind;
        self.session.game = Some(game);
        self.session.state = ClientState::GameJoined;
        info!(
            "Joined game {} ({}){}",
            msg.game_id,
            msg.game_info.game_name,
            if msg.are_you_game_admin { " as admin" } else { "" }
        );
        self.callbacks.handle_game_joined(&mut self.session)
    }

    fn join_game_failed_received(&mut self, msg: &JoinGameFailedMessage) {
        warn!(
            "Joining game {} failed: {:?}",
            msg.game_id, msg.join_game_failure_reason
        );
    }

    fn game_player_joined_received(
        &mut self,
        msg: &GamePlayerJoinedMessage,
    ) -> Result<(), ProtocolError> {
        let player = self.lobby_player(msg.player_id);
        let game = self.session.active_game_mut()?;
        if !game.exist_player(msg.player_id) {
            game.add_player(player)?;
        }
        if msg.is_game_admin {
            game.admin_player_id = Some(msg.player_id);
        }
        Ok(())
    }

    fn game_player_left_received(
        &mut self,
        msg: &GamePlayerLeftMessage,
    ) -> Result<(), ProtocolError> {
        let game = self.session.active_game_mut()?;
        game.del_player(msg.player_id)?;
        debug!(
            "Player {} left game {}: {:?}",
            msg.player_id, msg.game_id, msg.game_player_left_reason
        );
        Ok(())
    }

    fn game_admin_changed_received(
        &mut self,
        msg: &GameAdminChangedMessage,
    ) -> Result<(), ProtocolError> {
        self.session.active_game_mut()?.admin_player_id = Some(msg.new_admin_player_id);
        Ok(())
    }

    fn removed_from_game_received(&mut self, msg: &RemovedFromGameMessage) {
        info!(
            "Removed from game {}: {:?}",
            msg.game_id, msg.removed_from_game_reason
        );
        self.session.game = None;
        self.session.state = ClientState::Lobby;
    }

    // === Game ===

    fn start_event_received(&mut self, msg: &StartEventMessage) -> Result<(), ProtocolError> {
        self.session
            .require_state(ClientState::GameJoined, "startEventReceived")?;
        self.session.send_start_event_ack(msg.game_id)?;
        self.session.state = ClientState::GameStarted;
        Ok(())
    }

    fn game_start_initial_received(
        &mut self,
        msg: &GameStartInitialMessage,
    ) -> Result<(), ProtocolError> {
        let start_money = self
            .session
            .lobby
            .game_info(msg.game_id)
            .ok()
            .map(|info| info.start_money);
        let newcomers: Vec<Player> = msg
            .player_seats
            .iter()
            .map(|id| self.lobby_player(*id))
            .collect();

        let game = self.session.active_game_mut()?;
        for (seat, player) in newcomers.into_iter().enumerate() {
            let player_id = player.id;
            if !game.exist_player(player_id) {
                game.add_player(player)?;
            }
            let seated = game.player_mut(player_id)?;
            seated.seat = Some(seat);
            if start_money.is_some() {
                seated.money = start_money;
            }
        }
        game.start_game(msg.start_dealer_player_id, 0)?;
        Ok(())
    }

    fn game_start_rejoin_received(
        &mut self,
        msg: &GameStartRejoinMessage,
    ) -> Result<(), ProtocolError> {
        let newcomers: Vec<Player> = msg
            .rejoin_player_data
            .iter()
            .map(|data| self.lobby_player(data.player_id))
            .collect();

        let game = self.session.active_game_mut()?;
        for (seat, (player, data)) in newcomers
            .into_iter()
            .zip(&msg.rejoin_player_data)
            .enumerate()
        {
            if !game.exist_player(player.id) {
                game.add_player(player)?;
            }
            let seated = game.player_mut(data.player_id)?;
            seated.seat = Some(seat);
            seated.money = Some(data.player_money);
        }
        game.start_game(msg.start_dealer_player_id, msg.hand_num)?;
        self.session.state = ClientState::GameStarted;
        Ok(())
    }

    fn hand_start_received(&mut self, msg: &HandStartMessage) -> Result<(), ProtocolError> {
        let pocket_cards = match &msg.plain_cards {
            Some(cards) => Some([
                Card::from_int(cards.plain_card1)?,
                Card::from_int(cards.plain_card2)?,
            ]),
            None => None,
        };

        let game = self.session.active_game_mut()?;
        // The ledger is reset even when the button could not be placed.
        let button = match msg.dealer_player_id {
            Some(dealer_id) => game.start_new_hand_with_dealer(dealer_id),
            None => game.start_new_hand(),
        };
        game.pocket_cards = pocket_cards;
        game.small_blind = msg.small_blind;
        if let Some([first, second]) = pocket_cards {
            info!("Hand {} started, holding {first} {second}", game.hands_started());
        }
        button.map_err(ProtocolError::from)
    }

    fn players_turn_received(&mut self, msg: &PlayersTurnMessage) -> Result<(), ProtocolError> {
        self.session
            .require_state(ClientState::GameStarted, "playersTurnReceived")?;
        let game = self.session.active_game_mut()?;
        game.ensure_round(msg.game_state)?;
        if msg.player_id == game.my_id() {
            self.callbacks.handle_my_turn(&mut self.session)
        } else {
            self.callbacks
                .handle_others_turn(&mut self.session, msg.player_id)
        }
    }

    fn players_action_done_received(
        &mut self,
        msg: &PlayersActionDoneMessage,
    ) -> Result<(), ProtocolError> {
        let game = self.session.active_game_mut()?;
        game.ensure_round(msg.game_state)?;
        let chips = match msg.player_action {
            Action::Fold | Action::Check => None,
            _ => Some(msg.total_player_bet),
        };
        game.add_action(msg.player_id, msg.player_action, chips)?;
        game.player_mut(msg.player_id)?.money = Some(msg.player_money);
        game.highest_set = msg.highest_set;
        game.minimum_raise = msg.minimum_raise;
        Ok(())
    }

    fn deal_flop_cards_received(
        &mut self,
        msg: &DealFlopCardsMessage,
    ) -> Result<(), ProtocolError> {
        let cards = vec![
            Card::from_int(msg.flop_card1)?,
            Card::from_int(msg.flop_card2)?,
            Card::from_int(msg.flop_card3)?,
        ];
        self.set_board_cards(Round::Flop, cards)
    }

    fn deal_turn_card_received(&mut self, msg: &DealTurnCardMessage) -> Result<(), ProtocolError> {
        let cards = vec![Card::from_int(msg.turn_card)?];
        self.set_board_cards(Round::Turn, cards)
    }

    fn deal_river_card_received(
        &mut self,
        msg: &DealRiverCardMessage,
    ) -> Result<(), ProtocolError> {
        let cards = vec![Card::from_int(msg.river_card)?];
        self.set_board_cards(Round::River, cards)
    }

    fn set_board_cards(&mut self, round: Round, cards: Vec<Card>) -> Result<(), ProtocolError> {
        let game = self.session.active_game_mut()?;
        game.ensure_round(round)?;
        game.round_info_mut(round)?.cards = cards;
        Ok(())
    }

    fn end_of_hand_show_cards_received(
        &mut self,
        msg: &EndOfHandShowCardsMessage,
    ) -> Result<(), ProtocolError> {
        let game = self.session.active_game_mut()?;
        for result in &msg.player_results {
            if let Ok(player) = game.player_mut(result.player_id) {
                player.money = Some(result.player_money);
            }
        }
        self.callbacks.handle_end_of_hand(&mut self.session)
    }

    fn end_of_hand_hide_cards_received(
        &mut self,
        msg: &EndOfHandHideCardsMessage,
    ) -> Result<(), ProtocolError> {
        let game = self.session.active_game_mut()?;
        if let Ok(player) = game.player_mut(msg.player_id) {
            player.money = Some(msg.player_money);
        }
        self.callbacks.handle_end_of_hand(&mut self.session)
    }

    fn end_of_game_received(&mut self, msg: &EndOfGameMessage) -> Result<(), ProtocolError> {
        self.session
            .require_state(ClientState::GameStarted, "endOfGameReceived")?;
        let winner = self
            .session
            .game
            .as_ref()
            .and_then(|game| game.player(msg.winner_player_id).ok())
            .map_or_else(
                || format!("#{}", msg.winner_player_id),
                Player::display_name,
            );
        info!("Game {} won by {winner}", msg.game_id);
        self.session.state = ClientState::GameJoined;

        let delay = self.session.config().end_of_game_delay;
        self.session.schedule(
            delay,
            Deferred::EndOfGame {
                winner_id: msg.winner_player_id,
            },
        );
        Ok(())
    }

    fn chat_received(&mut self, msg: &ChatMessage) -> Result<(), ProtocolError> {
        self.callbacks.handle_chat(&mut self.session, msg)
    }

    /// The lobby's record of a player, or a bare one if the lobby never
    /// heard of it.
    fn lobby_player(&self, player_id: u32) -> Player {
        self.session
            .lobby
            .player(player_id)
            .cloned()
            .unwrap_or_else(|_| Player::new(player_id))
    }
}
