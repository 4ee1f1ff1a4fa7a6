//! Registry of the players and games the server has announced.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::{
    net::messages::{
        EndRaiseMode, GameMode, NetGameInfo, NetGameType, PlayerInfoData, RaiseIntervalMode,
    },
    player::Player,
};

pub const DEFAULT_MAX_NUM_PLAYERS: u32 = 10;
pub const DEFAULT_RAISE_EVERY_HANDS: u32 = 8;
pub const DEFAULT_RAISE_EVERY_MINUTES: u32 = 1;
pub const DEFAULT_PROPOSED_GUI_SPEED: u32 = 4;
pub const DEFAULT_DELAY_BETWEEN_HANDS: u32 = 7;
pub const DEFAULT_PLAYER_ACTION_TIMEOUT: u32 = 20;
pub const DEFAULT_FIRST_SMALL_BLIND: u32 = 10;
pub const DEFAULT_START_MONEY: u32 = 3000;

#[derive(Debug, Eq, Error, PartialEq)]
pub enum LobbyError {
    #[error("player with id {0} already listed")]
    DuplicatePlayer(u32),
    #[error("player with id {0} not listed")]
    PlayerNotFound(u32),
    #[error("game with id {0} already listed")]
    DuplicateGame(u32),
    #[error("game with id {0} not listed")]
    GameNotFound(u32),
    #[error("no game of name {0:?} found")]
    GameNameNotFound(String),
    #[error("{count} games share the name {name:?}")]
    AmbiguousGameName { name: String, count: usize },
    #[error("game info has no game id")]
    MissingGameId,
    #[error("player {player_id} is not a member of game {game_id}")]
    NotAMember { player_id: u32, game_id: u32 },
}

/// Game configuration plus the live state the server reports for it.
///
/// The configuration half is what a client sends to create a game; the live
/// half (`game_id` onwards) is filled in from game list notifications. Two
/// infos are equal when their game ids are equal.
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub game_name: String,
    pub net_game_type: NetGameType,
    pub max_num_players: u32,
    pub raise_interval_mode: RaiseIntervalMode,
    pub raise_every_hands: u32,
    pub raise_every_minutes: u32,
    pub end_raise_mode: EndRaiseMode,
    pub end_raise_small_blind_value: u32,
    pub proposed_gui_speed: u32,
    pub delay_between_hands: u32,
    pub player_action_timeout: u32,
    pub first_small_blind: u32,
    pub start_money: u32,
    pub manual_blinds: Vec<u32>,
    pub allow_spectators: bool,

    pub game_id: Option<u32>,
    pub game_mode: Option<GameMode>,
    pub is_private: Option<bool>,
    pub admin_player_id: Option<u32>,
    pub player_ids: Vec<u32>,
    pub spectator_ids: Vec<u32>,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            game_name: String::new(),
            net_game_type: NetGameType::Normal,
            max_num_players: DEFAULT_MAX_NUM_PLAYERS,
            raise_interval_mode: RaiseIntervalMode::OnHandNum,
            raise_every_hands: DEFAULT_RAISE_EVERY_HANDS,
            raise_every_minutes: DEFAULT_RAISE_EVERY_MINUTES,
            end_raise_mode: EndRaiseMode::DoubleBlinds,
            end_raise_small_blind_value: 0,
            proposed_gui_speed: DEFAULT_PROPOSED_GUI_SPEED,
            delay_between_hands: DEFAULT_DELAY_BETWEEN_HANDS,
            player_action_timeout: DEFAULT_PLAYER_ACTION_TIMEOUT,
            first_small_blind: DEFAULT_FIRST_SMALL_BLIND,
            start_money: DEFAULT_START_MONEY,
            manual_blinds: Vec::new(),
            allow_spectators: true,
            game_id: None,
            game_mode: None,
            is_private: None,
            admin_player_id: None,
            player_ids: Vec::new(),
            spectator_ids: Vec::new(),
        }
    }
}

impl GameInfo {
    #[must_use]
    pub fn new(game_name: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            ..Default::default()
        }
    }

    /// Takes over the configuration half of a wire game info.
    pub fn set_info(&mut self, info: &NetGameInfo) {
        self.game_name.clone_from(&info.game_name);
        self.net_game_type = info.net_game_type;
        self.max_num_players = info.max_num_players;
        self.raise_interval_mode = info.raise_interval_mode;
        if let Some(hands) = info.raise_every_hands {
            self.raise_every_hands = hands;
        }
        if let Some(minutes) = info.raise_every_minutes {
            self.raise_every_minutes = minutes;
        }
        self.end_raise_mode = info.end_raise_mode;
        self.end_raise_small_blind_value = info.end_raise_small_blind_value;
        self.proposed_gui_speed = info.proposed_gui_speed;
        self.delay_between_hands = info.delay_between_hands;
        self.player_action_timeout = info.player_action_timeout;
        self.first_small_blind = info.first_small_blind;
        self.start_money = info.start_money;
        self.manual_blinds.clone_from(&info.manual_blinds);
        self.allow_spectators = info.allow_spectators;
    }

    /// Wire form of the configuration. Only the raise interval matching the
    /// raise mode is sent.
    #[must_use]
    pub fn to_net(&self) -> NetGameInfo {
        let (raise_every_hands, raise_every_minutes) = match self.raise_interval_mode {
            RaiseIntervalMode::OnHandNum => (Some(self.raise_every_hands), None),
            RaiseIntervalMode::OnMinutes => (None, Some(self.raise_every_minutes)),
        };
        NetGameInfo {
            game_name: self.game_name.clone(),
            net_game_type: self.net_game_type,
            max_num_players: self.max_num_players,
            raise_interval_mode: self.raise_interval_mode,
            raise_every_hands,
            raise_every_minutes,
            end_raise_mode: self.end_raise_mode,
            end_raise_small_blind_value: self.end_raise_small_blind_value,
            proposed_gui_speed: self.proposed_gui_speed,
            delay_between_hands: self.delay_between_hands,
            player_action_timeout: self.player_action_timeout,
            first_small_blind: self.first_small_blind,
            start_money: self.start_money,
            manual_blinds: self.manual_blinds.clone(),
            allow_spectators: self.allow_spectators,
        }
    }

    #[must_use]
    pub fn is_member(&self, player_id: u32) -> bool {
        self.player_ids.contains(&player_id)
    }
}

impl From<&NetGameInfo> for GameInfo {
    fn from(value: &NetGameInfo) -> Self {
        let mut info = Self::default();
        info.set_info(value);
        info
    }
}

impl PartialEq for GameInfo {
    fn eq(&self, other: &Self) -> bool {
        self.game_id == other.game_id
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lobby {
    players: BTreeMap<u32, Player>,
    game_infos: BTreeMap<u32, GameInfo>,
}

impl Lobby {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Players ===

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn add_player(&mut self, player_id: u32) -> Result<(), LobbyError> {
        if self.players.contains_key(&player_id) {
            return Err(LobbyError::DuplicatePlayer(player_id));
        }
        self.players.insert(player_id, Player::new(player_id));
        Ok(())
    }

    pub fn del_player(&mut self, player_id: u32) -> Result<Player, LobbyError> {
        self.players
            .remove(&player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))
    }

    pub fn player(&self, player_id: u32) -> Result<&Player, LobbyError> {
        self.players
            .get(&player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))
    }

    pub fn player_mut(&mut self, player_id: u32) -> Result<&mut Player, LobbyError> {
        self.players
            .get_mut(&player_id)
            .ok_or(LobbyError::PlayerNotFound(player_id))
    }

    #[must_use]
    pub fn exist_player(&self, player_id: u32) -> bool {
        self.players.contains_key(&player_id)
    }

    pub fn set_player_info(
        &mut self,
        player_id: u32,
        info: &PlayerInfoData,
    ) -> Result<(), LobbyError> {
        self.player_mut(player_id)?.set_info(info);
        Ok(())
    }

    /// Moves a player to a new id, keeping everything known about it and
    /// updating game memberships.
    pub fn rename_player(&mut self, old_id: u32, new_id: u32) -> Result<(), LobbyError> {
        if old_id == new_id {
            return self.player(old_id).map(|_| ());
        }
        if self.players.contains_key(&new_id) {
            return Err(LobbyError::DuplicatePlayer(new_id));
        }
        let mut player = self.del_player(old_id)?;
        player.id = new_id;
        self.players.insert(new_id, player);
        for info in self.game_infos.values_mut() {
            for id in info.player_ids.iter_mut().chain(info.spectator_ids.iter_mut()) {
                if *id == old_id {
                    *id = new_id;
                }
            }
            if info.admin_player_id == Some(old_id) {
                info.admin_player_id = Some(new_id);
            }
        }
        Ok(())
    }

    // === Games ===

    pub fn game_infos(&self) -> impl Iterator<Item = &GameInfo> {
        self.game_infos.values()
    }

    pub fn add_game_info(&mut self, info: GameInfo) -> Result<(), LobbyError> {
        let game_id = info.game_id.ok_or(LobbyError::MissingGameId)?;
        if self.game_infos.contains_key(&game_id) {
            return Err(LobbyError::DuplicateGame(game_id));
        }
        self.game_infos.insert(game_id, info);
        Ok(())
    }

    pub fn del_game_info(&mut self, game_id: u32) -> Result<GameInfo, LobbyError> {
        self.game_infos
            .remove(&game_id)
            .ok_or(LobbyError::GameNotFound(game_id))
    }

    pub fn game_info(&self, game_id: u32) -> Result<&GameInfo, LobbyError> {
        self.game_infos
            .get(&game_id)
            .ok_or(LobbyError::GameNotFound(game_id))
    }

    pub fn game_info_mut(&mut self, game_id: u32) -> Result<&mut GameInfo, LobbyError> {
        self.game_infos
            .get_mut(&game_id)
            .ok_or(LobbyError::GameNotFound(game_id))
    }

    #[must_use]
    pub fn exist_game_info(&self, game_id: u32) -> bool {
        self.game_infos.contains_key(&game_id)
    }

    /// Id of the one game called `game_name`. Names are not unique on the
    /// server, so several matches are an error just like none.
    pub fn game_info_id(&self, game_name: &str) -> Result<u32, LobbyError> {
        let ids: Vec<u32> = self
            .game_infos
            .iter()
            .filter(|(_, info)| info.game_name == game_name)
            .map(|(id, _)| *id)
            .collect();
        match ids.as_slice() {
            [id] => Ok(*id),
            [] => Err(LobbyError::GameNameNotFound(game_name.to_string())),
            _ => Err(LobbyError::AmbiguousGameName {
                name: game_name.to_string(),
                count: ids.len(),
            }),
        }
    }

    pub fn add_player_to_game(&mut self, player_id: u32, game_id: u32) -> Result<(), LobbyError> {
        let info = self.game_info_mut(game_id)?;
        if !info.player_ids.contains(&player_id) {
            info.player_ids.push(player_id);
        }
        Ok(())
    }

    pub fn del_player_from_game(
        &mut self,
        player_id: u32,
        game_id: u32,
    ) -> Result<(), LobbyError> {
        let info = self.game_info_mut(game_id)?;
        let idx = info
            .player_ids
            .iter()
            .position(|id| *id == player_id)
            .ok_or(LobbyError::NotAMember { player_id, game_id })?;
        info.player_ids.remove(idx);
        Ok(())
    }

    pub fn add_spectator_to_game(
        &mut self,
        player_id: u32,
        game_id: u32,
    ) -> Result<(), LobbyError> {
        let info = self.game_info_mut(game_id)?;
        if !info.spectator_ids.contains(&player_id) {
            info.spectator_ids.push(player_id);
        }
        Ok(())
    }

    pub fn del_spectator_from_game(
        &mut self,
        player_id: u32,
        game_id: u32,
    ) -> Result<(), LobbyError> {
        let info = self.game_info_mut(game_id)?;
        let idx = info
            .spectator_ids
            .iter()
            .position(|id| *id == player_id)
            .ok_or(LobbyError::NotAMember { player_id, game_id })?;
        info.spectator_ids.remove(idx);
        Ok(())
    }
}
