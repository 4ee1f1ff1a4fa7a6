//! Per-hand round and action ledger of the game this client sits in.
//!
//! The server is authoritative for every number; the ledger only records what
//! it announces so the embedder can ask questions like "has anyone bet yet"
//! or "how much have I already put in this round".

use thiserror::Error;

use crate::{
    player::Player,
    poker::{Action, Card, Round},
};

#[derive(Debug, Eq, Error, PartialEq)]
pub enum GameError {
    #[error("poker round {0} exists already")]
    RoundExists(Round),
    #[error("cannot add poker round {round}, next round is {expected}")]
    RoundOutOfOrder { round: Round, expected: Round },
    #[error("poker round {0} has not been played in this hand")]
    RoundNotPlayed(Round),
    #[error("no poker round available")]
    NoRound,
    #[error("{operation} is undefined while players are posting blinds")]
    BlindRound { operation: &'static str },
    #[error("player {0} not found in game")]
    PlayerNotFound(u32),
    #[error("player {0} is already in the game")]
    DuplicatePlayer(u32),
    #[error("no dealer to move the button from")]
    NoDealer,
    #[error("dealer {0} has no seat")]
    DealerNotSeated(u32),
}

/// One action as announced by the server.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionInfo {
    pub player_id: u32,
    pub kind: Action,
    /// Stake of the action, when the action carries one.
    pub chips: Option<u32>,
}

impl ActionInfo {
    #[must_use]
    pub const fn new(player_id: u32, kind: Action, chips: Option<u32>) -> Self {
        Self {
            player_id,
            kind,
            chips,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundInfo {
    pub round: Round,
    /// Board cards revealed when the round started.
    pub cards: Vec<Card>,
    pub actions: Vec<ActionInfo>,
}

impl RoundInfo {
    #[must_use]
    pub const fn new(round: Round, cards: Vec<Card>) -> Self {
        Self {
            round,
            cards,
            actions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    game_id: u32,
    my_id: u32,
    players: Vec<Player>,
    dealer: Option<u32>,
    /// Seat the button stays on after the dealer left the game.
    dealer_seat: Option<usize>,
    rounds: Vec<RoundInfo>,
    hand_num: u32,
    /// Largest single stake committed in the current betting round.
    pub highest_set: u32,
    pub minimum_raise: u32,
    pub small_blind: u32,
    pub pocket_cards: Option<[Card; 2]>,
    pub admin_player_id: Option<u32>,
}

impl Game {
    #[must_use]
    pub const fn new(game_id: u32, my_id: u32) -> Self {
        Self {
            game_id,
            my_id,
            players: Vec::new(),
            dealer: None,
            dealer_seat: None,
            rounds: Vec::new(),
            hand_num: 1,
            highest_set: 0,
            minimum_raise: 0,
            small_blind: 0,
            pocket_cards: None,
            admin_player_id: None,
        }
    }

    #[must_use]
    pub const fn game_id(&self) -> u32 {
        self.game_id
    }

    #[must_use]
    pub const fn my_id(&self) -> u32 {
        self.my_id
    }

    pub fn set_my_id(&mut self, my_id: u32) {
        self.my_id = my_id;
    }

    #[must_use]
    pub const fn hand_num(&self) -> u32 {
        self.hand_num
    }

    #[must_use]
    pub const fn big_blind(&self) -> u32 {
        self.small_blind * 2
    }

    // === Players ===

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.exist_player(player.id) {
            return Err(GameError::DuplicatePlayer(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn del_player(&mut self, player_id: u32) -> Result<Player, GameError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        let player = self.players.remove(idx);
        if self.dealer == Some(player_id) {
            self.dealer = None;
            self.dealer_seat = player.seat;
        }
        Ok(player)
    }

    pub fn player(&self, player_id: u32) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(GameError::PlayerNotFound(player_id))
    }

    pub fn player_mut(&mut self, player_id: u32) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(GameError::PlayerNotFound(player_id))
    }

    #[must_use]
    pub fn exist_player(&self, player_id: u32) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Seated players in seat order.
    #[must_use]
    pub fn seats(&self) -> Vec<&Player> {
        let mut seated: Vec<&Player> = self.players.iter().filter(|p| p.seat.is_some()).collect();
        seated.sort_by_key(|p| p.seat);
        seated
    }

    /// Re-keys a player everywhere the game refers to it.
    pub fn rename_player(&mut self, old_id: u32, new_id: u32) -> Result<(), GameError> {
        if old_id != new_id && self.exist_player(new_id) {
            return Err(GameError::DuplicatePlayer(new_id));
        }
        self.player_mut(old_id)?.id = new_id;
        for id in [&mut self.my_id]
            .into_iter()
            .chain(self.dealer.as_mut())
            .chain(self.admin_player_id.as_mut())
        {
            if *id == old_id {
                *id = new_id;
            }
        }
        for action in self.rounds.iter_mut().flat_map(|r| r.actions.iter_mut()) {
            if action.player_id == old_id {
                action.player_id = new_id;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn dealer(&self) -> Option<&Player> {
        self.dealer.and_then(|id| self.players.iter().find(|p| p.id == id))
    }

    pub fn set_dealer(&mut self, player_id: u32) -> Result<(), GameError> {
        if !self.exist_player(player_id) {
            return Err(GameError::PlayerNotFound(player_id));
        }
        self.dealer = Some(player_id);
        self.dealer_seat = None;
        Ok(())
    }

    /// Starts a game over: the server placed the button on `dealer_id` and
    /// has dealt `hands_dealt` hands so far (zero unless rejoining).
    pub fn start_game(&mut self, dealer_id: u32, hands_dealt: u32) -> Result<(), GameError> {
        self.set_dealer(dealer_id)?;
        self.rounds.clear();
        self.highest_set = 0;
        self.minimum_raise = 0;
        self.pocket_cards = None;
        self.hand_num = hands_dealt.saturating_add(1);
        Ok(())
    }

    // === Rounds ===

    /// Whether `round` has already been played (or is being played) this hand.
    #[must_use]
    pub fn exist_round(&self, round: Round) -> bool {
        round.position() < self.rounds.len()
    }

    /// Appends the next round in the fixed order and resets the betting
    /// trackers.
    pub fn add_round(&mut self, round: Round, cards: Vec<Card>) -> Result<(), GameError> {
        let position = round.position();
        let count = self.rounds.len();
        if position < count {
            return Err(GameError::RoundExists(round));
        }
        if position > count {
            return Err(GameError::RoundOutOfOrder {
                round,
                expected: Round::ALL[count],
            });
        }
        self.rounds.push(RoundInfo::new(round, cards));
        self.highest_set = 0;
        self.minimum_raise = 0;
        Ok(())
    }

    /// Makes `round` the current round if the server has moved on to it,
    /// adding the rounds in between without board cards.
    ///
    /// Entering PREFLOP from the blinds keeps the highest set and minimum
    /// raise, since the blinds are the stakes to call. Rounds that already
    /// exist are left alone.
    pub fn ensure_round(&mut self, round: Round) -> Result<(), GameError> {
        if self.exist_round(round) {
            return Ok(());
        }
        let carried = (self.highest_set, self.minimum_raise);
        let from_blinds = self.rounds.last().is_some_and(|r| r.round.is_blind());
        for next in &Round::ALL[self.rounds.len()..=round.position()] {
            self.add_round(*next, Vec::new())?;
        }
        if round == Round::Preflop && from_blinds {
            (self.highest_set, self.minimum_raise) = carried;
        }
        Ok(())
    }

    #[must_use]
    pub fn rounds(&self) -> &[RoundInfo] {
        &self.rounds
    }

    pub fn round_info(&self, round: Round) -> Result<&RoundInfo, GameError> {
        self.rounds
            .get(round.position())
            .ok_or(GameError::RoundNotPlayed(round))
    }

    pub fn round_info_mut(&mut self, round: Round) -> Result<&mut RoundInfo, GameError> {
        self.rounds
            .get_mut(round.position())
            .ok_or(GameError::RoundNotPlayed(round))
    }

    pub fn current_round(&self) -> Result<&RoundInfo, GameError> {
        self.rounds.last().ok_or(GameError::NoRound)
    }

    pub fn current_round_mut(&mut self) -> Result<&mut RoundInfo, GameError> {
        self.rounds.last_mut().ok_or(GameError::NoRound)
    }

    fn current_betting_round(&self, operation: &'static str) -> Result<&RoundInfo, GameError> {
        let current = self.current_round()?;
        if current.round.is_blind() {
            return Err(GameError::BlindRound { operation });
        }
        Ok(current)
    }

    /// PREFLOP always has a bet in the form of the big blind; later rounds
    /// have one once somebody bet.
    pub fn is_bet_placed(&self) -> Result<bool, GameError> {
        let current = self.current_betting_round("is_bet_placed")?;
        if current.round == Round::Preflop {
            return Ok(true);
        }
        Ok(current.actions.iter().any(|a| a.kind == Action::Bet))
    }

    /// Highest single stake among the current round's actions.
    pub fn current_bet(&self) -> Result<u32, GameError> {
        let current = self.current_betting_round("current_bet")?;
        Ok(current
            .actions
            .iter()
            .filter_map(|a| a.chips)
            .max()
            .unwrap_or(0))
    }

    // === Actions ===

    pub fn add_action(
        &mut self,
        player_id: u32,
        kind: Action,
        chips: Option<u32>,
    ) -> Result<(), GameError> {
        if !self.exist_player(player_id) {
            return Err(GameError::PlayerNotFound(player_id));
        }
        self.current_round_mut()?
            .actions
            .push(ActionInfo::new(player_id, kind, chips));
        Ok(())
    }

    /// Actions in the order they were recorded, optionally restricted to one
    /// player and to a set of rounds (all rounds so far by default).
    pub fn get_actions(
        &self,
        player_id: Option<u32>,
        rounds: Option<&[Round]>,
    ) -> Result<Vec<&ActionInfo>, GameError> {
        if let Some(id) = player_id {
            self.player(id)?;
        }
        let selected: Vec<&RoundInfo> = match rounds {
            Some(rounds) => rounds
                .iter()
                .map(|r| {
                    self.rounds
                        .get(r.position())
                        .ok_or(GameError::RoundNotPlayed(*r))
                })
                .collect::<Result<_, _>>()?,
            None => self.rounds.iter().collect(),
        };
        Ok(selected
            .into_iter()
            .flat_map(|r| r.actions.iter())
            .filter(|a| player_id.is_none_or(|id| a.player_id == id))
            .collect())
    }

    /// This client's stake in the current betting round: its last action
    /// amount, where PREFLOP also counts the blinds it posted.
    pub fn my_bet(&self) -> Result<u32, GameError> {
        let current = self.current_betting_round("my_bet")?.round;
        let preflop = [Round::SmallBlind, Round::BigBlind, Round::Preflop];
        let rounds: &[Round] = if current == Round::Preflop {
            &preflop
        } else {
            std::slice::from_ref(&current)
        };
        let actions = self.get_actions(Some(self.my_id), Some(rounds))?;
        Ok(actions.iter().rev().find_map(|a| a.chips).unwrap_or(0))
    }

    // === Hands ===

    /// Resets the ledger to a fresh SMALL_BLIND round. From the second hand
    /// on the dealer button moves to the next occupied seat.
    ///
    /// The ledger is reset even when the button cannot be moved; the error
    /// is returned afterwards and the dealer is left unknown.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        let next_dealer = (self.hand_num > 1).then(|| self.next_dealer());
        self.reset_hand();
        match next_dealer {
            Some(Ok(dealer)) => self.set_dealer(dealer),
            Some(Err(e)) => Err(e),
            None => Ok(()),
        }
    }

    /// Like [`Game::start_new_hand`], but the server named the dealer so the
    /// button is placed instead of moved.
    pub fn start_new_hand_with_dealer(&mut self, dealer_id: u32) -> Result<(), GameError> {
        self.reset_hand();
        self.set_dealer(dealer_id)
    }

    /// Number of hands dealt so far, which is also the wire number of the
    /// hand in progress.
    #[must_use]
    pub const fn hands_started(&self) -> u32 {
        self.hand_num - 1
    }

    fn reset_hand(&mut self) {
        self.rounds = vec![RoundInfo::new(Round::SmallBlind, Vec::new())];
        self.highest_set = 0;
        self.minimum_raise = 0;
        self.pocket_cards = None;
        self.hand_num += 1;
    }

    /// First occupied seat after the button, wrapping around.
    fn next_dealer(&self) -> Result<u32, GameError> {
        let button = match self.dealer {
            Some(dealer) => self
                .player(dealer)?
                .seat
                .ok_or(GameError::DealerNotSeated(dealer))?,
            None => self.dealer_seat.ok_or(GameError::NoDealer)?,
        };
        let seats = self.seats();
        seats
            .iter()
            .find(|p| p.seat.is_some_and(|seat| seat > button))
            .or_else(|| seats.first())
            .map(|p| p.id)
            .ok_or(GameError::NoDealer)
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.game_id == other.game_id
    }
}

impl Eq for Game {}
