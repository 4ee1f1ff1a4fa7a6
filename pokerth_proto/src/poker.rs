//! Card encoding plus the action and round enumerations shared by the
//! game ledger and the wire schema.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Number of distinct cards in a deck.
pub const DECK_SIZE: u8 = 52;

#[derive(Debug, Eq, Error, PartialEq)]
pub enum CardError {
    #[error("invalid card string {0:?}")]
    InvalidString(String),
    #[error("card index {0} out of range (0..52)")]
    InvalidIndex(u32),
}

#[derive(Debug, Eq, Error, PartialEq)]
#[error("unknown game state {0}")]
pub struct UnknownGameState(pub u32);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Diamond,
    Heart,
    Spade,
    Club,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Diamond, Self::Heart, Self::Spade, Self::Club];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Heart => 'h',
            Self::Spade => 's',
            Self::Club => 'c',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Diamond),
            'h' => Some(Self::Heart),
            's' => Some(Self::Spade),
            'c' => Some(Self::Club),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Card rank, deuce low and ace high.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '2' => Some(Self::Two),
            '3' => Some(Self::Three),
            '4' => Some(Self::Four),
            '5' => Some(Self::Five),
            '6' => Some(Self::Six),
            '7' => Some(Self::Seven),
            '8' => Some(Self::Eight),
            '9' => Some(Self::Nine),
            'T' => Some(Self::Ten),
            'J' => Some(Self::Jack),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            'A' => Some(Self::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A playing card. On the wire a card is the integer
/// `suit_index * 13 + rank_index`, so `2d` is 0 and `Ac` is 51.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub const fn to_int(self) -> u32 {
        (self.suit.index() as u32) * 13 + self.rank.index() as u32
    }

    pub fn from_int(value: u32) -> Result<Self, CardError> {
        if value >= u32::from(DECK_SIZE) {
            return Err(CardError::InvalidIndex(value));
        }
        let suit = Suit::ALL[(value / 13) as usize];
        let rank = Rank::ALL[(value % 13) as usize];
        Ok(Self { rank, suit })
    }

    /// All 52 cards in wire index order.
    pub fn deck() -> impl Iterator<Item = Self> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Self { rank, suit }))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => match (Rank::from_char(r), Suit::from_char(c)) {
                (Some(rank), Some(suit)) => Ok(Self { rank, suit }),
                _ => Err(CardError::InvalidString(s.to_string())),
            },
            _ => Err(CardError::InvalidString(s.to_string())),
        }
    }
}

impl From<Card> for u32 {
    fn from(value: Card) -> Self {
        value.to_int()
    }
}

impl TryFrom<u32> for Card {
    type Error = CardError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_int(value)
    }
}

/// A player action. The discriminants are the wire values of
/// `NetPlayerAction` and must not be reassigned.
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum Action {
    #[default]
    None = 0,
    Fold = 1,
    Check = 2,
    Call = 3,
    Bet = 4,
    Raise = 5,
    AllIn = 6,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::None => "none",
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Bet => "bet",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr}")
    }
}

/// A poker round, including the blind postings as pseudo-rounds. The
/// discriminant is the position in the only valid progression. On the wire
/// a round is a `NetGameState`, which numbers PREFLOP first and the blinds
/// last.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "u32", try_from = "u32")]
#[repr(u32)]
pub enum Round {
    #[default]
    SmallBlind = 0,
    BigBlind = 1,
    Preflop = 2,
    Flop = 3,
    Turn = 4,
    River = 5,
}

impl Round {
    /// Rounds in their fixed order.
    pub const ALL: [Self; 6] = [
        Self::SmallBlind,
        Self::BigBlind,
        Self::Preflop,
        Self::Flop,
        Self::Turn,
        Self::River,
    ];

    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// `NetGameState` value of this round.
    #[must_use]
    pub const fn wire_value(self) -> u32 {
        match self {
            Self::Preflop => 0,
            Self::Flop => 1,
            Self::Turn => 2,
            Self::River => 3,
            Self::SmallBlind => 4,
            Self::BigBlind => 5,
        }
    }

    #[must_use]
    pub const fn from_wire_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Preflop),
            1 => Some(Self::Flop),
            2 => Some(Self::Turn),
            3 => Some(Self::River),
            4 => Some(Self::SmallBlind),
            5 => Some(Self::BigBlind),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_blind(self) -> bool {
        matches!(self, Self::SmallBlind | Self::BigBlind)
    }

    /// Number of board cards revealed when this round starts.
    #[must_use]
    pub const fn board_cards(self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn | Self::River => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallBlind => "SMALL_BLIND",
            Self::BigBlind => "BIG_BLIND",
            Self::Preflop => "PREFLOP",
            Self::Flop => "FLOP",
            Self::Turn => "TURN",
            Self::River => "RIVER",
        }
    }
}

impl From<Round> for u32 {
    fn from(round: Round) -> Self {
        round.wire_value()
    }
}

impl TryFrom<u32> for Round {
    type Error = UnknownGameState;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_wire_value(value).ok_or(UnknownGameState(value))
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Card Tests ===

    #[test]
    fn test_card_to_int_known_values() {
        let results = [
            ("2d", 0),
            ("Ad", 12),
            ("2h", 13),
            ("Ah", 25),
            ("2s", 26),
            ("As", 38),
            ("2c", 39),
            ("Ac", 51),
        ];
        for (repr, index) in results {
            let card: Card = repr.parse().unwrap();
            assert_eq!(card.to_int(), index);
            assert_eq!(Card::from_int(index).unwrap().to_string(), repr);
        }
    }

    #[test]
    fn test_card_bijection_over_deck() {
        let deck: Vec<Card> = Card::deck().collect();
        assert_eq!(deck.len(), DECK_SIZE as usize);
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.to_int(), i as u32);
            assert_eq!(Card::from_int(card.to_int()).unwrap(), *card);
        }
        for i in 0..u32::from(DECK_SIZE) {
            assert_eq!(Card::from_int(i).unwrap().to_int(), i);
        }
    }

    #[test]
    fn test_card_from_int_out_of_range() {
        assert_eq!(Card::from_int(52), Err(CardError::InvalidIndex(52)));
    }

    #[test]
    fn test_card_from_str_invalid() {
        for repr in ["", "A", "1d", "Ax", "Adh", "ad"] {
            assert!(repr.parse::<Card>().is_err(), "{repr:?} should not parse");
        }
    }

    // === Round Tests ===

    #[test]
    fn test_round_order_matches_positions() {
        for (i, round) in Round::ALL.iter().enumerate() {
            assert_eq!(round.position(), i);
            assert_eq!(Round::from_position(i), Some(*round));
        }
        assert_eq!(Round::from_position(6), None);
        assert!(Round::SmallBlind < Round::River);
    }

    #[test]
    fn test_round_blind_and_board_cards() {
        assert!(Round::SmallBlind.is_blind());
        assert!(Round::BigBlind.is_blind());
        assert!(!Round::Preflop.is_blind());
        assert_eq!(Round::Preflop.board_cards(), 0);
        assert_eq!(Round::Flop.board_cards(), 3);
        assert_eq!(Round::Turn.board_cards(), 1);
        assert_eq!(Round::River.board_cards(), 1);
    }

    #[test]
    fn test_round_wire_values() {
        assert_eq!(u32::from(Round::Preflop), 0);
        assert_eq!(u32::from(Round::River), 3);
        assert_eq!(u32::from(Round::SmallBlind), 4);
        assert_eq!(u32::from(Round::BigBlind), 5);
        for round in Round::ALL {
            assert_eq!(Round::try_from(round.wire_value()), Ok(round));
        }
        assert_eq!(Round::try_from(6), Err(UnknownGameState(6)));
        assert_eq!(serde_json::to_string(&Round::Flop).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Round>("5").unwrap(), Round::BigBlind);
        assert!(serde_json::from_str::<Round>("9").is_err());
    }

    #[test]
    fn test_round_names() {
        assert_eq!(Round::SmallBlind.to_string(), "SMALL_BLIND");
        assert_eq!(Round::River.name(), "RIVER");
    }

    // === Action Tests ===

    #[test]
    fn test_action_wire_values() {
        assert_eq!(Action::None as u32, 0);
        assert_eq!(Action::Bet as u32, 4);
        assert_eq!(Action::AllIn as u32, 6);
        assert_eq!(Action::AllIn.to_string(), "all-in");
    }
}
