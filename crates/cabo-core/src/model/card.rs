use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use std::hash::{Hash, Hasher};

/// Special interaction granted by the middle ranks: 7-8 peek, 9-10 spy,
/// 11-12 switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Peek,
    Spy,
    Switch,
}

impl ActionKind {
    pub const fn from_rank(rank: Rank) -> Option<Self> {
        match rank.value() {
            7 | 8 => Some(ActionKind::Peek),
            9 | 10 => Some(ActionKind::Spy),
            11 | 12 => Some(ActionKind::Switch),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Peek => "peek",
            ActionKind::Spy => "spy",
            ActionKind::Switch => "switch",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    face_up: bool,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    pub const fn action_kind(self) -> Option<ActionKind> {
        ActionKind::from_rank(self.rank)
    }

    pub const fn is_king_of_diamonds(self) -> bool {
        matches!(self.rank, Rank::King) && matches!(self.suit, Suit::Diamonds)
    }

    /// Scoring value: the rank, except the King of Diamonds which counts -1.
    pub const fn score_value(self) -> i32 {
        if self.is_king_of_diamonds() {
            -1
        } else {
            self.rank.value() as i32
        }
    }

    pub const fn is_face_up(self) -> bool {
        self.face_up
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}

// Identity is rank and suit; orientation is table state and never
// distinguishes two cards.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
