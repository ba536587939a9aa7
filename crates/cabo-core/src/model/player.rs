use crate::belief::CardKnowledge;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

/// One participant: a name, a seat, a hand, and (for computer seats) the
/// belief table driving its decisions. Composition replaces the usual
/// human/computer subclassing.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    seat: Seat,
    hand: Hand,
    knowledge: Option<CardKnowledge>,
}

impl Player {
    pub fn human(name: &str, seat: Seat) -> Self {
        Self {
            name: name.to_string(),
            seat,
            hand: Hand::new(),
            knowledge: None,
        }
    }

    pub fn computer(name: &str, seat: Seat) -> Self {
        Self {
            name: name.to_string(),
            seat,
            hand: Hand::new(),
            knowledge: Some(CardKnowledge::new(seat)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_computer(&self) -> bool {
        self.knowledge.is_some()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    pub fn knowledge(&self) -> Option<&CardKnowledge> {
        self.knowledge.as_ref()
    }

    pub fn knowledge_mut(&mut self) -> Option<&mut CardKnowledge> {
        self.knowledge.as_mut()
    }
}
