use crate::model::card::Card;
use core::fmt;

pub const HAND_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    Full,
    SlotOutOfRange(usize),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Full => write!(f, "hand already holds {HAND_SIZE} cards"),
            HandError::SlotOutOfRange(slot) => write!(f, "slot {slot} is outside the hand"),
        }
    }
}

impl std::error::Error for HandError {}

/// Four index-addressable slots. Filled once during the deal; afterwards a
/// slot only ever changes through single-card replacement.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }

    pub fn add(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() == HAND_SIZE {
            return Err(HandError::Full);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Replaces a slot's card and returns the displaced one.
    pub fn replace(&mut self, slot: usize, card: Card) -> Result<Card, HandError> {
        let target = self
            .cards
            .get_mut(slot)
            .ok_or(HandError::SlotOutOfRange(slot))?;
        Ok(std::mem::replace(target, card))
    }

    pub fn card(&self, slot: usize) -> Option<&Card> {
        self.cards.get(slot)
    }

    pub fn set_face_up(&mut self, slot: usize, face_up: bool) -> Result<(), HandError> {
        let card = self
            .cards
            .get_mut(slot)
            .ok_or(HandError::SlotOutOfRange(slot))?;
        card.set_face_up(face_up);
        Ok(())
    }

    pub fn conceal_all(&mut self) {
        for card in &mut self.cards {
            card.set_face_up(false);
        }
    }

    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.set_face_up(true);
        }
    }

    pub fn total_score(&self) -> i32 {
        self.cards.iter().map(|card| card.score_value()).sum()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
