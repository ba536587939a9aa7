use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Ordered, last-in-first-out pile of cards. Both the deck and the discard
/// pile are plain stacks; hands add indexed access on top (see `hand.rs`).
#[derive(Debug, Clone, Default)]
pub struct CardStack {
    cards: Vec<Card>,
}

impl CardStack {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// All 13 ranks of all 4 suits, unshuffled.
    pub fn full_deck() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ORDERED.iter().copied() {
            for suit in Suit::ALL.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::full_deck();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes and returns the top card. Empty means the deck ran dry (the
    /// game-over trigger) or the caller broke a discard-pile invariant.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::CardStack;
    use crate::model::card::{ActionKind, Card};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn full_deck_has_52_cards_13_per_suit() {
        let deck = CardStack::full_deck();
        assert_eq!(deck.len(), 52);
        for suit in Suit::ALL.iter().copied() {
            let count = deck.cards().iter().filter(|card| card.suit == suit).count();
            assert_eq!(count, 13, "{suit} should appear 13 times");
        }
    }

    #[test]
    fn full_deck_has_8_cards_per_action_kind() {
        let deck = CardStack::full_deck();
        for kind in [ActionKind::Peek, ActionKind::Spy, ActionKind::Switch] {
            let count = deck
                .cards()
                .iter()
                .filter(|card| card.action_kind() == Some(kind))
                .count();
            assert_eq!(count, 8, "{kind} should appear 8 times");
        }
    }

    #[test]
    fn full_deck_has_exactly_one_king_of_diamonds() {
        let deck = CardStack::full_deck();
        let count = deck
            .cards()
            .iter()
            .filter(|card| card.is_king_of_diamonds())
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn pop_returns_cards_in_reverse_push_order() {
        let mut stack = CardStack::new();
        stack.push(Card::new(Rank::Two, Suit::Clubs));
        stack.push(Card::new(Rank::Three, Suit::Hearts));
        assert_eq!(stack.top(), Some(&Card::new(Rank::Three, Suit::Hearts)));
        assert_eq!(stack.pop(), Some(Card::new(Rank::Three, Suit::Hearts)));
        assert_eq!(stack.pop(), Some(Card::new(Rank::Two, Suit::Clubs)));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = CardStack::shuffled_with_seed(42);
        let deck_b = CardStack::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = CardStack::shuffled_with_seed(1);
        let deck_b = CardStack::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }
}
