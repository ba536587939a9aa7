use cabo_core::game::engine::{ActionState, GameEngine};
use cabo_core::model::card::{ActionKind, Card};
use cabo_core::model::hand::Hand;
use cabo_core::model::player::Seat;
use cabo_core::model::rank::Rank;
use cabo_core::model::stack::CardStack;
use cabo_core::model::suit::Suit;
use std::collections::HashSet;

fn hand_of(cards: [(Rank, Suit); 4]) -> Hand {
    let mut hand = Hand::new();
    for (rank, suit) in cards {
        hand.add(Card::new(rank, suit)).unwrap();
    }
    hand
}

fn crafted_hands() -> [Hand; 4] {
    [
        hand_of([
            (Rank::Two, Suit::Clubs),
            (Rank::Three, Suit::Clubs),
            (Rank::Four, Suit::Clubs),
            (Rank::Five, Suit::Clubs),
        ]),
        hand_of([
            (Rank::Two, Suit::Diamonds),
            (Rank::Three, Suit::Diamonds),
            (Rank::Four, Suit::Diamonds),
            (Rank::Five, Suit::Diamonds),
        ]),
        hand_of([
            (Rank::Two, Suit::Hearts),
            (Rank::Three, Suit::Hearts),
            (Rank::Four, Suit::Hearts),
            (Rank::Five, Suit::Hearts),
        ]),
        hand_of([
            (Rank::Two, Suit::Spades),
            (Rank::Three, Suit::Spades),
            (Rank::Four, Suit::Spades),
            (Rank::Five, Suit::Spades),
        ]),
    ]
}

/// Every card on the table, by identity.
fn all_cards(engine: &GameEngine) -> Vec<Card> {
    let mut cards: Vec<Card> = Vec::new();
    cards.extend(engine.deck().cards().iter().copied());
    cards.extend(engine.discard().cards().iter().copied());
    for seat in Seat::LOOP.iter().copied() {
        cards.extend(engine.player(seat).hand().iter().copied());
    }
    cards.extend(engine.drawn_card().copied());
    cards
}

fn assert_full_deck_identity(engine: &GameEngine) {
    let cards = all_cards(engine);
    assert_eq!(cards.len(), 52);
    let unique: HashSet<Card> = cards.into_iter().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn spy_flow_reveals_discards_and_leaves_only_end_turn() {
    let nine = Card::new(Rank::Nine, Suit::Spades);
    let mut engine = GameEngine::from_hands(crafted_hands(), CardStack::from_cards(vec![nine]));

    engine.draw_from_deck();
    engine.begin_action(ActionKind::Spy);
    assert_eq!(engine.action_state(), ActionState::Spying);

    engine.select_other_slot(Seat::South, 1);

    assert!(engine.player(Seat::South).hand().card(1).unwrap().is_face_up());
    assert_eq!(engine.discard_top(), Some(&nine));
    assert!(engine.drawn_card().is_none());
    assert_eq!(engine.action_state(), ActionState::Idle);

    let flags = engine.command_flags();
    assert!(flags.end_turn);
    assert!(!flags.draw && !flags.swap && !flags.declare_cabo);
    assert_eq!(flags.use_action, None);
}

#[test]
fn spy_selection_on_the_own_hand_is_ignored() {
    let nine = Card::new(Rank::Nine, Suit::Spades);
    let mut engine = GameEngine::from_hands(crafted_hands(), CardStack::from_cards(vec![nine]));

    engine.draw_from_deck();
    engine.begin_action(ActionKind::Spy);
    let lines = engine.log().len();

    engine.select_other_slot(Seat::North, 1);

    assert_eq!(engine.action_state(), ActionState::Spying);
    assert!(engine.drawn_card().is_some());
    assert_eq!(engine.log().len(), lines);
    assert!(!engine.player(Seat::North).hand().card(1).unwrap().is_face_up());
}

#[test]
fn drawing_from_an_exhausted_deck_ends_the_game() {
    let mut engine = GameEngine::from_hands(crafted_hands(), CardStack::new());
    let before: Vec<Vec<Card>> = Seat::LOOP
        .iter()
        .map(|seat| engine.player(*seat).hand().cards().to_vec())
        .collect();

    engine.draw_from_deck();

    assert!(engine.is_game_over());
    assert!(engine.outcome().is_some());
    for (index, seat) in Seat::LOOP.iter().enumerate() {
        assert_eq!(engine.player(*seat).hand().cards(), &before[index][..]);
    }
}

#[test]
fn cabo_round_ends_exactly_on_the_wrap_to_the_declarer() {
    let deck = CardStack::from_cards(vec![Card::new(Rank::Six, Suit::Clubs)]);
    let mut engine = GameEngine::from_hands(crafted_hands(), deck);

    engine.declare_cabo();
    assert_eq!(engine.cabo_declarer(), Some(Seat::North));

    engine.advance_turn();
    engine.advance_turn();
    assert!(!engine.is_game_over());
    engine.advance_turn();
    assert!(engine.is_game_over());
    assert_eq!(engine.current_seat(), Seat::North);
}

#[test]
fn card_identities_survive_a_full_seeded_game_of_mixed_commands() {
    let mut engine = GameEngine::with_seed(2024);
    assert_full_deck_identity(&engine);

    for _ in 0..8 {
        engine.draw_from_deck();
        if engine.is_game_over() {
            break;
        }
        match engine.drawn_card().and_then(|card| card.action_kind()) {
            Some(ActionKind::Peek) => {
                engine.begin_action(ActionKind::Peek);
                engine.select_own_slot(3);
            }
            Some(ActionKind::Spy) => {
                engine.begin_action(ActionKind::Spy);
                engine.select_other_slot(Seat::East, 2);
            }
            Some(ActionKind::Switch) => {
                engine.begin_action(ActionKind::Switch);
                engine.select_own_slot(0);
                engine.select_other_slot(Seat::South, 1);
            }
            None => {
                engine.begin_swap();
                engine.select_own_slot(1);
            }
        }
        assert_full_deck_identity(&engine);
        engine.end_turn();

        // walk the computer seats back around to the human
        engine.advance_turn();
        engine.advance_turn();
        engine.advance_turn();
        assert_full_deck_identity(&engine);
    }

    assert_full_deck_identity(&engine);
}

#[test]
fn swap_command_moves_the_drawn_card_into_the_hand() {
    let six = Card::new(Rank::Six, Suit::Spades);
    let mut engine = GameEngine::from_hands(crafted_hands(), CardStack::from_cards(vec![six]));

    engine.draw_from_deck();
    engine.begin_swap();
    engine.select_own_slot(2);

    assert_eq!(engine.player(Seat::North).hand().card(2), Some(&six));
    assert_eq!(engine.discard_top(), Some(&Card::new(Rank::Four, Suit::Clubs)));
    assert!(engine.drawn_card().is_none());

    let flags = engine.command_flags();
    assert!(flags.end_turn && !flags.draw && !flags.swap);
}

#[test]
fn message_log_never_exceeds_fifteen_lines() {
    let mut engine = GameEngine::with_seed(77);
    for _ in 0..12 {
        engine.draw_from_deck();
        engine.end_turn();
        engine.advance_turn();
        engine.advance_turn();
        engine.advance_turn();
        if engine.is_game_over() {
            break;
        }
    }
    assert!(engine.log().len() <= 15);
}
