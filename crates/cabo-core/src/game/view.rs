use crate::game::engine::{GameEngine, GameResult};
use crate::model::card::Card;
use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotView {
    pub rank: u8,
    pub suit: String,
    pub face_up: bool,
}

impl SlotView {
    fn from_card(card: &Card) -> Self {
        SlotView {
            rank: card.rank.value(),
            suit: card.suit.name().to_string(),
            face_up: card.is_face_up(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatView {
    pub name: String,
    pub is_computer: bool,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlagsView {
    pub draw: bool,
    pub swap: bool,
    pub declare_cabo: bool,
    pub use_action: Option<String>,
    pub end_turn: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeView {
    pub scores: [i32; 4],
    pub winner: Option<String>,
    pub tie: bool,
}

/// One-way snapshot of the engine's query surface, handed to the
/// presentation collaborator. The collaborator decides card-back versus face
/// art from the per-slot face-up flag; nothing here restores engine state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableView {
    pub current_player: String,
    pub seats: Vec<SeatView>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub discard_top: Option<SlotView>,
    pub drawn_card: Option<SlotView>,
    pub messages: Vec<String>,
    pub game_over: bool,
    pub outcome: Option<OutcomeView>,
    pub commands: FlagsView,
}

impl TableView {
    pub fn capture(engine: &GameEngine) -> Self {
        let seats = Seat::LOOP
            .iter()
            .copied()
            .map(|seat| {
                let player = engine.player(seat);
                SeatView {
                    name: player.name().to_string(),
                    is_computer: player.is_computer(),
                    slots: player.hand().iter().map(SlotView::from_card).collect(),
                }
            })
            .collect();

        let flags = engine.command_flags();
        let outcome = engine.outcome().map(|outcome| OutcomeView {
            scores: outcome.scores,
            winner: match outcome.result {
                GameResult::Winner(seat) => Some(engine.player(seat).name().to_string()),
                GameResult::Tie => None,
            },
            tie: matches!(outcome.result, GameResult::Tie),
        });

        TableView {
            current_player: engine.current_player().name().to_string(),
            seats,
            deck_size: engine.deck_len(),
            discard_size: engine.discard_len(),
            discard_top: engine.discard_top().map(SlotView::from_card),
            drawn_card: engine.drawn_card().map(SlotView::from_card),
            messages: engine.log().iter().map(str::to_string).collect(),
            game_over: engine.is_game_over(),
            outcome,
            commands: FlagsView {
                draw: flags.draw,
                swap: flags.swap,
                declare_cabo: flags.declare_cabo,
                use_action: flags.use_action.map(|kind| kind.as_str().to_string()),
                end_turn: flags.end_turn,
            },
        }
    }

    pub fn to_json(engine: &GameEngine) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::TableView;
    use crate::game::engine::GameEngine;

    #[test]
    fn capture_mirrors_the_fresh_table() {
        let engine = GameEngine::with_seed(3);
        let view = TableView::capture(&engine);

        assert_eq!(view.current_player, "Cyntra");
        assert_eq!(view.seats.len(), 4);
        assert!(view.seats.iter().all(|seat| seat.slots.len() == 4));
        assert_eq!(view.deck_size, 36);
        assert_eq!(view.discard_size, 0);
        assert!(view.discard_top.is_none());
        assert!(view.drawn_card.is_none());
        assert!(!view.game_over);
        assert!(view.outcome.is_none());
        assert!(view.commands.draw && view.commands.declare_cabo);
    }

    #[test]
    fn view_serializes_to_json() {
        let engine = GameEngine::with_seed(3);
        let json = TableView::to_json(&engine).unwrap();
        assert!(json.contains("\"current_player\": \"Cyntra\""));
        assert!(json.contains("\"deck_size\": 36"));
        assert!(json.contains("\"messages\""));
    }

    #[test]
    fn drawn_card_appears_in_the_view() {
        let mut engine = GameEngine::with_seed(3);
        engine.draw_from_deck();
        let view = TableView::capture(&engine);
        let drawn = view.drawn_card.expect("a card was drawn");
        assert!(drawn.face_up);
        assert_eq!(view.deck_size, 35);
    }
}
