mod heuristic;

pub use heuristic::HeuristicPolicy;

use cabo_core::belief::CardKnowledge;
use cabo_core::model::card::Card;
use cabo_core::model::hand::Hand;
use cabo_core::model::player::Seat;

/// Context provided to policies for a single decision. The target seat is
/// the designated opponent for spy and switch actions.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub drawn: Option<Card>,
    pub knowledge: &'a CardKnowledge,
    pub target_seat: Seat,
    pub target_hand: &'a Hand,
    pub cabo_declared: bool,
}

/// Decision interface for a computer seat's turn.
pub trait Policy: Send {
    /// Own slot to replace with the drawn card, or None to keep the hand.
    fn choose_swap(&mut self, ctx: &PolicyContext) -> Option<usize>;

    /// Own slot to peek at; None wastes the action.
    fn choose_peek(&mut self, ctx: &PolicyContext) -> Option<usize>;

    /// Target-seat slot to spy on; None wastes the action.
    fn choose_spy(&mut self, ctx: &PolicyContext) -> Option<usize>;

    /// (own slot, target slot) pair to switch.
    fn choose_switch(&mut self, ctx: &PolicyContext) -> (usize, usize);

    /// Whether to declare Cabo at the end of this turn.
    fn wants_cabo(&mut self, ctx: &PolicyContext) -> bool;
}
