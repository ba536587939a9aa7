use crate::policy::{HeuristicPolicy, Policy, PolicyContext};
use cabo_core::game::engine::GameEngine;
use cabo_core::model::card::{ActionKind, Card};
use cabo_core::model::player::Seat;
use tracing::{Level, event};

/// Wraps the engine plus one policy per computer seat, forwarding the human
/// command surface. After any command that can advance the turn, computer
/// turns run synchronously until control is back on a human seat or the
/// game is over, so a human command can never interleave with one.
pub struct GameSession {
    engine: GameEngine,
    bots: [Option<Box<dyn Policy>>; 4],
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_engine(GameEngine::with_seed(seed), seed)
    }

    /// Attaches heuristic policies to whichever seats the engine marks as
    /// computers; `seed` keeps their randomness reproducible.
    pub fn from_engine(engine: GameEngine, seed: u64) -> Self {
        let bots = std::array::from_fn(|index| {
            let seat = Seat::from_index(index).expect("seat index in range");
            if engine.player(seat).is_computer() {
                let policy: Box<dyn Policy> =
                    Box::new(HeuristicPolicy::with_seed(seed.wrapping_add(index as u64 + 1)));
                Some(policy)
            } else {
                None
            }
        });
        let mut session = Self { engine, bots };
        session.run_computer_turns();
        session
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn draw_from_deck(&mut self) {
        self.engine.draw_from_deck();
    }

    pub fn begin_swap(&mut self) {
        self.engine.begin_swap();
    }

    pub fn begin_action(&mut self, kind: ActionKind) {
        self.engine.begin_action(kind);
    }

    pub fn select_own_slot(&mut self, slot: usize) {
        self.engine.select_own_slot(slot);
    }

    pub fn select_other_slot(&mut self, seat: Seat, slot: usize) {
        self.engine.select_other_slot(seat, slot);
    }

    pub fn declare_cabo(&mut self) {
        self.engine.declare_cabo();
        self.run_computer_turns();
    }

    pub fn end_turn(&mut self) {
        self.engine.end_turn();
        self.run_computer_turns();
    }

    fn run_computer_turns(&mut self) {
        while !self.engine.is_game_over() && self.engine.current_player().is_computer() {
            let index = self.engine.current_seat().index();
            let Some(bot) = self.bots[index].as_mut() else {
                break;
            };
            run_computer_turn(&mut self.engine, bot.as_mut());
        }
    }
}

/// One full computer turn: draw, swap-or-act-or-discard, maybe declare,
/// advance. Runs to completion before returning.
pub fn run_computer_turn(engine: &mut GameEngine, policy: &mut dyn Policy) {
    let seat = engine.current_seat();
    let name = engine.player(seat).name().to_string();
    engine.set_status(format!("{name} is taking their turn."));

    let Some(drawn) = engine.take_draw() else {
        return;
    };

    let target_seat = designated_target(engine);

    let swap_slot = policy.choose_swap(&decision_ctx(engine, seat, Some(drawn), target_seat));
    if let Some(slot) = swap_slot {
        engine.swap_drawn_into(slot);
        if let Some(knowledge) = engine.knowledge_mut(seat) {
            knowledge.record(seat, slot);
        }
        engine.set_status(format!(
            "{name} swapped the drawn card with card {} in their hand.",
            slot + 1
        ));
    } else if let Some(kind) = drawn.action_kind() {
        engine.set_status(format!("{name} uses an action card: {kind}"));
        perform_action(engine, policy, seat, target_seat, kind);
        engine.discard_drawn();
    } else {
        engine.set_status(format!("{name} discarded the drawn card: {drawn}"));
        engine.discard_drawn();
    }

    let declare = policy.wants_cabo(&decision_ctx(engine, seat, None, target_seat));
    if declare {
        engine.record_cabo();
    }
    engine.advance_turn();
}

fn perform_action(
    engine: &mut GameEngine,
    policy: &mut dyn Policy,
    seat: Seat,
    target_seat: Seat,
    kind: ActionKind,
) {
    let name = engine.player(seat).name().to_string();
    match kind {
        ActionKind::Peek => {
            let choice = policy.choose_peek(&decision_ctx(engine, seat, None, target_seat));
            if let Some(slot) = choice {
                if let Some(knowledge) = engine.knowledge_mut(seat) {
                    knowledge.record(seat, slot);
                }
                engine.set_status(format!("{name} peeked at their card {}", slot + 1));
                event!(target: "cabo_bot::turn", Level::DEBUG, seat = %seat, slot, "peek");
            }
        }
        ActionKind::Spy => {
            let choice = policy.choose_spy(&decision_ctx(engine, seat, None, target_seat));
            if let Some(slot) = choice {
                engine.reveal_slot(target_seat, slot);
                if let Some(knowledge) = engine.knowledge_mut(seat) {
                    knowledge.record(target_seat, slot);
                }
                let target_name = engine.player(target_seat).name().to_string();
                engine.set_status(format!("{name} spied on {target_name}'s card {}", slot + 1));
                event!(target: "cabo_bot::turn", Level::DEBUG, seat = %seat, slot, "spy");
            }
        }
        ActionKind::Switch => {
            let (own_slot, target_slot) =
                policy.choose_switch(&decision_ctx(engine, seat, None, target_seat));
            if engine.switch_cards(own_slot, target_seat, target_slot) {
                let target_name = engine.player(target_seat).name().to_string();
                engine.set_status(format!(
                    "{name} switched card {} with {target_name}'s {}.",
                    own_slot + 1,
                    target_slot + 1
                ));
                event!(
                    target: "cabo_bot::turn",
                    Level::DEBUG,
                    seat = %seat,
                    own_slot,
                    target_slot,
                    "switch"
                );
            }
        }
    }
}

/// Spy and switch actions always target the human seat.
fn designated_target(engine: &GameEngine) -> Seat {
    Seat::LOOP
        .iter()
        .copied()
        .find(|&seat| !engine.player(seat).is_computer())
        .unwrap_or(Seat::North)
}

fn decision_ctx<'a>(
    engine: &'a GameEngine,
    seat: Seat,
    drawn: Option<Card>,
    target_seat: Seat,
) -> PolicyContext<'a> {
    PolicyContext {
        seat,
        hand: engine.player(seat).hand(),
        drawn,
        knowledge: engine
            .knowledge(seat)
            .expect("computer seat has a knowledge table"),
        target_seat,
        target_hand: engine.player(target_seat).hand(),
        cabo_declared: engine.cabo_declarer().is_some(),
    }
}
