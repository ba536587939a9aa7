use super::{Policy, PolicyContext};
use cabo_core::model::hand::HAND_SIZE;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{Level, event};

/// Value assumed for a slot the seat has never seen; keeps the blind
/// estimate honest about imperfect information.
const ASSUMED_UNKNOWN_VALUE: i32 = 7;

/// Declaration window: declare once the blind estimate drops to a uniform
/// draw from this range.
const CABO_THRESHOLD_LOW: f32 = 13.0;
const CABO_THRESHOLD_HIGH: f32 = 21.0;

/// Greedy opponent working only from its belief table: replace the worst
/// known card, spend action cards on filling knowledge gaps, and declare
/// once the estimated hand is low enough.
pub struct HeuristicPolicy {
    rng: SmallRng,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn choose_swap(&mut self, ctx: &PolicyContext) -> Option<usize> {
        let drawn = ctx.drawn?;
        let slot = highest_known_slot(ctx).unwrap_or(0);
        let highest = ctx.hand.card(slot)?.score_value();
        let drawn_value = drawn.score_value();
        if drawn_value < highest {
            event!(
                target: "cabo_bot::turn",
                Level::DEBUG,
                seat = %ctx.seat,
                slot,
                drawn_value,
                highest,
                "swap drawn card"
            );
            Some(slot)
        } else {
            None
        }
    }

    fn choose_peek(&mut self, ctx: &PolicyContext) -> Option<usize> {
        ctx.knowledge.first_unknown(ctx.seat)
    }

    fn choose_spy(&mut self, ctx: &PolicyContext) -> Option<usize> {
        ctx.knowledge.first_unknown(ctx.target_seat)
    }

    fn choose_switch(&mut self, ctx: &PolicyContext) -> (usize, usize) {
        let own = highest_known_slot(ctx).unwrap_or_else(|| self.rng.gen_range(0..HAND_SIZE));
        let target = lowest_known_target_slot(ctx)
            .unwrap_or_else(|| self.rng.gen_range(0..HAND_SIZE));
        (own, target)
    }

    fn wants_cabo(&mut self, ctx: &PolicyContext) -> bool {
        if ctx.cabo_declared {
            return false;
        }
        let estimate = blind_estimate(ctx);
        let threshold = self.rng.gen_range(CABO_THRESHOLD_LOW..CABO_THRESHOLD_HIGH);
        let declare = (estimate as f32) <= threshold;
        if declare {
            event!(
                target: "cabo_bot::turn",
                Level::DEBUG,
                seat = %ctx.seat,
                estimate,
                threshold,
                "declare cabo"
            );
        }
        declare
    }
}

/// Own slot with the greatest known scoring value.
fn highest_known_slot(ctx: &PolicyContext) -> Option<usize> {
    ctx.knowledge
        .known_slots(ctx.seat)
        .max_by_key(|&slot| {
            ctx.hand
                .card(slot)
                .map(|card| card.score_value())
                .unwrap_or(i32::MIN)
        })
}

/// Target-seat slot with the smallest known scoring value.
fn lowest_known_target_slot(ctx: &PolicyContext) -> Option<usize> {
    ctx.knowledge
        .known_slots(ctx.target_seat)
        .min_by_key(|&slot| {
            ctx.target_hand
                .card(slot)
                .map(|card| card.score_value())
                .unwrap_or(i32::MAX)
        })
}

/// Known slots count at their true value, unseen slots at the neutral
/// assumption; never the real total.
fn blind_estimate(ctx: &PolicyContext) -> i32 {
    (0..HAND_SIZE)
        .map(|slot| {
            if ctx.knowledge.knows(ctx.seat, slot) {
                ctx.hand
                    .card(slot)
                    .map(|card| card.score_value())
                    .unwrap_or(ASSUMED_UNKNOWN_VALUE)
            } else {
                ASSUMED_UNKNOWN_VALUE
            }
        })
        .sum()
}
