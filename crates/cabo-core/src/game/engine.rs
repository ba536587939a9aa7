use crate::belief::CardKnowledge;
use crate::game::log::GameLog;
use crate::model::card::{ActionKind, Card};
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::player::{Player, Seat};
use crate::model::stack::CardStack;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Pending special interaction, Idle at the start of every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Swapping,
    Peeking,
    Spying,
    Switching,
}

/// Which commands the presentation layer may currently issue. All false on a
/// computer seat's turn and once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFlags {
    pub draw: bool,
    pub swap: bool,
    pub declare_cabo: bool,
    pub use_action: Option<ActionKind>,
    pub end_turn: bool,
}

impl CommandFlags {
    const NONE: CommandFlags = CommandFlags {
        draw: false,
        swap: false,
        declare_cabo: false,
        use_action: None,
        end_turn: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(Seat),
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub scores: [i32; 4],
    pub result: GameResult,
}

/// The rules engine: owns the deck, the discard pile, the four players and
/// their belief tables, the drawn card, and the message log. Commands from
/// the presentation layer are accepted only on a live human turn; anything
/// whose precondition fails is a silent no-op. The lower-level table
/// operations are shared with the computer-turn driver.
#[derive(Debug, Clone)]
pub struct GameEngine {
    deck: CardStack,
    discard: CardStack,
    players: [Player; 4],
    current: Seat,
    cabo_declarer: Option<Seat>,
    drawn_card: Option<Card>,
    action_state: ActionState,
    switch_source: Option<usize>,
    has_drawn: bool,
    game_over: bool,
    log: GameLog,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_deck(CardStack::shuffled(&mut rng))
    }

    /// Deals from the given deck order; the deterministic entry point for
    /// tests and replays.
    pub fn from_deck(mut deck: CardStack) -> Self {
        let mut players = Self::default_roster();
        Self::deal(&mut players, &mut deck);
        Self::assemble(deck, players)
    }

    /// Skips the deal entirely; hands are taken as given.
    pub fn from_hands(hands: [Hand; 4], deck: CardStack) -> Self {
        let mut players = Self::default_roster();
        for (player, hand) in players.iter_mut().zip(hands) {
            player.set_hand(hand);
        }
        Self::assemble(deck, players)
    }

    fn default_roster() -> [Player; 4] {
        [
            Player::human("Cyntra", Seat::North),
            Player::computer("Avalon", Seat::East),
            Player::computer("Balthor", Seat::South),
            Player::computer("Ophira", Seat::West),
        ]
    }

    /// Four rounds dealt round-robin off the top of the deck. The round-0
    /// card lands face-up for seats 0 and 1 only.
    fn deal(players: &mut [Player; 4], deck: &mut CardStack) {
        for round in 0..HAND_SIZE {
            for seat in Seat::LOOP.iter().copied() {
                let mut card = deck.pop().expect("full deck covers the deal");
                if round == 0 && seat.index() < 2 {
                    card.set_face_up(true);
                }
                players[seat.index()]
                    .hand_mut()
                    .add(card)
                    .expect("deal stays within hand capacity");
            }
        }
    }

    fn assemble(deck: CardStack, players: [Player; 4]) -> Self {
        let current = Seat::North;
        let mut log = GameLog::new();
        log.push(format!("Turn for {}", players[current.index()].name()));
        Self {
            deck,
            discard: CardStack::new(),
            players,
            current,
            cabo_declarer: None,
            drawn_card: None,
            action_state: ActionState::Idle,
            switch_source: None,
            has_drawn: false,
            game_over: false,
            log,
        }
    }

    // ----- queries ---------------------------------------------------------

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current.index()]
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn deck(&self) -> &CardStack {
        &self.deck
    }

    pub fn discard(&self) -> &CardStack {
        &self.discard
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard.top()
    }

    pub fn drawn_card(&self) -> Option<&Card> {
        self.drawn_card.as_ref()
    }

    pub fn action_state(&self) -> ActionState {
        self.action_state
    }

    pub fn switch_source(&self) -> Option<usize> {
        self.switch_source
    }

    pub fn cabo_declarer(&self) -> Option<Seat> {
        self.cabo_declarer
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn knowledge(&self, seat: Seat) -> Option<&CardKnowledge> {
        self.players[seat.index()].knowledge()
    }

    pub fn knowledge_mut(&mut self, seat: Seat) -> Option<&mut CardKnowledge> {
        self.players[seat.index()].knowledge_mut()
    }

    pub fn command_flags(&self) -> CommandFlags {
        if self.game_over || self.current_player().is_computer() {
            return CommandFlags::NONE;
        }
        let idle = matches!(self.action_state, ActionState::Idle);
        CommandFlags {
            draw: !self.has_drawn,
            swap: self.drawn_card.is_some() && idle,
            declare_cabo: !self.has_drawn && self.cabo_declarer.is_none(),
            use_action: if idle {
                self.drawn_card.and_then(|card| card.action_kind())
            } else {
                None
            },
            end_turn: self.has_drawn,
        }
    }

    pub fn scores(&self) -> [i32; 4] {
        let mut totals = [0; 4];
        for seat in Seat::LOOP.iter().copied() {
            totals[seat.index()] = self.players[seat.index()].hand().total_score();
        }
        totals
    }

    /// Final standings once the game is over: strictly lowest total wins, a
    /// shared minimum is a tie.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.game_over {
            return None;
        }
        let scores = self.scores();
        let best = *scores.iter().min().expect("four seats always score");
        let holders = scores.iter().filter(|&&score| score == best).count();
        let result = if holders == 1 {
            let winner = Seat::LOOP
                .iter()
                .copied()
                .find(|seat| scores[seat.index()] == best)
                .expect("a seat holds the minimum");
            GameResult::Winner(winner)
        } else {
            GameResult::Tie
        };
        Some(GameOutcome { scores, result })
    }

    // ----- presentation commands ------------------------------------------

    fn accepting_commands(&self) -> bool {
        !self.game_over && !self.current_player().is_computer()
    }

    pub fn draw_from_deck(&mut self) {
        if !self.accepting_commands() || self.has_drawn {
            return;
        }
        self.take_draw();
    }

    pub fn declare_cabo(&mut self) {
        if !self.accepting_commands() || self.has_drawn || self.cabo_declarer.is_some() {
            return;
        }
        self.record_cabo();
        self.advance_turn();
    }

    pub fn begin_swap(&mut self) {
        if !self.accepting_commands()
            || self.drawn_card.is_none()
            || !matches!(self.action_state, ActionState::Idle)
        {
            return;
        }
        self.action_state = ActionState::Swapping;
        self.log
            .push("Click a card in your hand to swap it with the drawn card.");
    }

    pub fn begin_action(&mut self, kind: ActionKind) {
        if !self.accepting_commands() || !matches!(self.action_state, ActionState::Idle) {
            return;
        }
        let Some(card) = self.drawn_card else {
            return;
        };
        if card.action_kind() != Some(kind) {
            return;
        }
        self.action_state = match kind {
            ActionKind::Peek => {
                self.log.push("Click a card in your hand to peek at it.");
                ActionState::Peeking
            }
            ActionKind::Spy => {
                self.log
                    .push("Click a card in another player's hand to spy on it.");
                ActionState::Spying
            }
            ActionKind::Switch => {
                self.log.push(
                    "Click a card from your hand, then a card from another player's hand to switch.",
                );
                ActionState::Switching
            }
        };
    }

    pub fn select_own_slot(&mut self, slot: usize) {
        if !self.accepting_commands() || slot >= HAND_SIZE {
            return;
        }
        match self.action_state {
            ActionState::Swapping => {
                if self.swap_drawn_into(slot).is_some() {
                    self.log
                        .push(format!("Swapped the drawn card with card {} in the hand.", slot + 1));
                    self.action_state = ActionState::Idle;
                }
            }
            ActionState::Peeking => {
                if self.reveal_slot(self.current, slot) {
                    self.log
                        .push(format!("Revealed card {} in the hand.", slot + 1));
                    self.resolve_action();
                }
            }
            ActionState::Switching if self.switch_source.is_none() => {
                self.switch_source = Some(slot);
            }
            _ => {}
        }
    }

    pub fn select_other_slot(&mut self, seat: Seat, slot: usize) {
        if !self.accepting_commands() || seat == self.current || slot >= HAND_SIZE {
            return;
        }
        match self.action_state {
            ActionState::Spying => {
                if self.reveal_slot(seat, slot) {
                    self.log
                        .push(format!("Spied on {}'s card.", self.players[seat.index()].name()));
                    self.resolve_action();
                }
            }
            ActionState::Switching => {
                let Some(source) = self.switch_source else {
                    return;
                };
                if self.switch_cards(source, seat, slot) {
                    self.log
                        .push(format!("Switched a card with {}", self.players[seat.index()].name()));
                    self.switch_source = None;
                    self.resolve_action();
                }
            }
            _ => {}
        }
    }

    pub fn end_turn(&mut self) {
        if !self.accepting_commands() || !self.has_drawn {
            return;
        }
        self.advance_turn();
    }

    // ----- table operations (shared with the computer-turn driver) --------

    /// Pops the deck into the drawn card, or ends the game when the deck ran
    /// dry. Returns the drawn card for the caller's decision-making.
    pub fn take_draw(&mut self) -> Option<Card> {
        if self.game_over || self.drawn_card.is_some() {
            return None;
        }
        let Some(mut card) = self.deck.pop() else {
            self.finish_game();
            return None;
        };
        card.set_face_up(true);
        self.drawn_card = Some(card);
        self.has_drawn = true;
        let message = format!("{} drew a card.", self.current_player().name());
        self.log.push(message);
        Some(card)
    }

    /// Marks the declaration without advancing; the human command and the
    /// computer turn each decide when the turn actually ends.
    pub fn record_cabo(&mut self) {
        if self.cabo_declarer.is_some() {
            return;
        }
        let message = format!("{} declares CABO!", self.current_player().name());
        self.log.push(message);
        self.cabo_declarer = Some(self.current);
    }

    /// Replaces the current seat's slot with the drawn card. The displaced
    /// card goes to the discard and every belief about that slot dies with
    /// it. Returns the displaced card.
    pub fn swap_drawn_into(&mut self, slot: usize) -> Option<Card> {
        let drawn = self.drawn_card.take()?;
        let seat = self.current;
        let displaced = match self.players[seat.index()].hand_mut().replace(slot, drawn) {
            Ok(card) => card,
            Err(_) => {
                self.drawn_card = Some(drawn);
                return None;
            }
        };
        self.discard.push(displaced);
        self.forget_slot_everywhere(seat, slot);
        Some(displaced)
    }

    pub fn reveal_slot(&mut self, seat: Seat, slot: usize) -> bool {
        self.players[seat.index()]
            .hand_mut()
            .set_face_up(slot, true)
            .is_ok()
    }

    /// Exchanges a current-seat card with another seat's card, carrying the
    /// belief entries for both slots across every computer table.
    pub fn switch_cards(&mut self, own_slot: usize, other: Seat, other_slot: usize) -> bool {
        let seat = self.current;
        if other == seat {
            return false;
        }
        let Some(own_card) = self.players[seat.index()].hand().card(own_slot).copied() else {
            return false;
        };
        let Some(other_card) = self.players[other.index()].hand().card(other_slot).copied() else {
            return false;
        };
        let _ = self.players[seat.index()].hand_mut().replace(own_slot, other_card);
        let _ = self.players[other.index()].hand_mut().replace(other_slot, own_card);
        for player in &mut self.players {
            if let Some(knowledge) = player.knowledge_mut() {
                knowledge.exchange(seat, own_slot, other, other_slot);
            }
        }
        true
    }

    pub fn discard_drawn(&mut self) {
        if let Some(card) = self.drawn_card.take() {
            self.discard.push(card);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }

    /// Ends the turn: every card face-down, a leftover drawn card discarded,
    /// the seat advanced, and the game closed if the round wrapped back to
    /// the declarer.
    pub fn advance_turn(&mut self) {
        if self.game_over {
            return;
        }
        for player in &mut self.players {
            player.hand_mut().conceal_all();
        }
        self.discard_drawn();
        self.has_drawn = false;
        self.action_state = ActionState::Idle;
        self.switch_source = None;
        self.current = self.current.next();
        if self.cabo_declarer == Some(self.current) {
            self.finish_game();
        }
        let message = format!("Turn for {}", self.current_player().name());
        self.log.push(message);
    }

    fn resolve_action(&mut self) {
        self.discard_drawn();
        self.action_state = ActionState::Idle;
    }

    fn forget_slot_everywhere(&mut self, seat: Seat, slot: usize) {
        for player in &mut self.players {
            if let Some(knowledge) = player.knowledge_mut() {
                knowledge.forget(seat, slot);
            }
        }
    }

    fn finish_game(&mut self) {
        self.game_over = true;
        for player in &mut self.players {
            player.hand_mut().reveal_all();
        }
    }
}
