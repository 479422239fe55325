//! The match aggregate.
//!
//! `Match` owns one of everything: the board (both players and all units),
//! the resolution stack, the priority arbiter, the turn cycle and the phase
//! sequencer, plus the collaborators (card data, trigger broker, score
//! keeper, notifier). Nothing is global.
//!
//! ## Driving a match
//!
//! `start`, `submit` and `resume` each run the engine forward to the next
//! [`Suspension`]:
//!
//! ```
//! use std::sync::Arc;
//! use riftbound_engine::cards::CardRegistry;
//! use riftbound_engine::core::{Decision, MatchConfig, PlayerId};
//! use riftbound_engine::game::Match;
//! use riftbound_engine::turn::{Phase, Suspension};
//!
//! let mut game = Match::new(MatchConfig::instant(), Arc::new(CardRegistry::new()));
//!
//! let next = game.start().unwrap();
//! assert_eq!(next, Suspension::AwaitingDecision { player: PlayerId::FIRST });
//! assert_eq!(game.current_phase(), Some(Phase::Action));
//!
//! // Active player passes on an empty stack: turn 2 begins
//! let next = game.submit(Decision::Pass).unwrap();
//! assert_eq!(next, Suspension::AwaitingDecision { player: PlayerId::SECOND });
//! assert_eq!(game.round(), 2);
//! ```
//!
//! ## Failure
//!
//! Any error halts the match. Further calls fail with
//! [`EngineError::Halted`] until [`Match::restart_turn`] runs the current
//! turn again from Wake.

use std::sync::Arc;

use tracing::{info, warn};

use super::snapshot::MatchSnapshot;
use crate::cards::{CardDataProvider, CardInstance, DeckLayout};
use crate::core::{
    Board, Decision, DecisionRecord, EntityId, GameRng, MatchConfig, PlayerId,
};
use crate::error::{EngineError, Result};
use crate::rules::{NoScoring, ScoreKeeper};
use crate::stack::{PriorityArbiter, ResolutionStack};
use crate::triggers::{TriggerBroker, TriggerRegistry};
use crate::turn::{
    MatchEvent, Notifier, NullNotifier, Phase, PhaseSequencer, SequencerStep, Suspension,
    TurnContext, TurnCycle, TurnState,
};

/// Shared, read-only card data.
pub type SharedCards = Arc<dyn CardDataProvider + Send + Sync>;

enum Input {
    Advance,
    Submit(Decision),
    Resume,
}

/// A two-player match.
pub struct Match<B: TriggerBroker = TriggerRegistry> {
    config: MatchConfig,
    board: Board,
    stack: ResolutionStack,
    arbiter: PriorityArbiter,
    cycle: TurnCycle,
    sequencer: PhaseSequencer,
    rng: GameRng,

    // === Collaborators ===
    cards: SharedCards,
    broker: B,
    scorer: Box<dyn ScoreKeeper>,
    notifier: Box<dyn Notifier>,

    // === Bookkeeping ===
    history: Vec<DecisionRecord>,
    pending: Option<Suspension>,
    halted: Option<String>,
}

impl Match<TriggerRegistry> {
    /// A match with empty decks, an empty trigger registry and no scoring.
    ///
    /// Use [`MatchBuilder`](super::MatchBuilder) to set up decks.
    pub fn new(config: MatchConfig, cards: SharedCards) -> Self {
        Self::from_parts(
            config,
            cards,
            TriggerRegistry::new(),
            Box::new(NoScoring),
            Box::new(NullNotifier),
        )
    }
}

impl<B: TriggerBroker> Match<B> {
    pub(crate) fn from_parts(
        config: MatchConfig,
        cards: SharedCards,
        broker: B,
        scorer: Box<dyn ScoreKeeper>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let names = [
            config.player_names[0].as_str(),
            config.player_names[1].as_str(),
        ];
        let board = Board::new(names, config.local_seat);
        let rng = GameRng::new(config.seed);

        Self {
            board,
            stack: ResolutionStack::new(),
            arbiter: PriorityArbiter::new(PlayerId::FIRST),
            cycle: TurnCycle::new(),
            sequencer: PhaseSequencer::new(),
            rng,
            cards,
            broker,
            scorer,
            notifier,
            history: Vec::new(),
            pending: None,
            halted: None,
            config,
        }
    }

    // === Driving ===

    /// Begin the first turn and run to the first suspension.
    pub fn start(&mut self) -> Result<Suspension> {
        self.check_halted()?;
        if self.cycle.has_started() {
            return Err(self.fail(EngineError::AlreadyStarted));
        }

        info!(
            first = %self.config.player_names[0],
            second = %self.config.player_names[1],
            "Match started"
        );
        self.cycle.start_new_turn(&mut self.arbiter, &mut *self.notifier);
        self.sequencer.begin_turn();
        self.step(Input::Advance)
    }

    /// Deliver the awaited player's decision.
    ///
    /// The engine trusts the caller to forward only decisions from the
    /// current priority holder. A decision while none is awaited halts the
    /// match.
    pub fn submit(&mut self, decision: Decision) -> Result<Suspension> {
        self.check_halted()?;
        self.check_started()?;

        let record = DecisionRecord {
            round: self.cycle.round(),
            player: self.arbiter.priority(),
            kind: decision.kind(),
            stack_depth: self.stack.len(),
        };
        let accepted = matches!(self.sequencer.state(), TurnState::AwaitingDecision(_));

        let result = self.step(Input::Submit(decision));
        if accepted {
            self.history.push(record);
        }
        result
    }

    /// End the current pacing pause.
    pub fn resume(&mut self) -> Result<Suspension> {
        self.check_halted()?;
        self.check_started()?;
        self.step(Input::Resume)
    }

    /// Clear a halt and run the current turn again from Wake.
    ///
    /// Round and active player stay the same; priority returns to the
    /// active player and pending stack entries are discarded.
    pub fn restart_turn(&mut self) -> Result<Suspension> {
        self.check_started()?;
        if let Some(reason) = self.halted.take() {
            info!(reason = %reason, round = self.cycle.round(), "Restarting turn after halt");
        }

        self.stack.clear();
        self.cycle
            .restart_turn(&mut self.arbiter, &mut *self.notifier);
        self.sequencer.begin_turn();
        self.step(Input::Advance)
    }

    fn check_halted(&self) -> Result<()> {
        match &self.halted {
            Some(reason) => Err(EngineError::Halted(reason.clone())),
            None => Ok(()),
        }
    }

    fn check_started(&self) -> Result<()> {
        if self.cycle.has_started() {
            Ok(())
        } else {
            Err(EngineError::NotStarted)
        }
    }

    /// Halt the match and hand the error back.
    fn fail(&mut self, err: EngineError) -> EngineError {
        let reason = err.to_string();
        warn!(
            reason = %reason,
            round = self.cycle.round(),
            state = %self.sequencer.state(),
            "Match halted"
        );
        self.notifier.notify(&MatchEvent::Halted {
            reason: reason.clone(),
        });
        self.halted = Some(reason);
        self.pending = None;
        err
    }

    fn step(&mut self, input: Input) -> Result<Suspension> {
        match self.run(input) {
            Ok(suspension) => {
                self.pending = Some(suspension);
                Ok(suspension)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn run(&mut self, input: Input) -> Result<Suspension> {
        let Self {
            config,
            board,
            stack,
            arbiter,
            cycle,
            sequencer,
            cards,
            broker,
            scorer,
            notifier,
            ..
        } = self;

        let mut ctx = TurnContext {
            board,
            stack,
            arbiter,
            broker,
            scorer: &mut **scorer,
            cards: &**cards,
            notifier: &mut **notifier,
            config,
        };

        let mut step = match input {
            Input::Advance => sequencer.advance(cycle.round(), &mut ctx)?,
            Input::Submit(decision) => sequencer.submit(decision, cycle.round(), &mut ctx)?,
            Input::Resume => {
                sequencer.resume()?;
                sequencer.advance(cycle.round(), &mut ctx)?
            }
        };

        loop {
            match step {
                SequencerStep::Suspend(suspension) => return Ok(suspension),
                SequencerStep::TurnComplete => {
                    cycle.start_new_turn(ctx.arbiter, ctx.notifier);
                    sequencer.begin_turn();
                    step = sequencer.advance(cycle.round(), &mut ctx)?;
                }
            }
        }
    }

    // === Setup ===

    /// Put a deck layout on the board for `player`.
    ///
    /// Returns the cards that start in play (legend and battlefield).
    pub(crate) fn place_layout(&mut self, player: PlayerId, layout: DeckLayout) -> [CardInstance; 2] {
        let board = &mut self.board;

        let legend = board.instantiate(layout.legend);
        let battlefield = board.instantiate(layout.battlefield);
        let champion = layout.champion.map(|c| board.instantiate(c));
        let runes: im::Vector<_> = layout.runes.into_iter().map(|c| board.instantiate(c)).collect();
        let main: im::Vector<_> = layout
            .main_deck
            .into_iter()
            .map(|c| board.instantiate(c))
            .collect();

        let p = board.player_mut(player);
        p.legend = Some(legend.clone());
        p.battlefield = Some(battlefield.clone());
        p.champion = champion;
        p.rune_deck = runes;
        p.main_deck = main;

        [legend, battlefield]
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Replace chosen opening-hand cards.
    ///
    /// Draws one new card per replaced card, then shuffles the replaced
    /// cards back into the deck. Only allowed before the first turn.
    pub fn mulligan(&mut self, player: PlayerId, replace: &[EntityId]) -> Result<usize> {
        if self.cycle.has_started() {
            return Err(EngineError::MulliganClosed);
        }

        let hand = &self.board.player(player).hand;
        if let Some(missing) = replace.iter().find(|uid| !hand.iter().any(|c| c.uid == **uid)) {
            return Err(EngineError::NotInHand {
                player,
                card: *missing,
            });
        }

        let p = self.board.player_mut(player);
        let set_aside: Vec<_> = replace
            .iter()
            .filter_map(|uid| p.take_from_hand(*uid))
            .collect();
        let count = set_aside.len();

        p.draw_cards(count);
        p.main_deck.extend(set_aside);
        self.rng.shuffle_vector(&mut p.main_deck);

        info!(player = %player, replaced = count, "Mulligan");
        Ok(count)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for host-side rules (playing cards, combat).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn stack(&self) -> &ResolutionStack {
        &self.stack
    }

    #[must_use]
    pub fn cards(&self) -> &dyn CardDataProvider {
        &*self.cards
    }

    #[must_use]
    pub fn broker(&self) -> &B {
        &self.broker
    }

    pub fn broker_mut(&mut self) -> &mut B {
        &mut self.broker
    }

    /// Turns started so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.cycle.round()
    }

    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.cycle.active()
    }

    /// The current priority holder, once the match has started.
    #[must_use]
    pub fn priority_player(&self) -> Option<PlayerId> {
        self.cycle.has_started().then(|| self.arbiter.priority())
    }

    #[must_use]
    pub fn current_phase(&self) -> Option<Phase> {
        self.sequencer.current_phase()
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.sequencer.state()
    }

    /// Phases finished so far this turn.
    #[must_use]
    pub fn completed_phases(&self) -> &[Phase] {
        self.sequencer.completed_phases()
    }

    /// The Action phase's counters for this turn.
    #[must_use]
    pub fn action_phase(&self) -> &crate::turn::ActionPhase {
        self.sequencer.action_phase()
    }

    /// The suspension returned by the last successful call.
    #[must_use]
    pub fn pending(&self) -> Option<Suspension> {
        self.pending
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.cycle.has_started()
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    #[must_use]
    pub fn halt_reason(&self) -> Option<&str> {
        self.halted.as_deref()
    }

    /// Every accepted decision, oldest first.
    #[must_use]
    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    // === Snapshots ===

    /// Encode the turn position, board and stack.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = MatchSnapshot {
            round: self.cycle.round(),
            active: self.cycle.active(),
            priority: self.priority_player(),
            phase: self.sequencer.current_phase(),
            state: self.sequencer.state(),
            board: self.board.clone(),
            stack: self.stack.clone(),
            rng: self.rng.state(),
            halted: self.halted.clone(),
        };
        snapshot.encode()
    }
}

impl<B: TriggerBroker + std::fmt::Debug> std::fmt::Debug for Match<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("round", &self.cycle.round())
            .field("state", &self.sequencer.state())
            .field("priority", &self.arbiter.priority())
            .field("stack", &self.stack.len())
            .field("broker", &self.broker)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::core::Action;
    use crate::stack::Command;

    fn new_match() -> Match {
        Match::new(MatchConfig::instant(), Arc::new(CardRegistry::new()))
    }

    #[test]
    fn test_calls_before_start() {
        let mut game = new_match();

        assert!(matches!(game.submit(Decision::Pass), Err(EngineError::NotStarted)));
        assert!(matches!(game.resume(), Err(EngineError::NotStarted)));
        assert!(matches!(game.restart_turn(), Err(EngineError::NotStarted)));
        assert!(!game.is_halted());
        assert!(game.priority_player().is_none());
    }

    #[test]
    fn test_start_twice_halts() {
        let mut game = new_match();
        game.start().unwrap();

        assert!(matches!(game.start(), Err(EngineError::AlreadyStarted)));
        assert!(game.is_halted());
        assert!(matches!(game.submit(Decision::Pass), Err(EngineError::Halted(_))));
    }

    #[test]
    fn test_history_records_decisions() {
        let mut game = new_match();
        game.start().unwrap();

        game.submit(Decision::Act(Action::new("Bolt").with_command(Command::log("bolt"))))
            .unwrap();
        game.submit(Decision::Pass).unwrap();

        let history = game.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].player, PlayerId::FIRST);
        assert_eq!(history[0].stack_depth, 0);
        assert_eq!(history[1].player, PlayerId::SECOND);
        assert_eq!(history[1].stack_depth, 1);
    }

    #[test]
    fn test_mulligan_closed_after_start() {
        let mut game = new_match();
        game.start().unwrap();
        assert!(matches!(
            game.mulligan(PlayerId::FIRST, &[]),
            Err(EngineError::MulliganClosed)
        ));
    }
}
