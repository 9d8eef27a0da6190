//! The match engine: deal, reveal, compare, flip back, win.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::cards::{Card, CardPosition, CardStatus, Deck};
use crate::core::config::duration_ms;
use crate::core::{ConfigError, DeckRng, EngineConfig, EngineError, Token, TokenSet};
use crate::session::{EngineEvent, Session, SessionPhase, WinEvent};
use crate::timers::{FiredTimer, Scheduler};

use super::observation::ObservationEncoder;
use super::snapshot::EngineSnapshot;

/// Work the engine schedules for later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineTimer {
    /// The game clock. Repeats until the session is won or replaced.
    Tick,
    /// Turn a mismatched pair face-down again.
    HidePair {
        first: CardPosition,
        second: CardPosition,
    },
}

/// What an accepted reveal led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// First card of a pair turned face-up.
    Revealed(CardPosition),
    /// Second card matched the first.
    Matched {
        first: CardPosition,
        second: CardPosition,
    },
    /// Second card differed. Both flip back after the mismatch delay.
    Mismatched {
        first: CardPosition,
        second: CardPosition,
    },
    /// Second card matched and it was the last pair.
    Won(WinEvent),
}

/// Single-player memory game engine.
///
/// Owns the deck, the session counters and the timers. All mutation goes
/// through four entry points: [`start_game`](Self::start_game),
/// [`reveal_card`](Self::reveal_card), [`advance`](Self::advance) and
/// [`restore`](Self::restore). Time only moves when the host calls
/// `advance`, so the engine is fully deterministic for a fixed seed.
///
/// ```
/// use std::time::Duration;
/// use memory_match::{CardPosition, CardStatus, Deck, MatchEngine};
///
/// let mut engine = MatchEngine::with_seed(42);
/// engine.start_game_with_deck(Deck::from_layout(["a", "b", "a", "b"]).unwrap()).unwrap();
///
/// engine.reveal_card(CardPosition::new(0));
/// engine.reveal_card(CardPosition::new(1));
/// assert_eq!(engine.moves(), 1);
///
/// engine.advance(Duration::from_secs(1));
/// assert_eq!(engine.status_of(CardPosition::new(0)), Some(CardStatus::Hidden));
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: EngineConfig,
    rng: DeckRng,
    deck: Deck,
    session: Session,
    scheduler: Scheduler<EngineTimer>,
    events: Vec<EngineEvent>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::idle(EngineConfig::default())
    }
}

impl MatchEngine {
    /// Create an idle engine. No deck is dealt until a game starts.
    ///
    /// Fails if either timing is zero.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::idle(config))
    }

    /// Create an idle engine with default timings and a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::idle(EngineConfig::new().with_seed(seed))
    }

    fn idle(config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(DeckRng::from_entropy, DeckRng::new);
        Self {
            config,
            rng,
            deck: Deck::default(),
            session: Session::default(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    // === Session lifecycle ===

    /// Deal a shuffled deck from `tokens` and start a new game.
    ///
    /// Replaces any previous game. Its clock and any pending flip-back are
    /// cancelled before the new clock starts.
    pub fn start_game(&mut self, tokens: &TokenSet) {
        let deck = Deck::deal(tokens, &mut self.rng);
        self.begin_session(deck);
    }

    /// Start a new game with a deck the caller already laid out.
    pub fn start_game_with_deck(&mut self, deck: Deck) -> Result<(), EngineError> {
        if deck.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        self.begin_session(deck);
        Ok(())
    }

    fn begin_session(&mut self, deck: Deck) {
        for handle in self.session.timer_handles() {
            self.scheduler.cancel(handle);
        }
        self.scheduler.cancel_epoch(self.session.epoch);

        let epoch = self.session.epoch + 1;
        let total_pairs = deck.pair_count();

        self.deck = deck;
        self.session = Session::new(epoch, total_pairs);

        let clock = self
            .scheduler
            .schedule_repeating(epoch, self.config.tick_interval_ms, EngineTimer::Tick);
        self.session.clock = Some(clock);

        info!(session = epoch, pairs = total_pairs, "game started");
        self.events.push(EngineEvent::GameStarted { total_pairs });
    }

    // === Reveals ===

    /// Turn a card face-up. Invalid reveals are ignored.
    ///
    /// Returns `None` when nothing happened: the card is not face-down, two
    /// cards are already waiting to be compared, or no game is running.
    pub fn reveal_card(&mut self, position: CardPosition) -> Option<RevealOutcome> {
        match self.try_reveal_card(position) {
            Ok(outcome) => Some(outcome),
            Err(reason) => {
                debug!(session = self.session.epoch, %position, %reason, "reveal ignored");
                None
            }
        }
    }

    /// Turn a card face-up, reporting why a refused reveal was refused.
    ///
    /// On success this behaves exactly like [`reveal_card`](Self::reveal_card).
    pub fn try_reveal_card(&mut self, position: CardPosition) -> Result<RevealOutcome, EngineError> {
        match self.session.phase {
            SessionPhase::Idle => return Err(EngineError::NoActiveSession),
            SessionPhase::Won => return Err(EngineError::SessionFinished),
            SessionPhase::Running => {}
        }

        if self.session.is_comparison_pending() {
            return Err(EngineError::ComparisonPending);
        }

        let status = self
            .deck
            .get(position)
            .map(|card| card.status)
            .ok_or(EngineError::PositionOutOfRange {
                position,
                len: self.deck.len(),
            })?;

        match status {
            CardStatus::Hidden => {}
            CardStatus::Revealed => return Err(EngineError::CardAlreadyRevealed(position)),
            CardStatus::Matched => return Err(EngineError::CardAlreadyMatched(position)),
        }

        self.deck.set_status(position, CardStatus::Revealed);
        self.session.revealed.push(position);

        debug!(session = self.session.epoch, %position, "card revealed");
        self.events.push(EngineEvent::CardRevealed { position });

        if !self.session.is_comparison_pending() {
            return Ok(RevealOutcome::Revealed(position));
        }

        Ok(self.compare_revealed())
    }

    fn compare_revealed(&mut self) -> RevealOutcome {
        let first = self.session.revealed[0];
        let second = self.session.revealed[1];
        let moves = self.session.record_move();

        let same_token = self.deck.get(first).map(|card| &card.token)
            == self.deck.get(second).map(|card| &card.token);

        if !same_token {
            let hide = self.scheduler.schedule_once(
                self.session.epoch,
                self.config.mismatch_delay_ms,
                EngineTimer::HidePair { first, second },
            );
            self.session.pending_hide = Some(hide);

            debug!(session = self.session.epoch, %first, %second, moves, "pair mismatched");
            self.events.push(EngineEvent::PairMismatched { first, second, moves });
            return RevealOutcome::Mismatched { first, second };
        }

        self.deck.set_status(first, CardStatus::Matched);
        self.deck.set_status(second, CardStatus::Matched);
        self.session.revealed.clear();
        self.session.matched_pairs += 1;

        debug!(
            session = self.session.epoch,
            %first,
            %second,
            moves,
            matched = self.session.matched_pairs,
            "pair matched"
        );
        self.events.push(EngineEvent::PairMatched { first, second, moves });

        if self.session.all_pairs_found() {
            return RevealOutcome::Won(self.finish());
        }

        RevealOutcome::Matched { first, second }
    }

    fn finish(&mut self) -> WinEvent {
        if let Some(clock) = self.session.clock {
            self.scheduler.cancel(clock);
        }
        let win = self.session.finish();

        info!(
            session = self.session.epoch,
            moves = win.moves,
            elapsed_seconds = win.elapsed_seconds,
            "game won"
        );
        self.events.push(EngineEvent::Won(win));
        win
    }

    // === Time ===

    /// Move the virtual clock forward, firing every timer that comes due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.advance_ms(duration_ms(elapsed));
    }

    /// Move the virtual clock forward by `elapsed_ms` milliseconds.
    pub fn advance_ms(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.on_timer(fired);
        }
    }

    fn on_timer(&mut self, fired: FiredTimer<EngineTimer>) {
        if fired.handle.epoch != self.session.epoch {
            trace!(timer = %fired.handle.id, epoch = fired.handle.epoch, "dropping stale timer");
            self.scheduler.cancel(fired.handle);
            return;
        }

        match fired.kind {
            EngineTimer::Tick => {
                if !self.session.is_running() {
                    self.scheduler.cancel(fired.handle);
                    return;
                }
                let elapsed_ms = fired.periods.saturating_mul(self.config.tick_interval_ms);
                let elapsed_seconds = self.session.tick(elapsed_ms);
                trace!(
                    session = self.session.epoch,
                    periods = fired.periods,
                    elapsed_seconds,
                    "tick"
                );
                self.events.push(EngineEvent::Tick { elapsed_seconds });
            }
            EngineTimer::HidePair { first, second } => {
                if self.session.pending_hide != Some(fired.handle) {
                    return;
                }
                self.session.pending_hide = None;

                for position in [first, second] {
                    if self.status_of(position) == Some(CardStatus::Revealed) {
                        self.deck.set_status(position, CardStatus::Hidden);
                    }
                }
                self.session.revealed.clear();

                debug!(session = self.session.epoch, %first, %second, "pair hidden");
                self.events.push(EngineEvent::PairHidden { first, second });
            }
        }
    }

    // === Queries ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current deck. Empty until a game starts.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Iterate over cards in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter()
    }

    /// Status of a single card.
    #[must_use]
    pub fn status_of(&self, position: CardPosition) -> Option<CardStatus> {
        self.deck.get(position).map(|card| card.status)
    }

    /// Status of every card, in deck order.
    #[must_use]
    pub fn statuses(&self) -> Vec<CardStatus> {
        self.deck.statuses()
    }

    /// A card's token, only while it is face-up.
    #[must_use]
    pub fn visible_token(&self, position: CardPosition) -> Option<&Token> {
        self.deck.get(position).and_then(Card::visible_token)
    }

    /// Face-up cards waiting for comparison or flip-back.
    #[must_use]
    pub fn revealed(&self) -> &[CardPosition] {
        &self.session.revealed
    }

    /// Completed two-card comparisons.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.session.moves
    }

    /// Whole seconds on the game clock, as of the last tick.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.session.elapsed_seconds()
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.session.matched_pairs
    }

    /// Pairs in the current deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.session.total_pairs
    }

    /// Session lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    /// Has the current game been won?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.session.phase == SessionPhase::Won
    }

    /// The win payload, once the game is won.
    #[must_use]
    pub fn win(&self) -> Option<WinEvent> {
        self.is_won().then(|| WinEvent {
            elapsed_seconds: self.session.elapsed_seconds(),
            moves: self.session.moves,
        })
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // === Observation ===

    /// Flat board encoding; see [`ObservationEncoder`].
    #[must_use]
    pub fn observation(&self) -> Vec<f32> {
        ObservationEncoder::for_deck(&self.deck).encode(&self.deck)
    }

    /// Shape of [`observation`](Self::observation) as `[cards, features]`.
    #[must_use]
    pub fn observation_shape(&self) -> [usize; 2] {
        ObservationEncoder::for_deck(&self.deck).output_shape(&self.deck)
    }

    // === Snapshots ===

    /// Capture the full engine state, pending timers included.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config.clone(),
            rng: self.rng.state(),
            deck: self.deck.clone(),
            session: self.session.clone(),
            scheduler: self.scheduler.clone(),
        }
    }

    /// Rebuild an engine from a snapshot. The event queue starts empty.
    ///
    /// Fails if the snapshot carries a zero timing.
    pub fn restore(snapshot: EngineSnapshot) -> Result<Self, ConfigError> {
        snapshot.config.validate()?;
        Ok(Self {
            rng: DeckRng::from_state(&snapshot.rng),
            config: snapshot.config,
            deck: snapshot.deck,
            session: snapshot.session,
            scheduler: snapshot.scheduler,
            events: Vec::new(),
        })
    }
}
