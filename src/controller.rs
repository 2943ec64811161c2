use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::difficulty::Difficulty;
use crate::letters::Letter;
use crate::round::generate_round_with;
use crate::session::{ClickOutcome, Session};

/// Delays for the controller's scheduled transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Loading beat before a new round appears
    pub loading_delay: Duration,
    /// How long correct feedback shows before the next round loads
    pub correct_delay: Duration,
    /// How long the wrong pulse stays on screen
    pub wrong_pulse: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            loading_delay: Duration::from_millis(350),
            correct_delay: Duration::from_millis(1200),
            wrong_pulse: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    ActivateRound,
    NextRound,
    ClearWrongPulse(u64),
}

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    due: Duration,
    generation: u64,
    kind: Scheduled,
}

/// Single owner of the [`Session`].
///
/// All mutation goes through this type. Delayed transitions are queued with
/// the session generation current at scheduling time and are dropped when
/// they come due after the generation has moved on.
#[derive(Debug)]
pub struct GameController<R: Rng = StdRng> {
    session: Session,
    pending: Vec<PendingTransition>,
    clock: Duration,
    timing: Timing,
    rng: R,
}

impl GameController<StdRng> {
    pub fn new(timing: Timing) -> Self {
        Self::with_rng(timing, StdRng::from_entropy())
    }

    pub fn seeded(timing: Timing, seed: u64) -> Self {
        Self::with_rng(timing, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(timing: Timing, rng: R) -> Self {
        Self {
            session: Session::new(),
            pending: Vec::new(),
            clock: Duration::ZERO,
            timing,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Time elapsed on the controller's clock.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }

    pub fn select_difficulty(&mut self, tier: Difficulty) {
        info!(%tier, "difficulty selected");
        self.session = std::mem::take(&mut self.session).select_difficulty(tier);
        self.drop_stale();
        self.schedule(self.timing.loading_delay, Scheduled::ActivateRound);
    }

    /// Load a new round at the current tier. Returns false when no tier is set.
    pub fn start_new_round(&mut self) -> bool {
        if self.session.difficulty().is_none() {
            debug!("new round requested without a tier");
            return false;
        }
        self.session = std::mem::take(&mut self.session).start_new_round();
        self.drop_stale();
        self.schedule(self.timing.loading_delay, Scheduled::ActivateRound);
        true
    }

    pub fn return_to_menu(&mut self) {
        info!(score = self.session.score(), "returning to menu");
        self.session = std::mem::take(&mut self.session).return_to_menu();
        self.drop_stale();
    }

    /// Resolve a click. Returns true only for a match in an active round.
    pub fn submit_letter_click(&mut self, letter: Letter) -> bool {
        let (session, outcome) = std::mem::take(&mut self.session).submit_letter(letter);
        self.session = session;

        match outcome {
            ClickOutcome::Ignored => {
                trace!(%letter, "click ignored");
                false
            }
            ClickOutcome::Correct { stars } => {
                info!(%letter, stars, score = self.session.score(), "correct match");
                self.schedule(self.timing.correct_delay, Scheduled::NextRound);
                true
            }
            ClickOutcome::Wrong { pulse } => {
                debug!(
                    %letter,
                    wrong_guesses = self.session.wrong_guesses(),
                    "wrong letter"
                );
                self.schedule(self.timing.wrong_pulse, Scheduled::ClearWrongPulse(pulse));
                false
            }
        }
    }

    /// Move the clock forward and apply every transition that has come due.
    ///
    /// Returns the transitions that were applied, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<Scheduled> {
        self.clock += dt;
        let mut applied = Vec::new();

        while let Some(next) = self.take_next_due() {
            if next.generation != self.session.generation() {
                trace!(kind = ?next.kind, "discarding stale transition");
                continue;
            }
            self.apply(next);
            applied.push(next.kind);
        }

        applied
    }

    fn apply(&mut self, transition: PendingTransition) {
        match transition.kind {
            Scheduled::ActivateRound => {
                let Some(tier) = self.session.difficulty() else {
                    return;
                };
                let round = generate_round_with(tier.settings(), &mut self.rng);
                debug!(target_concept = %round.target(), %tier, "round ready");
                let generation = self.session.generation();
                self.session = std::mem::take(&mut self.session).install_round(generation, round);
            }
            Scheduled::NextRound => {
                self.session = std::mem::take(&mut self.session).start_new_round();
                self.schedule_at(
                    transition.due + self.timing.loading_delay,
                    Scheduled::ActivateRound,
                );
            }
            Scheduled::ClearWrongPulse(pulse) => {
                self.session = std::mem::take(&mut self.session).clear_wrong_pulse(pulse);
            }
        }
    }

    fn schedule(&mut self, delay: Duration, kind: Scheduled) {
        self.schedule_at(self.clock + delay, kind);
    }

    // Chained transitions are timed from when their parent came due, not from
    // the end of a long tick.
    fn schedule_at(&mut self, due: Duration, kind: Scheduled) {
        self.pending.push(PendingTransition {
            due,
            generation: self.session.generation(),
            kind,
        });
    }

    fn take_next_due(&mut self) -> Option<PendingTransition> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= self.clock)
            .min_by_key(|(_, p)| p.due)
            .map(|(idx, _)| idx)?;
        Some(self.pending.remove(idx))
    }

    fn drop_stale(&mut self) {
        let generation = self.session.generation();
        self.pending.retain(|p| p.generation == generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Feedback, Phase};

    fn controller() -> GameController {
        GameController::seeded(Timing::default(), 17)
    }

    fn target_and_miss(c: &GameController) -> (Letter, Letter) {
        let round = c.session().round().expect("round should be active");
        let target = *round
            .circle_a()
            .iter()
            .find(|l| round.is_target(**l))
            .unwrap();
        let miss = *round
            .circle_a()
            .iter()
            .find(|l| !round.is_target(**l))
            .unwrap();
        (target, miss)
    }

    fn loaded(tier: Difficulty) -> GameController {
        let mut c = controller();
        c.select_difficulty(tier);
        c.advance(c.timing().loading_delay);
        c
    }

    #[test]
    fn selecting_tier_loads_round_after_delay() {
        let mut c = controller();
        c.select_difficulty(Difficulty::Easy);
        assert_eq!(c.session().phase(), Phase::RoundLoading);

        c.advance(Duration::from_millis(100));
        assert_eq!(c.session().phase(), Phase::RoundLoading);

        let applied = c.advance(Duration::from_millis(250));
        assert_eq!(applied, vec![Scheduled::ActivateRound]);
        assert_eq!(c.session().phase(), Phase::RoundActive);
        assert_eq!(c.session().round().unwrap().letters_per_circle(), 4);
    }

    #[test]
    fn correct_click_schedules_next_round() {
        let mut c = loaded(Difficulty::Medium);
        let (target, _) = target_and_miss(&c);

        assert!(c.submit_letter_click(target));
        assert_eq!(c.session().score(), 1);
        assert_eq!(c.session().feedback(), Feedback::Correct);

        // Feedback lock
        assert!(!c.submit_letter_click(target));
        assert_eq!(c.session().score(), 1);

        c.advance(c.timing().correct_delay);
        assert_eq!(c.session().phase(), Phase::RoundLoading);
        c.advance(c.timing().loading_delay);
        assert_eq!(c.session().phase(), Phase::RoundActive);
        assert_eq!(c.session().score(), 1);
        assert_eq!(c.session().wrong_guesses(), 0);
    }

    #[test]
    fn one_large_step_runs_the_whole_chain() {
        let mut c = loaded(Difficulty::Easy);
        let (target, _) = target_and_miss(&c);
        assert!(c.submit_letter_click(target));

        let applied = c.advance(Duration::from_secs(10));
        assert_eq!(applied, vec![Scheduled::NextRound, Scheduled::ActivateRound]);
        assert_eq!(c.session().phase(), Phase::RoundActive);
    }

    #[test]
    fn wrong_pulse_clears_itself() {
        let mut c = loaded(Difficulty::Easy);
        let (_, miss) = target_and_miss(&c);

        assert!(!c.submit_letter_click(miss));
        assert!(c.session().is_wrong_pulse_active());
        assert_eq!(c.session().wrong_guesses(), 1);

        c.advance(c.timing().wrong_pulse);
        assert!(!c.session().is_wrong_pulse_active());
        assert_eq!(c.session().feedback(), Feedback::Idle);
        assert_eq!(c.session().wrong_guesses(), 1);
    }

    #[test]
    fn later_wrong_pulse_outlives_earlier_timer() {
        let mut c = loaded(Difficulty::Easy);
        let (_, miss) = target_and_miss(&c);

        c.submit_letter_click(miss);
        c.advance(Duration::from_millis(300));
        c.submit_letter_click(miss);

        // First timer fires here but the second pulse is still showing.
        c.advance(Duration::from_millis(250));
        assert!(c.session().is_wrong_pulse_active());

        c.advance(Duration::from_millis(300));
        assert!(!c.session().is_wrong_pulse_active());
    }

    #[test]
    fn menu_cancels_pending_round() {
        let mut c = controller();
        c.select_difficulty(Difficulty::Hard);
        c.return_to_menu();
        assert_eq!(c.pending_transitions(), 0);

        c.advance(Duration::from_secs(5));
        assert_eq!(c.session().phase(), Phase::MenuSelection);
        assert!(c.session().round().is_none());
    }

    #[test]
    fn tier_change_supersedes_next_round_timer() {
        let mut c = loaded(Difficulty::Easy);
        let (target, _) = target_and_miss(&c);
        assert!(c.submit_letter_click(target));

        c.select_difficulty(Difficulty::Hard);
        assert_eq!(c.session().score(), 0);

        c.advance(c.timing().loading_delay);
        assert_eq!(c.session().phase(), Phase::RoundActive);
        assert_eq!(c.session().round().unwrap().letters_per_circle(), 8);

        // The old NextRound timer must not tear down the hard round.
        c.advance(c.timing().correct_delay);
        assert_eq!(c.session().phase(), Phase::RoundActive);
    }

    #[test]
    fn start_new_round_needs_tier() {
        let mut c = controller();
        assert!(!c.start_new_round());
        assert_eq!(c.pending_transitions(), 0);

        let mut c = loaded(Difficulty::Easy);
        assert!(c.start_new_round());
        assert_eq!(c.session().phase(), Phase::RoundLoading);
    }

    #[test]
    fn clicks_during_loading_are_ignored() {
        let mut c = controller();
        c.select_difficulty(Difficulty::Easy);
        assert!(!c.submit_letter_click(Letter::upper('A')));
        assert_eq!(c.session().wrong_guesses(), 0);
    }
}
