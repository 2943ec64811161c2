use crate::difficulty::Difficulty;
use crate::letters::Letter;
use crate::round::Round;

/// Stars awarded for a first-try match.
pub const MAX_STARS: u32 = 5;

/// Stars for a correct match after `wrong_guesses` misses in the same round.
pub fn stars_for(wrong_guesses: u32) -> u32 {
    MAX_STARS.saturating_sub(wrong_guesses).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    MenuSelection,
    RoundLoading,
    RoundActive,
    RoundResolvedCorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Idle,
    Correct,
}

/// Result of resolving a letter click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No round is accepting clicks; nothing changed.
    Ignored,
    Correct { stars: u32 },
    /// The wrong pulse identified by `pulse` is now showing.
    Wrong { pulse: u64 },
}

impl ClickOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ClickOutcome::Correct { .. })
    }
}

/// Game state for one player.
///
/// Every transition consumes the current value and returns the next one.
/// `generation` changes whenever the round or tier is replaced, letting
/// delayed transitions detect that they are stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    difficulty: Option<Difficulty>,
    round: Option<Round>,
    score: u32,
    feedback: Feedback,
    wrong_guesses: u32,
    wrong_pulse: Option<u64>,
    pulse_seq: u64,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn is_wrong_pulse_active(&self) -> bool {
        self.wrong_pulse.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stars a correct match would award (or did award) this round.
    pub fn stars(&self) -> u32 {
        stars_for(self.wrong_guesses)
    }

    pub fn phase(&self) -> Phase {
        match (&self.difficulty, &self.round, self.feedback) {
            (None, _, _) => Phase::MenuSelection,
            (Some(_), None, _) => Phase::RoundLoading,
            (Some(_), Some(_), Feedback::Idle) => Phase::RoundActive,
            (Some(_), Some(_), Feedback::Correct) => Phase::RoundResolvedCorrect,
        }
    }

    /// Choose (or change) the tier. Score starts over.
    pub fn select_difficulty(self, tier: Difficulty) -> Self {
        Self {
            difficulty: Some(tier),
            round: None,
            score: 0,
            feedback: Feedback::Idle,
            wrong_guesses: 0,
            wrong_pulse: None,
            pulse_seq: self.pulse_seq,
            generation: self.generation + 1,
        }
    }

    /// Drop the current round and wait for a new one, keeping the score.
    /// Without a tier there is nothing to load and the session is returned as-is.
    pub fn start_new_round(self) -> Self {
        if self.difficulty.is_none() {
            return self;
        }
        Self {
            round: None,
            feedback: Feedback::Idle,
            wrong_guesses: 0,
            wrong_pulse: None,
            generation: self.generation + 1,
            ..self
        }
    }

    /// Install a freshly generated round.
    ///
    /// Applied only while loading and only if `generation` is still current.
    pub fn install_round(self, generation: u64, round: Round) -> Self {
        if generation != self.generation || self.phase() != Phase::RoundLoading {
            return self;
        }
        Self {
            round: Some(round),
            ..self
        }
    }

    pub fn return_to_menu(self) -> Self {
        Self {
            difficulty: None,
            round: None,
            score: 0,
            feedback: Feedback::Idle,
            wrong_guesses: 0,
            wrong_pulse: None,
            pulse_seq: self.pulse_seq,
            generation: self.generation + 1,
        }
    }

    /// Resolve a click against the active round.
    pub fn submit_letter(self, letter: Letter) -> (Self, ClickOutcome) {
        let resolved = match self.phase() {
            Phase::RoundActive => self.round.as_ref().map(|round| round.is_target(letter)),
            _ => None,
        };
        let Some(is_match) = resolved else {
            return (self, ClickOutcome::Ignored);
        };

        if is_match {
            let stars = self.stars();
            let next = Self {
                score: self.score + 1,
                feedback: Feedback::Correct,
                wrong_pulse: None,
                ..self
            };
            (next, ClickOutcome::Correct { stars })
        } else {
            let pulse = self.pulse_seq + 1;
            let next = Self {
                wrong_guesses: self.wrong_guesses + 1,
                wrong_pulse: Some(pulse),
                pulse_seq: pulse,
                ..self
            };
            (next, ClickOutcome::Wrong { pulse })
        }
    }

    /// Clear the wrong pulse if `pulse` is still the one showing.
    pub fn clear_wrong_pulse(self, pulse: u64) -> Self {
        if self.wrong_pulse != Some(pulse) {
            return self;
        }
        Self {
            wrong_pulse: None,
            ..self
        }
    }
}
