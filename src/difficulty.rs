use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::letters::ALPHABET_SIZE;

/// Named difficulty configuration controlling circle size and case variation
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn settings(&self) -> TierSettings {
        match self {
            Difficulty::Easy => TierSettings::EASY,
            Difficulty::Medium => TierSettings::MEDIUM,
            Difficulty::Hard => TierSettings::HARD,
        }
    }

    /// Menu hotkey for the tier.
    pub fn hotkey(&self) -> char {
        match self {
            Difficulty::Easy => '1',
            Difficulty::Medium => '2',
            Difficulty::Hard => '3',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            '1' | 'e' => Some(Difficulty::Easy),
            '2' | 'm' => Some(Difficulty::Medium),
            '3' | 'h' => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Circle size and case mode for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSettings {
    letters_per_circle: usize,
    use_lowercase_variants: bool,
}

impl TierSettings {
    pub const EASY: TierSettings = TierSettings {
        letters_per_circle: 4,
        use_lowercase_variants: false,
    };
    pub const MEDIUM: TierSettings = TierSettings {
        letters_per_circle: 6,
        use_lowercase_variants: false,
    };
    pub const HARD: TierSettings = TierSettings {
        letters_per_circle: 8,
        use_lowercase_variants: true,
    };

    /// Build custom settings, rejecting any circle size the alphabet cannot fill.
    ///
    /// Both circles draw fillers from one shared sequence, so
    /// `2 * (letters_per_circle - 1)` distinct non-target concepts are needed.
    pub fn new(letters_per_circle: usize, use_lowercase_variants: bool) -> GameResult<Self> {
        if letters_per_circle < 2 {
            return Err(GameError::InvalidTier {
                letters_per_circle,
                reason: "a circle needs the target and at least one filler",
            });
        }

        let required = 2 * (letters_per_circle - 1);
        let available = ALPHABET_SIZE - 1;
        if required > available {
            return Err(GameError::PoolExhausted {
                required,
                available,
            });
        }

        Ok(Self {
            letters_per_circle,
            use_lowercase_variants,
        })
    }

    pub fn letters_per_circle(&self) -> usize {
        self.letters_per_circle
    }

    pub fn use_lowercase_variants(&self) -> bool {
        self.use_lowercase_variants
    }

    pub fn fillers_per_circle(&self) -> usize {
        self.letters_per_circle - 1
    }
}
