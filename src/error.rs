use thiserror::Error;

/// Errors raised while configuring or constructing game data.
///
/// Rejected player actions are not errors; they are reported as no-ops by the
/// session and controller.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid tier: {letters_per_circle} letters per circle ({reason})")]
    InvalidTier {
        letters_per_circle: usize,
        reason: &'static str,
    },

    #[error("letter pool exhausted: need {required} distinct fillers, only {available} available")]
    PoolExhausted { required: usize, available: usize },

    #[error("invalid round: {0}")]
    InvalidRound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type GameResult<T> = Result<T, GameError>;
