// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod celebration;
pub mod config;
pub mod controller;
pub mod difficulty;
pub mod error;
pub mod layout;
pub mod letters;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod session;

pub use controller::{GameController, Timing};
pub use difficulty::{Difficulty, TierSettings};
pub use error::{GameError, GameResult};
pub use letters::Letter;
pub use round::{generate_round, generate_round_with, Round};
pub use session::{stars_for, ClickOutcome, Feedback, Phase, Session};
