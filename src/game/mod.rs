//! Round engine, scores and timing
//!
//! All state here is mutated from the single game loop.

mod engine;
mod scores;
mod timer;

pub use engine::{Game, RoundError, sub_words};
pub use scores::ScoreBoard;
pub use timer::RoundTimer;
