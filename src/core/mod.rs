//! Core domain types for the game
//!
//! Letter multisets and round words. No I/O, no randomness.

mod letters;
mod word;

pub use letters::LetterCounts;
pub use word::Word;
