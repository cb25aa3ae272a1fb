//! Word lists for the game
//!
//! Provides the embedded dictionary compiled into the binary, and loading of
//! custom dictionaries from disk.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
