//! Words on Terminal
//!
//! A word-guessing game: a word's letters are shuffled and players race to
//! spell every dictionary word hidden in them. Guesses come from the
//! keyboard or from a chat channel over an IRC-style connection.
//!
//! # Quick Start
//!
//! ```rust
//! use words_on_terminal::game::Game;
//!
//! let dictionary: Vec<String> = ["cat", "at", "a", "dog"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! let mut game = Game::seeded(42);
//! game.set_word("cat", &dictionary).unwrap();
//!
//! assert!(game.guess("Bob", "AT "));
//! assert_eq!(game.scores().get("Bob"), 2);
//! ```

// Core domain types
pub mod core;

// Round engine, scores and timer
pub mod game;

// Chat protocol and connection
pub mod chat;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
