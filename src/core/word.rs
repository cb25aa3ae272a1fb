//! Guessable word representation
//!
//! A `Word` is one entry of the current round: its letters, whether a player
//! has found it yet, and who did.

use std::fmt;

/// A word that can be guessed during a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    letters: String,
    guessed: bool,
    guesser: String,
}

impl Word {
    /// Create an unguessed word
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::core::Word;
    ///
    /// let word = Word::new("crane");
    /// assert_eq!(word.letters(), "crane");
    /// assert!(!word.is_guessed());
    /// assert_eq!(word.guesser(), "");
    /// ```
    pub fn new(letters: impl Into<String>) -> Self {
        Self {
            letters: letters.into(),
            guessed: false,
            guesser: String::new(),
        }
    }

    /// Get the word's letters as a string slice
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Number of characters in the word
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.chars().count()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn is_guessed(&self) -> bool {
        self.guessed
    }

    /// Player who found the word, empty while unguessed
    #[inline]
    #[must_use]
    pub fn guesser(&self) -> &str {
        &self.guesser
    }

    /// Record `player` as the finder
    ///
    /// Returns false (and changes nothing) if the word was already found.
    pub(crate) fn mark_guessed(&mut self, player: &str) -> bool {
        if self.guessed {
            return false;
        }
        self.guessed = true;
        self.guesser = player.to_string();
        true
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters)
    }
}
