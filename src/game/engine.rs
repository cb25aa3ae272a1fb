//! Round engine
//!
//! Draws a hidden word, derives every dictionary word that can be spelled
//! from its letters, and credits players for finding them.

use crate::core::{LetterCounts, Word};
use crate::game::ScoreBoard;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, info};

/// Errors from starting a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// No dictionary word satisfies the selection constraints
    NoCandidate {
        min_length: usize,
        min_words: usize,
        max_words: usize,
    },
    /// The word to draw is blank
    EmptyWord,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidate {
                min_length,
                min_words,
                max_words,
            } => write!(
                f,
                "No words matching given criteria (min_length={min_length}, \
                 min_words={min_words}, max_words={max_words}) in the word list"
            ),
            Self::EmptyWord => write!(f, "Cannot start a round with an empty word"),
        }
    }
}

impl std::error::Error for RoundError {}

/// Lowercased view of a dictionary entry, borrowing when already lowercase
fn normalize(entry: &str) -> Cow<'_, str> {
    if entry.chars().any(char::is_uppercase) {
        Cow::Owned(entry.to_lowercase())
    } else {
        Cow::Borrowed(entry)
    }
}

/// Every dictionary word that can be spelled from `drawn`
///
/// Entries are lowercased, deduplicated and sorted by (length, text).
///
/// # Examples
/// ```
/// use words_on_terminal::core::LetterCounts;
/// use words_on_terminal::game::sub_words;
///
/// let dictionary: Vec<String> = ["cat", "at", "a", "dog", "act"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let found = sub_words(&LetterCounts::new("cat"), &dictionary);
/// assert_eq!(found, vec!["a", "at", "act", "cat"]);
/// ```
#[must_use]
pub fn sub_words(drawn: &LetterCounts, dictionary: &[String]) -> Vec<String> {
    let mut found: Vec<String> = dictionary
        .par_iter()
        .filter_map(|entry| {
            let entry = normalize(entry);
            drawn.can_spell(&entry).then(|| entry.into_owned())
        })
        .collect();
    sort_round_order(&mut found);
    found
}

fn sort_round_order(words: &mut Vec<String>) {
    words.sort_by(|a, b| {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    });
    words.dedup();
}

/// Game state: the current round plus the scores of every round so far
///
/// The random source is a type parameter so tests can seed it.
pub struct Game<R = StdRng> {
    letters: Vec<char>,
    words: Vec<Word>,
    scores: ScoreBoard,
    active: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Game shuffled from operating-system entropy
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Game with reproducible shuffles
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            letters: Vec::new(),
            words: Vec::new(),
            scores: ScoreBoard::new(),
            active: false,
            rng,
        }
    }

    /// Drawn letters in their shuffled display order
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Words of the current round, sorted by (length, text)
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub const fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn found_count(&self) -> usize {
        self.words.iter().filter(|w| w.is_guessed()).count()
    }

    /// Pick a random dictionary word meeting the constraints and start a round
    ///
    /// Accepts the first word, in shuffled order, that is at least
    /// `min_length` characters long and spells between `min_words` and
    /// `max_words` dictionary words (inclusive, itself included).
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoCandidate` if no word qualifies. The current
    /// round is left untouched in that case.
    pub fn pick_random_word(
        &mut self,
        dictionary: &[String],
        min_length: usize,
        min_words: usize,
        max_words: usize,
    ) -> Result<(), RoundError> {
        let mut order: Vec<usize> = (0..dictionary.len()).collect();
        order.shuffle(&mut self.rng);

        for index in order {
            let word = normalize(&dictionary[index]);
            if word.chars().count() < min_length {
                continue;
            }
            let candidates = sub_words(&LetterCounts::new(&word), dictionary);
            if (min_words..=max_words).contains(&candidates.len()) {
                self.commit(&word, candidates);
                return Ok(());
            }
        }

        Err(RoundError::NoCandidate {
            min_length,
            min_words,
            max_words,
        })
    }

    /// Start a round drawing the letters of `word`
    ///
    /// The word itself is always guessable, even when it is missing from the
    /// dictionary.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyWord` if `word` is blank; the current round
    /// is left untouched.
    pub fn set_word(&mut self, word: &str, dictionary: &[String]) -> Result<(), RoundError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(RoundError::EmptyWord);
        }
        let candidates = sub_words(&LetterCounts::new(&word), dictionary);
        self.commit(&word, candidates);
        Ok(())
    }

    fn commit(&mut self, word: &str, mut candidates: Vec<String>) {
        candidates.push(word.to_string());
        sort_round_order(&mut candidates);

        let mut letters: Vec<char> = word.chars().collect();
        letters.shuffle(&mut self.rng);

        self.letters = letters;
        self.words = candidates.into_iter().map(Word::new).collect();
        self.active = true;

        info!(
            length = self.letters.len(),
            words = self.words.len(),
            "round started"
        );
    }

    /// Credit `player` with the word matching `text`, if any
    ///
    /// Matching ignores case and surrounding whitespace. Each word can be
    /// credited once; repeats and misses are ignored. Returns whether a word
    /// was credited.
    pub fn guess(&mut self, player: &str, text: &str) -> bool {
        if !self.active {
            return false;
        }
        let text = text.trim().to_lowercase();

        let Some(word) = self
            .words
            .iter_mut()
            .find(|w| !w.is_guessed() && w.letters() == text)
        else {
            return false;
        };

        word.mark_guessed(player);
        let points = word.len() as u32;
        self.scores.add(player, points);
        debug!(player, word = %word, points, "word found");
        true
    }

    /// Stop accepting guesses; the words stay visible until the next round
    pub fn end_round(&mut self) {
        if self.active {
            info!(
                found = self.found_count(),
                total = self.words.len(),
                "round ended"
            );
        }
        self.active = false;
    }

    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.words.iter().all(Word::is_guessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    fn letters_of(game: &Game) -> Vec<&str> {
        game.words().iter().map(Word::letters).collect()
    }

    #[test]
    fn set_word_derives_sorted_sub_words() {
        let dict = dictionary(&["cat", "at", "a", "dog"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert_eq!(letters_of(&game), vec!["a", "at", "cat"]);
        assert!(game.is_active());
        assert!(!game.is_round_complete());
    }

    #[test]
    fn set_word_case_folds_and_includes_itself() {
        let dict = dictionary(&["At", "a", "tea"]);
        let mut game = Game::seeded(1);
        game.set_word("CAT", &dict).unwrap();

        assert_eq!(letters_of(&game), vec!["a", "at", "cat"]);
    }

    #[test]
    fn set_word_deduplicates() {
        let dict = dictionary(&["at", "AT", "at", "cat", "a"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert_eq!(letters_of(&game), vec!["a", "at", "cat"]);
    }

    #[test]
    fn set_word_letters_are_a_permutation() {
        let dict = dictionary(&["listen"]);
        let mut game = Game::seeded(3);
        game.set_word("silent", &dict).unwrap();

        let mut drawn: Vec<char> = game.letters().to_vec();
        drawn.sort_unstable();
        let mut expected: Vec<char> = "silent".chars().collect();
        expected.sort_unstable();
        assert_eq!(drawn, expected);
        assert_eq!(letters_of(&game), vec!["listen", "silent"]);
    }

    #[test]
    fn set_word_rejects_blank_and_keeps_round() {
        let dict = dictionary(&["cat", "at"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();
        game.guess("Bob", "at");

        assert_eq!(game.set_word("   ", &dict), Err(RoundError::EmptyWord));
        assert_eq!(letters_of(&game), vec!["at", "cat"]);
        assert!(game.words()[0].is_guessed());
        assert!(game.is_active());
    }

    #[test]
    fn every_word_is_contained_in_drawn_letters() {
        let dict: Vec<String> = crate::wordlists::loader::words_from_slice(crate::wordlists::WORDS);
        let mut game = Game::seeded(11);
        game.set_word("painters", &dict).unwrap();

        let drawn = LetterCounts::new("painters");
        let words = letters_of(&game);
        assert!(words.len() > 10);
        for w in &words {
            assert!(drawn.can_spell(w), "{w} is not spellable from painters");
        }
        for pair in words.windows(2) {
            let key = |s: &str| (s.chars().count(), s.to_string());
            assert!(key(pair[0]) < key(pair[1]), "{pair:?} out of order");
        }
    }

    #[test]
    fn guess_normalizes_and_scores() {
        let dict = dictionary(&["cat", "at", "a", "dog"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert!(game.guess("Bob", "AT "));

        let words = game.words();
        assert!(!words[0].is_guessed());
        assert!(words[1].is_guessed());
        assert_eq!(words[1].guesser(), "Bob");
        assert!(!words[2].is_guessed());
        assert_eq!(game.scores().get("Bob"), 2);
    }

    #[test]
    fn repeated_guess_changes_nothing() {
        let dict = dictionary(&["cat", "at", "a"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert!(game.guess("Bob", "cat"));
        assert!(!game.guess("Bob", "cat"));
        assert!(!game.guess("Ann", "CAT"));

        assert_eq!(game.scores().get("Bob"), 3);
        assert_eq!(game.scores().get("Ann"), 0);
        assert_eq!(game.words()[2].guesser(), "Bob");
    }

    #[test]
    fn miss_is_ignored() {
        let dict = dictionary(&["cat", "at", "a"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert!(!game.guess("Bob", "dog"));
        assert!(!game.guess("Bob", ""));
        assert_eq!(game.found_count(), 0);
        assert!(game.scores().is_empty());
    }

    #[test]
    fn guesses_ignored_when_inactive() {
        let dict = dictionary(&["cat", "at"]);
        let mut game = Game::seeded(1);
        assert!(!game.guess("Bob", "cat"));

        game.set_word("cat", &dict).unwrap();
        game.end_round();
        game.end_round();
        assert!(!game.is_active());
        assert!(!game.guess("Bob", "cat"));
        assert_eq!(game.scores().get("Bob"), 0);
    }

    #[test]
    fn round_complete_when_all_found() {
        let dict = dictionary(&["cat", "at", "a"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        game.guess("Ann", "a");
        game.guess("Bob", "at");
        assert!(!game.is_round_complete());
        game.guess("Ann", "cat");
        assert!(game.is_round_complete());
        assert_eq!(game.scores().most_common(2), vec![("Ann", 4), ("Bob", 2)]);
    }

    #[test]
    fn empty_round_is_vacuously_complete() {
        let game = Game::seeded(1);
        assert!(game.words().is_empty());
        assert!(game.is_round_complete());
    }

    #[test]
    fn scores_persist_across_rounds() {
        let dict = dictionary(&["cat", "at", "dog", "go"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();
        game.guess("Bob", "cat");
        game.end_round();

        game.set_word("dog", &dict).unwrap();
        game.guess("Bob", "go");
        assert_eq!(game.scores().get("Bob"), 5);
        assert_eq!(letters_of(&game), vec!["go", "dog"]);
    }

    #[test]
    fn pick_fails_without_long_enough_word() {
        let dict = dictionary(&["cat", "at", "a", "dog"]);
        let mut game = Game::seeded(1);

        let err = game.pick_random_word(&dict, 20, 1, 1).unwrap_err();
        assert_eq!(
            err,
            RoundError::NoCandidate {
                min_length: 20,
                min_words: 1,
                max_words: 1,
            }
        );
        assert!(err.to_string().contains("min_length=20"));
        assert!(!game.is_active());
    }

    #[test]
    fn pick_failure_leaves_previous_round() {
        let dict = dictionary(&["cat", "at", "a"]);
        let mut game = Game::seeded(1);
        game.set_word("cat", &dict).unwrap();

        assert!(game.pick_random_word(&dict, 1, 50, 60).is_err());
        assert_eq!(letters_of(&game), vec!["a", "at", "cat"]);
        assert!(game.is_active());
    }

    #[test]
    fn pick_respects_word_count_window() {
        // "cat" spells 3 words, "at" spells 2, "a" spells 1
        let dict = dictionary(&["a", "at", "cat", "dog"]);
        for seed in 0..20 {
            let mut game = Game::seeded(seed);
            game.pick_random_word(&dict, 2, 3, 3).unwrap();
            assert_eq!(letters_of(&game), vec!["a", "at", "cat"]);
        }
    }

    #[test]
    fn pick_respects_min_length() {
        let dict = dictionary(&["a", "at", "cat", "dog", "stone", "notes", "one"]);
        for seed in 0..20 {
            let mut game = Game::seeded(seed);
            game.pick_random_word(&dict, 5, 1, 100).unwrap();
            assert_eq!(game.letters().len(), 5);
        }
    }

    #[test]
    fn pick_is_deterministic_for_seed() {
        let dict: Vec<String> = crate::wordlists::loader::words_from_slice(crate::wordlists::WORDS);
        let mut first = Game::seeded(42);
        let mut second = Game::seeded(42);
        first.pick_random_word(&dict, 6, 5, 9001).unwrap();
        second.pick_random_word(&dict, 6, 5, 9001).unwrap();

        assert_eq!(first.letters(), second.letters());
        assert_eq!(first.words(), second.words());
        assert!(first.words().len() >= 5);
    }

    #[test]
    fn sub_words_counts_multiplicity() {
        let dict = dictionary(&["tee", "teeter", "tree", "letter", "let"]);
        let found = sub_words(&LetterCounts::new("letter"), &dict);
        assert_eq!(found, vec!["let", "tee", "tree", "letter"]);
    }
}
