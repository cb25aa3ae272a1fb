//! Words command
//!
//! Lists everything that can be spelled from a word's letters.

use crate::core::LetterCounts;
use crate::game::{RoundError, sub_words};
use std::collections::BTreeMap;

/// Sub-words of one word, grouped for display
#[derive(Debug, Clone)]
pub struct SubWordReport {
    pub word: String,
    /// Sub-words keyed by length, each group alphabetical
    pub by_length: BTreeMap<usize, Vec<String>>,
    pub total: usize,
    /// Points available if every word is found
    pub max_score: usize,
}

/// Collect the sub-words of `word`
///
/// The word itself is always included, as it is in a round.
///
/// # Errors
///
/// Returns `RoundError::EmptyWord` for a blank word.
///
/// # Examples
/// ```
/// use words_on_terminal::commands::list_sub_words;
///
/// let dictionary: Vec<String> = ["cat", "at", "a", "dog"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let report = list_sub_words("cat", &dictionary).unwrap();
/// assert_eq!(report.total, 3);
/// assert_eq!(report.max_score, 6);
/// ```
pub fn list_sub_words(word: &str, dictionary: &[String]) -> Result<SubWordReport, RoundError> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(RoundError::EmptyWord);
    }

    let mut found = sub_words(&LetterCounts::new(&word), dictionary);
    if !found.contains(&word) {
        found.push(word.clone());
    }

    let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for w in found {
        by_length.entry(w.chars().count()).or_default().push(w);
    }
    for group in by_length.values_mut() {
        group.sort();
    }

    let total = by_length.values().map(Vec::len).sum();
    let max_score = by_length
        .iter()
        .map(|(length, group)| length * group.len())
        .sum();

    Ok(SubWordReport {
        word,
        by_length,
        total,
        max_score,
    })
}
