//! Letter multisets
//!
//! A `LetterCounts` records how many times each character occurs in a word.
//! Sub-word derivation is a containment test between two of these.

use rustc_hash::FxHashMap;

/// Multiset of characters with per-character occurrence counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: FxHashMap<char, u32>,
    total: usize,
}

impl LetterCounts {
    /// Count the characters of `text` as given (no case folding)
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::core::LetterCounts;
    ///
    /// let counts = LetterCounts::new("speed");
    /// assert_eq!(counts.count('e'), 2);
    /// assert_eq!(counts.count('z'), 0);
    /// assert_eq!(counts.len(), 5);
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut counts: FxHashMap<char, u32> = FxHashMap::default();
        let mut total = 0;
        for ch in text.chars() {
            *counts.entry(ch).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Number of occurrences of `ch`
    #[inline]
    #[must_use]
    pub fn count(&self, ch: char) -> u32 {
        self.counts.get(&ch).copied().unwrap_or(0)
    }

    /// Total number of characters, counting repeats
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// True when every character of `self` is available in `other` at least
    /// as many times
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if self.total > other.total {
            return false;
        }
        self.counts
            .iter()
            .all(|(&ch, &count)| count <= other.count(ch))
    }

    /// True when `word` can be spelled from these letters
    ///
    /// Rejects on length before counting anything.
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::core::LetterCounts;
    ///
    /// let drawn = LetterCounts::new("cat");
    /// assert!(drawn.can_spell("act"));
    /// assert!(drawn.can_spell("at"));
    /// assert!(!drawn.can_spell("tact"));
    /// assert!(!drawn.can_spell("dog"));
    /// ```
    #[must_use]
    pub fn can_spell(&self, word: &str) -> bool {
        if word.chars().count() > self.total {
            return false;
        }
        Self::new(word).is_subset_of(self)
    }
}
