//! Word list loading utilities
//!
//! A dictionary is a flat list of lowercase words. Files may put several
//! words on one line; any whitespace separates entries.

use std::fs;
use std::io;
use std::path::Path;

/// Load a dictionary from a file
///
/// Every whitespace-separated token becomes one lowercased entry. Order is
/// preserved and duplicates are kept; the round engine deduplicates.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use words_on_terminal::wordlists::loader::load_from_file;
///
/// let words = load_from_file("WORDS.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_text(&content))
}

/// Split text into dictionary entries
#[must_use]
pub fn words_from_text(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Convert embedded string slice to an owned dictionary
///
/// # Examples
/// ```
/// use words_on_terminal::wordlists::loader::words_from_slice;
/// use words_on_terminal::wordlists::WORDS;
///
/// let words = words_from_slice(WORDS);
/// assert_eq!(words.len(), WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<String> {
    slice.iter().map(|&s| s.to_lowercase()).collect()
}
