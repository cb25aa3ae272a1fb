//! Candidates command
//!
//! Surveys the dictionary for words that could be drawn under the current
//! round constraints. Useful for tuning `--min-words` and `--max-words`.

use crate::commands::RoundSettings;
use crate::core::LetterCounts;
use crate::game::sub_words;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of a dictionary survey
#[derive(Debug, Clone)]
pub struct CandidateSurvey {
    /// Distinct dictionary words examined
    pub scanned: usize,
    /// Words at least `min_length` long
    pub long_enough: usize,
    /// Long-enough words whose sub-word count is within bounds
    pub eligible: usize,
    /// Sub-word count to number of long-enough words with that count
    pub distribution: BTreeMap<usize, usize>,
    /// A few eligible words, richest first
    pub richest: Vec<(String, usize)>,
    pub duration: Duration,
}

/// How many of the richest eligible words to keep
const RICHEST_SHOWN: usize = 5;

/// Count how many dictionary words qualify as round words
///
/// # Panics
///
/// Panics if the progress bar template is malformed.
#[must_use]
pub fn survey_candidates(
    dictionary: &[String],
    settings: &RoundSettings,
    show_progress: bool,
) -> CandidateSurvey {
    let start = Instant::now();

    let mut distinct: Vec<&String> = dictionary.iter().collect();
    distinct.sort();
    distinct.dedup();

    let pb = if show_progress {
        ProgressBar::new(distinct.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let mut long_enough = 0;
    let mut eligible = 0;
    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();
    let mut richest: Vec<(String, usize)> = Vec::new();

    for word in &distinct {
        pb.inc(1);
        if word.chars().count() < settings.min_length {
            continue;
        }
        long_enough += 1;

        let count = sub_words(&LetterCounts::new(word), dictionary).len();
        *distribution.entry(count).or_insert(0) += 1;

        if (settings.min_words..=settings.max_words).contains(&count) {
            eligible += 1;
            richest.push(((*word).clone(), count));
        }
        pb.set_message(format!("{eligible} eligible"));
    }
    pb.finish_and_clear();

    richest.sort_by(|(w1, c1), (w2, c2)| c2.cmp(c1).then_with(|| w1.cmp(w2)));
    richest.truncate(RICHEST_SHOWN);

    CandidateSurvey {
        scanned: distinct.len(),
        long_enough,
        eligible,
        distribution,
        richest,
        duration: start.elapsed(),
    }
}
