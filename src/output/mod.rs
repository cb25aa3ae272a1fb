//! Terminal output formatting
//!
//! Display utilities for line mode, analysis results and the word grid.

pub mod display;
pub mod formatters;

pub use display::{
    LEADERBOARD_SIZE, leaderboard_lines, print_candidate_survey, print_final, print_round_summary,
    print_round_view, print_sub_words, round_summary_line,
};
