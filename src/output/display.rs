//! Display functions for line mode and command results

use super::formatters::{create_progress_bar, grid_columns, grid_rows, letters_line, word_cell};
use crate::commands::{CandidateSurvey, SubWordReport};
use crate::game::{Game, RoundTimer, ScoreBoard};
use colored::Colorize;
use rand::Rng;

/// Entries shown on a leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// Width used when printing the word grid in line mode
const LINE_WIDTH: usize = 80;

/// End-of-round message
#[must_use]
pub fn round_summary_line<R: Rng>(game: &Game<R>) -> String {
    format!(
        "You managed to find {}/{} words! Good job!",
        game.found_count(),
        game.words().len()
    )
}

/// Leaderboard rows as `rank. player score`
#[must_use]
pub fn leaderboard_lines(scores: &ScoreBoard, limit: usize) -> Vec<String> {
    scores
        .most_common(limit)
        .into_iter()
        .enumerate()
        .map(|(i, (player, score))| format!("{:>2}. {player:<12} {score}", i + 1))
        .collect()
}

/// Print the letters, the clock and the word grid
pub fn print_round_view<R: Rng>(game: &Game<R>, timer: &RoundTimer) {
    println!("\n{}", "─".repeat(LINE_WIDTH).cyan());
    println!(
        "Letters: {}",
        letters_line(game.letters()).bright_yellow().bold()
    );

    let remaining = timer.remaining_seconds().max(0.0);
    println!(
        "Time:    [{}] {remaining:.0}s",
        create_progress_bar(remaining, timer.duration_seconds(), 30).green()
    );
    println!("{}", "─".repeat(LINE_WIDTH).cyan());

    let cells: Vec<String> = game
        .words()
        .iter()
        .map(|w| word_cell(w, game.is_active()))
        .collect();
    for row in grid_rows(&cells, grid_columns(LINE_WIDTH)) {
        println!("{row}");
    }
    println!();
}

/// Print the summary shown between rounds
pub fn print_round_summary<R: Rng>(game: &Game<R>) {
    println!("\n{}", round_summary_line(game).bright_green().bold());
    print_leaderboard(game.scores());
}

fn print_leaderboard(scores: &ScoreBoard) {
    println!("\n{}", "LEADERBOARD".bright_cyan().bold());
    if scores.is_empty() {
        println!("   {}", "no points scored".bright_black());
        return;
    }
    for line in leaderboard_lines(scores, LEADERBOARD_SIZE) {
        println!("   {line}");
    }
}

/// Print the final leaderboard when the game ends
pub fn print_final(scores: &ScoreBoard) {
    println!("\n{}", "═".repeat(40).cyan());
    print_leaderboard(scores);
    println!("{}", "═".repeat(40).cyan());
    println!("{}\n", "GG!".bright_yellow().bold());
}

/// Print the sub-words of a word
pub fn print_sub_words(report: &SubWordReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "SUB-WORDS OF".bright_cyan().bold(),
        report.word.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    for (length, group) in &report.by_length {
        let words: Vec<String> = group.iter().map(|w| w.to_uppercase()).collect();
        println!("\n{}", format!("{length} letters ({})", group.len()).bold());
        for row in grid_rows(&words, grid_columns(LINE_WIDTH)) {
            println!("   {row}");
        }
    }

    println!("\n   Total words:  {}", report.total.to_string().bright_yellow());
    println!(
        "   Max score:    {}",
        report.max_score.to_string().bright_yellow()
    );
}

/// Print the result of a candidate survey
pub fn print_candidate_survey(survey: &CandidateSurvey) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "CANDIDATE SURVEY".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Words scanned:    {}", survey.scanned);
    println!("   Long enough:      {}", survey.long_enough);
    println!(
        "   Eligible:         {}",
        survey.eligible.to_string().bright_yellow().bold()
    );
    println!("   Time taken:       {:.2}s", survey.duration.as_secs_f64());

    if !survey.richest.is_empty() {
        println!("\n{}", "Richest:".bright_cyan().bold());
        for (word, count) in &survey.richest {
            println!("   {:<16} {count}", word.to_uppercase());
        }
    }

    if survey.long_enough == 0 {
        return;
    }
    println!("\n{}", "Sub-word counts:".bright_cyan().bold());
    for (&count, &words) in &survey.distribution {
        let pct = (words as f64 / survey.long_enough as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {count:4}: {bar} {words:5} ({pct:5.1}%)");
    }
}
