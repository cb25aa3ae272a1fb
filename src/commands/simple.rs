//! Simple line mode
//!
//! Text-based local play without the TUI: one guess per line from stdin.

use super::rounds::{LOCAL_PLAYER, RoundSettings, start_round};
use crate::game::{Game, RoundTimer};
use crate::output::{print_final, print_round_summary, print_round_view};
use anyhow::{Context, Result};
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run line mode on stdin until end of input
///
/// # Errors
///
/// Returns an error if no round can be started or reading stdin fails.
pub fn run_simple(dictionary: &[String], mut settings: RoundSettings, seed: Option<u64>) -> Result<()> {
    let mut game = seed.map_or_else(Game::new, Game::seeded);
    let stdin = io::stdin();
    play_lines(&mut game, dictionary, &mut settings, &mut stdin.lock())
}

/// Play rounds reading guesses from `input`
///
/// Each round runs until every word is found or the clock runs out; the
/// clock is checked after each guess. A blank line between rounds starts the
/// next one. End of input ends the game.
///
/// # Errors
///
/// Returns an error if no round can be started or reading `input` fails.
pub fn play_lines<R: Rng, I: BufRead>(
    game: &mut Game<R>,
    dictionary: &[String],
    settings: &mut RoundSettings,
    input: &mut I,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Words on Terminal - Line Mode                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Spell as many words as you can from the letters shown.");
    println!("Longer words score more. End input (Ctrl-D) to quit.\n");

    loop {
        start_round(game, dictionary, settings).with_context(|| {
            format!(
                "Cannot start a round with min_length={} max_words={}",
                settings.min_length, settings.max_words
            )
        })?;
        let timer = RoundTimer::new(settings.round_duration);

        loop {
            print_round_view(game, &timer);
            let Some(line) = read_line(input, "Guess")? else {
                game.end_round();
                print_final(game.scores());
                return Ok(());
            };

            if game.guess(LOCAL_PLAYER, &line) {
                println!("{}", format!("✓ {}", line.trim().to_uppercase()).green());
            } else if !line.trim().is_empty() {
                debug!(guess = %line.trim(), "no match");
                println!("{}", "✗ not in this round".bright_black());
            }

            if game.is_round_complete() || timer.expired() {
                break;
            }
        }

        game.end_round();
        print_round_view(game, &timer);
        print_round_summary(game);

        if read_line(input, "Press Enter for the next round")?.is_none() {
            print_final(game.scores());
            return Ok(());
        }
    }
}

/// Prompt and read one line; `None` at end of input
fn read_line<I: BufRead>(input: &mut I, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
