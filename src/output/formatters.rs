//! Formatting utilities shared by the terminal UI and line mode

use crate::core::Word;

/// Width of one cell in the word grid
pub const CELL_WIDTH: usize = 24;

/// Gap between grid cells
pub const CELL_GAP: usize = 2;

/// Longest player name shown next to a found word
pub const NAME_WIDTH: usize = 12;

/// Shorten a player name to at most `max_len` characters
///
/// Long names keep as much of their start as fits, followed by the number
/// of characters left out and the final character.
///
/// # Examples
/// ```
/// use words_on_terminal::output::formatters::truncate_username;
///
/// assert_eq!(truncate_username("username", 12), "username");
/// assert_eq!(truncate_username("username", 3), "u6e");
/// assert_eq!(truncate_username("abcdefghi_abcdefghi_abcde", 12), "abcdefghi15e");
/// ```
#[must_use]
pub fn truncate_username(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        return name.to_string();
    }
    let last = chars[chars.len() - 1];
    let shorten = |head: usize| {
        let kept: String = chars[..head].iter().collect();
        format!("{kept}{}{last}", chars.len() - head - 1)
    };

    let head = (1..chars.len())
        .take_while(|&head| shorten(head).chars().count() <= max_len)
        .last()
        .unwrap_or(0);
    shorten(head)
}

/// Text for one word in the grid
///
/// Found words show their finder; unfound words are blanks while the round
/// runs and revealed once it ends.
#[must_use]
pub fn word_cell(word: &Word, round_active: bool) -> String {
    if word.is_guessed() {
        format!(
            "{}  ({})",
            word.letters().to_uppercase(),
            truncate_username(word.guesser(), NAME_WIDTH)
        )
    } else if round_active {
        "_".repeat(word.len())
    } else {
        word.letters().to_uppercase()
    }
}

/// Drawn letters, uppercased and spaced out
#[must_use]
pub fn letters_line(letters: &[char]) -> String {
    letters
        .iter()
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// How many grid columns fit in `width` terminal cells
#[must_use]
pub const fn grid_columns(width: usize) -> usize {
    let columns = width / (CELL_WIDTH + CELL_GAP);
    if columns == 0 { 1 } else { columns }
}

/// Lay out cells row by row, each padded to the cell width
#[must_use]
pub fn grid_rows(cells: &[String], columns: usize) -> Vec<String> {
    cells
        .chunks(columns.max(1))
        .map(|row| {
            row.iter()
                .map(|cell| format!("{cell:<CELL_WIDTH$}"))
                .collect::<Vec<_>>()
                .join(&" ".repeat(CELL_GAP))
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
