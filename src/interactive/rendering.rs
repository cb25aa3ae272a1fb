//! TUI rendering with ratatui

use super::app::{App, MessageStyle, Phase, PlayMode};
use crate::output::formatters::{CELL_GAP, CELL_WIDTH, grid_columns, letters_line, word_cell};
use crate::output::{LEADERBOARD_SIZE, leaderboard_lines};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Title line text
#[must_use]
pub fn title_text(status: &str) -> String {
    format!(":: words on terminal :: {status} ::")
}

/// Main UI rendering function
pub fn ui<R: Rng>(f: &mut Frame, app: &App<'_, R>) {
    let title_height = u16::from(app.show_title);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(title_height), // Title
            Constraint::Length(3),            // Letters
            Constraint::Length(3),            // Clock
            Constraint::Min(8),               // Words and side panels
            Constraint::Length(3),            // Input or phase
        ])
        .split(f.area());

    if app.show_title {
        render_title(f, app, chunks[0]);
    }
    render_letters(f, app, chunks[1]);
    render_clock(f, app, chunks[2]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[3]);
    render_words(f, app, main_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);
    render_leaderboard(f, app, side_chunks[0]);
    render_messages(f, app, side_chunks[1]);

    render_input(f, app, chunks[4]);
}

fn render_title<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let title = Paragraph::new(title_text(&app.status))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_letters<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let letters = Paragraph::new(letters_line(app.game.letters()))
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Letters ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(letters, area);
}

fn render_clock<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let (title, remaining, duration, color) = match &app.phase {
        Phase::Playing => (
            " Time ",
            app.timer.remaining_seconds(),
            app.timer.duration_seconds(),
            Color::Green,
        ),
        Phase::AwaitingEnter => (" Round over ", 0.0, 1.0, Color::DarkGray),
        Phase::Intermission(pause) => (
            " Next round ",
            pause.remaining_seconds(),
            pause.duration_seconds(),
            Color::Magenta,
        ),
    };
    let remaining = remaining.max(0.0);
    let ratio = if duration > 0.0 {
        (remaining / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{remaining:.0}s"));
    f.render_widget(gauge, area);
}

fn render_words<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let active = app.game.is_active();
    let columns = grid_columns(usize::from(area.width.saturating_sub(2)));
    let gap = " ".repeat(CELL_GAP);

    let lines: Vec<Line> = app
        .game
        .words()
        .chunks(columns)
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, word) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(gap.clone()));
                }
                let style = if word.is_guessed() {
                    Style::default().fg(Color::Green)
                } else if active {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Red)
                };
                spans.push(Span::styled(
                    format!("{:<CELL_WIDTH$}", word_cell(word, active)),
                    style,
                ));
            }
            Line::from(spans)
        })
        .collect();

    let title = format!(
        " Words {}/{} ",
        app.game.found_count(),
        app.game.words().len()
    );
    let words = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(words, area);
}

fn render_leaderboard<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let items: Vec<ListItem> = leaderboard_lines(app.game.scores(), LEADERBOARD_SIZE)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let leaderboard = List::new(items).block(
        Block::default()
            .title(" Leaderboard ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(leaderboard, area);
}

fn render_messages<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Events ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_input<R: Rng>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let (title, content, color) = match (&app.phase, app.mode) {
        (Phase::Playing, PlayMode::Local) => (
            " Your guess | Enter: submit | Esc: quit ",
            app.input_buffer.clone(),
            Color::Yellow,
        ),
        (Phase::Playing, PlayMode::Chat) => (
            " Type your guesses in chat | Esc: quit ",
            String::new(),
            Color::Yellow,
        ),
        (Phase::AwaitingEnter, _) => (
            " Press Enter for the next round | Esc: quit ",
            String::new(),
            Color::Green,
        ),
        (Phase::Intermission(pause), _) => (
            " Round over | Esc: quit ",
            format!(
                "Next round in {:.0}s",
                pause.remaining_seconds().max(0.0)
            ),
            Color::Magenta,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(input, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::RoundSettings;
    use crate::game::Game;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn title_format() {
        assert_eq!(title_text("#chan"), ":: words on terminal :: #chan ::");
    }

    #[test]
    fn renders_round() {
        let dict: Vec<String> = ["cat", "at", "a"].iter().map(ToString::to_string).collect();
        let settings = RoundSettings {
            first_word: Some("cat".to_string()),
            ..RoundSettings::default()
        };
        let mut app = App::new(Game::seeded(2), &dict, settings, PlayMode::Local, "local");
        app.start_round().unwrap();
        app.handle_guess("ann", "at");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains(":: words on terminal :: local ::"));
        assert!(text.contains("AT  (ann)"));
        assert!(text.contains("___"));
        assert!(text.contains("Words 1/3"));
    }

    #[test]
    fn hidden_title() {
        let dict: Vec<String> = ["cat", "at", "a"].iter().map(ToString::to_string).collect();
        let settings = RoundSettings {
            first_word: Some("cat".to_string()),
            ..RoundSettings::default()
        };
        let mut app = App::new(Game::seeded(2), &dict, settings, PlayMode::Chat, "#chan");
        app.show_title = false;
        app.start_round().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        assert!(!screen_text(&terminal).contains("words on terminal"));
    }
}
