//! TUI application state and logic

use crate::chat::{ChatClient, Transport};
use crate::commands::{LOCAL_PLAYER, RoundSettings, start_round};
use crate::game::{Game, RoundTimer};
use crate::output::round_summary_line;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, trace};

/// How long to wait on the chat connection per frame
pub const CHAT_POLL: Duration = Duration::from_millis(250);

/// How long to wait for a key per frame in local play
const KEY_POLL: Duration = Duration::from_millis(100);

/// Events kept for the messages panel
const MAX_MESSAGES: usize = 8;

/// Where guesses come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Typed at the keyboard
    Local,
    /// Chat messages in a channel
    Chat,
}

#[derive(Debug, Clone)]
pub enum Phase {
    Playing,
    /// Round over, waiting for Enter (local play)
    AwaitingEnter,
    /// Round over, next one starts when the timer expires (chat play)
    Intermission(RoundTimer),
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App<'a, R = StdRng> {
    pub game: Game<R>,
    pub dictionary: &'a [String],
    pub settings: RoundSettings,
    pub mode: PlayMode,
    pub timer: RoundTimer,
    pub phase: Phase,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    /// Shown in the title line
    pub status: String,
    pub show_title: bool,
    pub end_screen_duration: f64,
    pub should_quit: bool,
}

impl<'a, R: Rng> App<'a, R> {
    #[must_use]
    pub fn new(
        game: Game<R>,
        dictionary: &'a [String],
        settings: RoundSettings,
        mode: PlayMode,
        status: impl Into<String>,
    ) -> Self {
        let timer = RoundTimer::new(settings.round_duration);
        Self {
            game,
            dictionary,
            settings,
            mode,
            timer,
            phase: Phase::Playing,
            input_buffer: String::new(),
            messages: Vec::new(),
            status: status.into(),
            show_title: true,
            end_screen_duration: 10.0,
            should_quit: false,
        }
    }

    /// Start the next round and restart the clock
    ///
    /// # Errors
    ///
    /// Returns an error if no dictionary word qualifies.
    pub fn start_round(&mut self) -> Result<()> {
        start_round(&mut self.game, self.dictionary, &mut self.settings).with_context(|| {
            format!(
                "Cannot start a round with min_length={} max_words={}",
                self.settings.min_length, self.settings.max_words
            )
        })?;
        self.timer.reset();
        self.phase = Phase::Playing;
        self.input_buffer.clear();

        let words = self.game.words().len();
        self.add_message(
            &format!(
                "New round: {} letters, {words} {}",
                self.game.letters().len(),
                if words == 1 { "word" } else { "words" }
            ),
            MessageStyle::Info,
        );
        Ok(())
    }

    /// Submit a guess by `player`; discarded between rounds
    pub fn handle_guess(&mut self, player: &str, text: &str) -> bool {
        if !matches!(self.phase, Phase::Playing) {
            trace!(player, text, "guess between rounds discarded");
            return false;
        }
        if !self.game.guess(player, text) {
            return false;
        }

        self.add_message(
            &format!("{player} found {}", text.trim().to_uppercase()),
            MessageStyle::Success,
        );
        if self.game.is_round_complete() {
            self.finish_round();
        }
        true
    }

    /// Advance clocks: end an expired round, start the next after an intermission
    ///
    /// # Errors
    ///
    /// Returns an error if the next round cannot be started.
    pub fn tick(&mut self) -> Result<()> {
        let due = match &self.phase {
            Phase::Playing => self.timer.expired(),
            Phase::AwaitingEnter => false,
            Phase::Intermission(pause) => pause.expired(),
        };
        if !due {
            return Ok(());
        }
        if matches!(self.phase, Phase::Playing) {
            self.finish_round();
            Ok(())
        } else {
            self.start_round()
        }
    }

    fn finish_round(&mut self) {
        self.game.end_round();
        let summary = round_summary_line(&self.game);
        self.add_message(&summary, MessageStyle::Success);

        self.phase = match self.mode {
            PlayMode::Local => Phase::AwaitingEnter,
            PlayMode::Chat => Phase::Intermission(RoundTimer::new(self.end_screen_duration)),
        };
    }

    /// Apply one key press
    ///
    /// # Errors
    ///
    /// Returns an error if Enter starts a round that cannot be started.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            _ if self.mode == PlayMode::Chat => {}
            KeyCode::Enter => match self.phase {
                Phase::Playing => {
                    let input = std::mem::take(&mut self.input_buffer);
                    if !input.trim().is_empty() && !self.handle_guess(LOCAL_PLAYER, &input) {
                        self.add_message(
                            &format!("{} is not in this round", input.trim().to_uppercase()),
                            MessageStyle::Error,
                        );
                    }
                }
                Phase::AwaitingEnter => self.start_round()?,
                Phase::Intermission(_) => {}
            },
            KeyCode::Char(c) if matches!(self.phase, Phase::Playing) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
        Ok(())
    }

    /// Read the chat once and take every message as a guess by its sender
    ///
    /// Returns how many guesses were credited.
    ///
    /// # Errors
    ///
    /// Returns an error if the chat connection failed.
    pub fn poll_chat<T: Transport>(
        &mut self,
        client: &mut ChatClient<T>,
        timeout: Duration,
    ) -> Result<usize> {
        let messages = client.poll(timeout).context("Chat connection failed")?;
        let mut credited = 0;
        for message in messages {
            debug!(sender = %message.sender, text = %message.text, "chat guess");
            if self.handle_guess(&message.sender, &message.text) {
                credited += 1;
            }
        }
        Ok(credited)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application until the player quits
///
/// With a chat client, every chat message is a guess by its sender.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails, the chat connection
/// fails, or a round cannot be started.
pub fn run_tui<R: Rng, T: Transport>(
    app: &mut App<'_, R>,
    chat: Option<&mut ChatClient<T>>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, chat);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, R: Rng, T: Transport>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, R>,
    mut chat: Option<&mut ChatClient<T>>,
) -> Result<()> {
    app.start_round()?;

    while !app.should_quit {
        terminal.draw(|f| super::rendering::ui(f, app))?;

        let key_wait = if let Some(client) = chat.as_deref_mut() {
            app.poll_chat(client, CHAT_POLL)?;
            Duration::ZERO
        } else {
            KEY_POLL
        };

        if event::poll(key_wait)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key)?;
        }

        app.tick()?;
    }

    app.game.end_round();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{ErrorKind, Read, Write};

    /// Stream that replays chat chunks, then times out or hangs up
    #[derive(Default)]
    struct ChatScript {
        reads: VecDeque<Vec<u8>>,
        written: Vec<u8>,
        hang_up: bool,
    }

    impl ChatScript {
        fn new(chunks: &[&str], hang_up: bool) -> Self {
            Self {
                reads: chunks.iter().map(|c| c.as_bytes().to_vec()).collect(),
                written: Vec::new(),
                hang_up,
            }
        }
    }

    impl Read for ChatScript {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.reads.pop_front() {
                Some(bytes) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                None if self.hang_up => Ok(0),
                None => Err(io::Error::new(ErrorKind::WouldBlock, "no data")),
            }
        }
    }

    impl Write for ChatScript {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Transport for ChatScript {
        fn set_read_timeout(&mut self, _timeout: Option<Duration>) -> io::Result<()> {
            Ok(())
        }

        fn close(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn dictionary() -> Vec<String> {
        ["cat", "at", "a", "stone", "notes", "one"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn app(dict: &[String], mode: PlayMode) -> App<'_> {
        let settings = RoundSettings {
            first_word: Some("cat".to_string()),
            ..RoundSettings::default()
        };
        let mut app = App::new(Game::seeded(9), dict, settings, mode, "local");
        app.start_round().unwrap();
        app
    }

    fn press(app: &mut App<'_>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_word(app: &mut App<'_>, word: &str) {
        for c in word.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn typed_guess_credits_local_player() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Local);

        type_word(&mut app, "at");
        assert_eq!(app.game.scores().get(LOCAL_PLAYER), 2);
        assert!(app.input_buffer.is_empty());
        assert!(matches!(app.messages.last().unwrap().style, MessageStyle::Success));
    }

    #[test]
    fn miss_reports_error() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Local);

        type_word(&mut app, "dog");
        assert!(app.game.scores().is_empty());
        assert!(matches!(app.messages.last().unwrap().style, MessageStyle::Error));
    }

    #[test]
    fn backspace_edits_input() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Local);

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input_buffer, "c");
    }

    #[test]
    fn completing_round_waits_for_enter() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Local);

        type_word(&mut app, "a");
        type_word(&mut app, "at");
        type_word(&mut app, "cat");
        assert!(matches!(app.phase, Phase::AwaitingEnter));
        assert!(!app.game.is_active());
        assert_eq!(
            app.messages.last().unwrap().text,
            "You managed to find 3/3 words! Good job!"
        );

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.phase, Phase::Playing));
        assert_eq!(app.game.letters().len(), 5);
    }

    #[test]
    fn expired_round_ends_on_tick() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Local);
        app.timer = RoundTimer::new(0.0);

        app.tick().unwrap();
        assert!(matches!(app.phase, Phase::AwaitingEnter));
        assert!(!app.game.is_active());
    }

    #[test]
    fn chat_intermission_discards_guesses_then_restarts() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);
        app.end_screen_duration = 0.0;

        assert!(app.handle_guess("ann", "a"));
        assert!(app.handle_guess("bob", "at"));
        assert!(app.handle_guess("ann", "cat"));
        assert!(matches!(app.phase, Phase::Intermission(_)));

        assert!(!app.handle_guess("bob", "cat"));
        assert_eq!(app.game.scores().get("ann"), 4);
        assert_eq!(app.game.scores().get("bob"), 2);

        app.tick().unwrap();
        assert!(matches!(app.phase, Phase::Playing));
        assert!(app.game.is_active());
    }

    #[test]
    fn chat_mode_ignores_typing() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);

        type_word(&mut app, "at");
        assert!(app.input_buffer.is_empty());
        assert!(app.game.scores().is_empty());
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = self::app(&dict, PlayMode::Local);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn chat_messages_become_guesses() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);
        let mut client = ChatClient::new(ChatScript::new(
            &[
                "@display-name=Ann :ann!ann@x PRIVMSG #chan :AT\r\n\
                 PING :tmi.twitch.tv\r\n\
                 :bob!bob@x PRIVMSG #chan :dog\r\n\
                 :bob!bob@x PRIVMSG #chan :c",
                "at\r\n",
            ],
            false,
        ));

        assert_eq!(app.poll_chat(&mut client, CHAT_POLL).unwrap(), 1);
        assert_eq!(app.game.scores().get("Ann"), 2);
        assert_eq!(
            String::from_utf8(client.get_ref().written.clone()).unwrap(),
            "PONG :tmi.twitch.tv\r\n"
        );

        assert_eq!(app.poll_chat(&mut client, CHAT_POLL).unwrap(), 1);
        assert_eq!(app.game.scores().get("bob"), 3);

        // nothing to read is a quiet frame
        assert_eq!(app.poll_chat(&mut client, CHAT_POLL).unwrap(), 0);
    }

    #[test]
    fn chat_guesses_complete_the_round() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);
        let mut client = ChatClient::new(ChatScript::new(
            &[":ann!ann@x PRIVMSG #chan :a\r\n\
               :bob!bob@x PRIVMSG #chan :at\r\n\
               :ann!ann@x PRIVMSG #chan :cat\r\n\
               :bob!bob@x PRIVMSG #chan :cat\r\n"],
            false,
        ));

        assert_eq!(app.poll_chat(&mut client, CHAT_POLL).unwrap(), 3);
        assert!(matches!(app.phase, Phase::Intermission(_)));
        assert_eq!(app.game.scores().get("ann"), 4);
        assert_eq!(app.game.scores().get("bob"), 2);
    }

    #[test]
    fn chat_hang_up_is_an_error() {
        let dict = dictionary();
        let mut app = app(&dict, PlayMode::Chat);
        let mut client = ChatClient::new(ChatScript::new(&[], true));

        let err = app.poll_chat(&mut client, CHAT_POLL).unwrap_err();
        assert!(err.to_string().contains("Chat connection failed"));
    }
}
