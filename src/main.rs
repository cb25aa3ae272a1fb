//! Words on Terminal - CLI
//!
//! Spell words from a shuffled set of letters, alone at the keyboard or with
//! a whole chat channel.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use words_on_terminal::{
    chat::{ChatClient, ConnectConfig},
    commands::{RoundSettings, list_sub_words, run_simple, survey_candidates},
    game::Game,
    interactive::{App, PlayMode, run_tui},
    output::{print_candidate_survey, print_final, print_sub_words},
    wordlists::{
        WORDS,
        loader::{load_from_file, words_from_slice},
    },
};

#[derive(Parser)]
#[command(
    name = "words_on_terminal",
    about = "Find every word hidden in a handful of letters, solo or with a chat channel",
    version,
    author,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for `play` when no subcommand is given
    #[command(flatten)]
    play: PlayArgs,

    /// Wordlist: 'embedded' (default) or path to a whitespace-separated file
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Terminal UI game (default); joins a chat channel with --channel
    Play(PlayArgs),

    /// Line mode: one guess per line from stdin
    Simple(RoundArgs),

    /// List every word that can be spelled from a word's letters
    Words {
        /// Word to take apart
        word: String,
    },

    /// Survey the wordlist for words that qualify as round words
    Candidates(RoundArgs),
}

/// Round selection options
#[derive(Args, Clone)]
struct RoundArgs {
    /// Seconds per round
    #[arg(short = 'd', long, default_value_t = 120.0, value_parser = parse_seconds)]
    round_duration: f64,

    /// Shortest word that can be drawn
    #[arg(long, default_value_t = 5)]
    min_length: usize,

    /// Fewest words a drawn word must contain
    #[arg(long, default_value_t = 1)]
    min_words: usize,

    /// Most words a drawn word may contain
    #[arg(long, default_value_t = 9001)]
    max_words: usize,

    /// Word for the first round instead of a random one
    #[arg(long)]
    word: Option<String>,

    /// Seed for reproducible letter and word shuffles
    #[arg(long)]
    seed: Option<u64>,
}

impl RoundArgs {
    fn settings(&self) -> RoundSettings {
        RoundSettings {
            round_duration: self.round_duration,
            min_length: self.min_length,
            min_words: self.min_words,
            max_words: self.max_words,
            first_word: self.word.clone(),
        }
    }

    fn game(&self) -> Game {
        self.seed.map_or_else(Game::new, Game::seeded)
    }
}

#[derive(Args, Clone)]
struct PlayArgs {
    #[command(flatten)]
    round: RoundArgs,

    /// Chat channel to play in; plays locally when omitted
    #[arg(short, long, value_parser = parse_channel)]
    channel: Option<String>,

    /// Chat server
    #[arg(long, default_value = "irc.chat.twitch.tv")]
    server: String,

    /// Chat server port
    #[arg(long, default_value_t = 6667)]
    port: u16,

    /// Login name; justinfan names connect anonymously
    #[arg(short, long, default_value = "justinfan123")]
    username: String,

    /// Seconds the end-of-round screen stays up in chat play
    #[arg(long, default_value_t = 10.0, value_parser = parse_seconds)]
    end_screen_duration: f64,

    /// Hide the title line
    #[arg(long)]
    no_title: bool,
}

/// Durations are finite, non-negative seconds
fn parse_seconds(text: &str) -> Result<f64, String> {
    let seconds: f64 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number of seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{text}' must be a finite, non-negative number of seconds"));
    }
    Ok(seconds)
}

/// Channel names are ASCII letters, digits and underscores
fn parse_channel(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("channel name cannot be empty".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "invalid channel name '{name}': use letters, digits and underscores only"
        ));
    }
    Ok(name.to_lowercase())
}

/// Send logs to `log_file`, or to stderr at `default_level`
///
/// `RUST_LOG` overrides the level either way.
fn init_logging(log_file: Option<&Path>, default_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    if let Some(path) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file {}", path.display()))?;
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow!("Cannot install log subscriber: {e}"))?;
    } else {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow!("Cannot install log subscriber: {e}"))?;
    }
    Ok(())
}

/// Load the dictionary named by `--wordlist`
fn load_dictionary(wordlist: &str) -> Result<Vec<String>> {
    let words = match wordlist {
        "embedded" => words_from_slice(WORDS),
        path => load_from_file(path).with_context(|| format!("Cannot read wordlist {path}"))?,
    };
    if words.is_empty() {
        bail!("Wordlist '{wordlist}' contains no words");
    }
    info!(wordlist, words = words.len(), "dictionary loaded");
    Ok(words)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play(cli.play));

    // The terminal UI owns the screen, so it logs nowhere unless asked
    let default_level = if matches!(command, Commands::Play(_)) {
        "off"
    } else {
        "warn"
    };
    init_logging(cli.log_file.as_deref(), default_level)?;

    let dictionary = load_dictionary(&cli.wordlist)?;

    match command {
        Commands::Play(args) => run_play_command(&dictionary, &args),
        Commands::Simple(round) => run_simple(&dictionary, round.settings(), round.seed),
        Commands::Words { word } => {
            let report = list_sub_words(&word, &dictionary)?;
            print_sub_words(&report);
            Ok(())
        }
        Commands::Candidates(round) => {
            let survey = survey_candidates(&dictionary, &round.settings(), true);
            print_candidate_survey(&survey);
            Ok(())
        }
    }
}

fn run_play_command(dictionary: &[String], args: &PlayArgs) -> Result<()> {
    let (mode, status, mut client) = if let Some(channel) = &args.channel {
        let config = ConnectConfig {
            server: args.server.clone(),
            port: args.port,
            username: args.username.clone(),
            ..ConnectConfig::default()
        };
        let mut client = ChatClient::connect(&config)?;
        client
            .join(channel)
            .with_context(|| format!("Cannot join #{channel}"))?;
        (PlayMode::Chat, format!("#{channel}"), Some(client))
    } else {
        (PlayMode::Local, "local".to_string(), None)
    };

    let mut app = App::new(
        args.round.game(),
        dictionary,
        args.round.settings(),
        mode,
        status,
    );
    app.show_title = !args.no_title;
    app.end_screen_duration = args.end_screen_duration;

    let result = run_tui(&mut app, client.as_mut());

    app.game.end_round();
    print_final(app.game.scores());

    if let Some(client) = client
        && let Err(err) = client.disconnect()
    {
        warn!(%err, "disconnect failed");
    }
    result
}
