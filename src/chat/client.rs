//! Read-only chat client
//!
//! Registers anonymously, joins a channel, and turns the incoming byte stream
//! into chat messages. Keep-alive `PING`s are answered while polling.

use super::message::{ChatMessage, Message, ParsedMessage};
use super::transport::Transport;
use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Largest number of bytes taken from the stream per `poll`
pub const READ_SIZE: usize = 4096;

/// Sockets reject a zero read timeout, so shorter waits are rounded up
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Errors that make the connection unusable
#[derive(Debug)]
pub enum ChatError {
    /// The stream could not be opened
    Connect {
        server: String,
        port: u16,
        source: io::Error,
    },
    /// Reading or writing failed
    Io(io::Error),
    /// The server closed the stream
    Closed,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect {
                server,
                port,
                source,
            } => write!(f, "Could not connect to {server}:{port}: {source}"),
            Self::Io(source) => write!(f, "Connection failed: {source}"),
            Self::Closed => write!(f, "Connection closed by server"),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connect { source, .. } | Self::Io(source) => Some(source),
            Self::Closed => None,
        }
    }
}

impl From<io::Error> for ChatError {
    fn from(source: io::Error) -> Self {
        Self::Io(source)
    }
}

/// Where and as whom to connect
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    pub server: String,
    pub port: u16,
    pub password: String,
    /// `justinfan` followed by digits logs in anonymously, read-only
    pub username: String,
    /// Ask for message tags (display names) and extra commands
    pub request_tags: bool,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            server: "irc.chat.twitch.tv".to_string(),
            port: 6667,
            password: "BLANK".to_string(),
            username: "justinfan123".to_string(),
            request_tags: true,
        }
    }
}

/// A chat connection plus the unterminated tail of the last read
pub struct ChatClient<T> {
    stream: T,
    buffer: Vec<u8>,
}

impl ChatClient<TcpStream> {
    /// Open a TCP connection and register with the server
    ///
    /// No reply is awaited; a rejected login shows up as a closed stream on
    /// a later `poll`.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Connect` if the server is unreachable, or
    /// `ChatError::Io` if registration cannot be written.
    pub fn connect(config: &ConnectConfig) -> Result<Self, ChatError> {
        let stream = TcpStream::connect((config.server.as_str(), config.port)).map_err(|source| {
            ChatError::Connect {
                server: config.server.clone(),
                port: config.port,
                source,
            }
        })?;
        info!(server = %config.server, port = config.port, "connected");

        let mut client = Self::new(stream);
        client.register(config)?;
        Ok(client)
    }
}

impl<T: Transport> ChatClient<T> {
    pub const fn new(stream: T) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
        }
    }

    /// Send the login sequence
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Io` if a line cannot be written.
    pub fn register(&mut self, config: &ConnectConfig) -> Result<(), ChatError> {
        let username = &config.username;
        self.send(&format!("PASS {}", config.password))?;
        self.send(&format!("NICK {username}"))?;
        self.send(&format!("USER {username} 8 * :{username}"))?;
        if config.request_tags {
            self.send("CAP REQ :twitch.tv/commands twitch.tv/tags")?;
        }
        info!(%username, tags = config.request_tags, "registered");
        Ok(())
    }

    /// Join `#channel_name`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Io` if the line cannot be written.
    pub fn join(&mut self, channel_name: &str) -> Result<(), ChatError> {
        self.send(&format!("JOIN #{channel_name}"))?;
        info!(channel = channel_name, "joined");
        Ok(())
    }

    /// Send a chat line to `target`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Io` if the line cannot be written.
    pub fn say(&mut self, target: &str, text: &str) -> Result<(), ChatError> {
        self.send(&format!("PRIVMSG {target} :{text}"))
    }

    /// Read once, waiting at most `timeout`, and return the chat messages
    /// completed by that read
    ///
    /// A timeout yields an empty list. Incomplete trailing data is kept for
    /// the next call. `PING`s are answered before this returns; every other
    /// non-chat line is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Closed` when the server hung up and
    /// `ChatError::Io` on any other I/O failure. The client should be
    /// disconnected afterwards.
    pub fn poll(&mut self, timeout: Duration) -> Result<Vec<ChatMessage>, ChatError> {
        self.stream
            .set_read_timeout(Some(timeout.max(MIN_READ_TIMEOUT)))?;

        let mut chunk = [0u8; READ_SIZE];
        let received = match self.stream.read(&mut chunk) {
            Ok(0) => return Err(ChatError::Closed),
            Ok(n) => n,
            Err(e) if is_timeout(&e) => return Ok(Vec::new()),
            Err(e) => return Err(ChatError::Io(e)),
        };
        self.buffer.extend_from_slice(&chunk[..received]);

        let mut messages = Vec::new();
        for line in self.take_complete_lines() {
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Message::parse(line) {
                Message::Chat(chat) => messages.push(chat),
                other => self.handle_other(other.parsed())?,
            }
        }
        Ok(messages)
    }

    /// Say goodbye and release the stream
    ///
    /// The stream is released even when the goodbye cannot be sent, so this
    /// is safe to call on a connection that already failed.
    ///
    /// # Errors
    ///
    /// Returns the first failure from sending `QUIT` or closing the stream.
    pub fn disconnect(mut self) -> Result<(), ChatError> {
        let quit = self.send("QUIT");
        let close = self.stream.close();
        info!("disconnected");
        quit?;
        close.map_err(ChatError::Io)
    }

    #[must_use]
    pub const fn get_ref(&self) -> &T {
        &self.stream
    }

    /// Bytes received after the last complete line
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    fn handle_other(&mut self, message: &ParsedMessage) -> Result<(), ChatError> {
        if let Some(reply) = message.pong_reply() {
            debug!("answering keep-alive");
            self.send(&reply)
        } else {
            trace!(command = %message.command, raw = %message.raw, "ignored");
            Ok(())
        }
    }

    fn take_complete_lines(&mut self) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(end) = find_terminator(&self.buffer[start..]) {
            lines.push(self.buffer[start..start + end].to_vec());
            start += end + LINE_TERMINATOR.len();
        }
        self.buffer.drain(..start);
        lines
    }

    fn send(&mut self, line: &str) -> Result<(), ChatError> {
        let mut bytes = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(LINE_TERMINATOR);
        self.stream.write_all(&bytes)?;
        self.stream.flush()?;
        Ok(())
    }
}

fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(LINE_TERMINATOR.len())
        .position(|window| window == LINE_TERMINATOR)
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
    )
}
