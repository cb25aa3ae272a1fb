//! Chat protocol message parsing
//!
//! Lines follow the IRC grammar with the IRCv3 tag extension:
//!
//! ```text
//! ['@' tags SPACE] [':' prefix SPACE] command [SPACE params] [SPACE ':' trailing]
//! ```
//!
//! Parsing is total. Anything that does not fit the grammar still produces a
//! `Message::Generic` with whatever fields could be split out.

use rustc_hash::FxHashMap;
use std::fmt;

/// Tag name to tag value; values are left escaped
pub type Tags = FxHashMap<String, String>;

/// The structural fields of one protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// The whole line, surrounding whitespace removed
    pub raw: String,
    /// Server name or `nick!user@host`
    pub prefix: Option<String>,
    pub command: String,
    /// Middle parameters, then the trailing parameter if there was one
    pub params: Vec<String>,
    pub tags: Tags,
}

/// A channel chat line (`PRIVMSG`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Display name when tagged, otherwise the nick from the prefix
    pub sender: String,
    pub channel: String,
    pub text: String,
    message: ParsedMessage,
}

/// A system announcement such as a subscription or raid (`USERNOTICE`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNotice {
    pub channel: String,
    /// The `system-msg` tag with `\s` escapes turned back into spaces
    pub system_text: String,
    /// Message the user attached, if any
    pub user_text: Option<String>,
    message: ParsedMessage,
}

/// A parsed line, classified by its command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Generic(ParsedMessage),
    Chat(ChatMessage),
    Notice(SystemNotice),
}

fn split_tags(line: &str) -> (Tags, &str) {
    let mut tags = Tags::default();
    let Some(tagged) = line.strip_prefix('@') else {
        return (tags, line);
    };
    let (tag_section, rest) = tagged.split_once(' ').unwrap_or((tagged, ""));
    for entry in tag_section.split(';').filter(|e| !e.is_empty()) {
        let (name, value) = entry.split_once('=').unwrap_or((entry, ""));
        tags.insert(name.to_string(), value.to_string());
    }
    (tags, rest)
}

fn split_prefix(line: &str) -> (Option<&str>, &str) {
    match line.strip_prefix(':') {
        Some(prefixed) => {
            let (prefix, rest) = prefixed.split_once(' ').unwrap_or((prefixed, ""));
            (Some(prefix), rest)
        }
        None => (None, line),
    }
}

/// Middle parameters split on whitespace, then everything after the first
/// `" :"` as one trailing parameter; an empty trailing parameter is dropped
fn split_params(params_text: &str) -> Vec<String> {
    let (middle, trailing) = params_text.split_once(" :").unwrap_or((params_text, ""));
    let mut params: Vec<String> = middle.split_whitespace().map(ToString::to_string).collect();
    if !trailing.is_empty() {
        params.push(trailing.to_string());
    }
    params
}

impl ParsedMessage {
    /// Split a line into tags, prefix, command and parameters
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::chat::ParsedMessage;
    ///
    /// let msg = ParsedMessage::parse(":nick!user@host PRIVMSG #chan :hello world");
    /// assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
    /// assert_eq!(msg.command, "PRIVMSG");
    /// assert_eq!(msg.params, vec!["#chan", "hello world"]);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let raw = line.trim();
        let (tags, rest) = split_tags(raw);
        let (prefix, rest) = split_prefix(rest);
        let (command, params_text) = rest.split_once(' ').unwrap_or((rest, ""));

        Self {
            raw: raw.to_string(),
            prefix: prefix.map(ToString::to_string),
            command: command.to_string(),
            params: split_params(params_text),
            tags,
        }
    }

    /// Tag value, or `""` when the tag is absent
    #[must_use]
    pub fn tag(&self, name: &str) -> &str {
        self.tags.get(name).map_or("", String::as_str)
    }

    /// The keep-alive answer to a `PING` line
    ///
    /// Tags and prefix are dropped; everything after the command is echoed
    /// verbatim. Returns `None` for any other command.
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::chat::ParsedMessage;
    ///
    /// let ping = ParsedMessage::parse(":tmi.twitch.tv PING :tmi.twitch.tv");
    /// assert_eq!(ping.pong_reply().as_deref(), Some("PONG :tmi.twitch.tv"));
    /// ```
    #[must_use]
    pub fn pong_reply(&self) -> Option<String> {
        if self.command != "PING" {
            return None;
        }
        let (_, rest) = split_tags(&self.raw);
        let (_, rest) = split_prefix(rest);
        rest.strip_prefix("PING").map(|args| format!("PONG{args}"))
    }

    /// Nick part of a `nick!user@host` prefix
    fn nick(&self) -> &str {
        self.prefix
            .as_deref()
            .and_then(|prefix| prefix.split('!').next())
            .unwrap_or("")
    }
}

impl Message {
    /// Parse and classify one protocol line
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::chat::Message;
    ///
    /// let msg = Message::parse("@display-name=Ann :ann!ann@x PRIVMSG #chan :hi there");
    /// let Message::Chat(chat) = msg else { panic!("expected a chat message") };
    /// assert_eq!(chat.sender, "Ann");
    /// assert_eq!(chat.channel, "#chan");
    /// assert_eq!(chat.text, "hi there");
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self::classify(ParsedMessage::parse(line))
    }

    /// Pick the variant for an already split line
    #[must_use]
    pub fn classify(message: ParsedMessage) -> Self {
        match message.command.as_str() {
            "PRIVMSG" => Self::Chat(ChatMessage::from_parsed(message)),
            "USERNOTICE" => Self::Notice(SystemNotice::from_parsed(message)),
            _ => Self::Generic(message),
        }
    }

    #[must_use]
    pub const fn parsed(&self) -> &ParsedMessage {
        match self {
            Self::Generic(message) => message,
            Self::Chat(chat) => &chat.message,
            Self::Notice(notice) => &notice.message,
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.parsed().command
    }
}

impl ChatMessage {
    fn from_parsed(message: ParsedMessage) -> Self {
        let sender = match message.tag("display-name") {
            "" => message.nick().to_string(),
            display_name => display_name.to_string(),
        };
        let count = message.params.len();
        let text = message.params.last().cloned().unwrap_or_default();
        let channel = count
            .checked_sub(2)
            .and_then(|i| message.params.get(i))
            .cloned()
            .unwrap_or_default();

        Self {
            sender,
            channel,
            text,
            message,
        }
    }

    #[must_use]
    pub const fn parsed(&self) -> &ParsedMessage {
        &self.message
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.sender, self.text)
    }
}

impl SystemNotice {
    fn from_parsed(message: ParsedMessage) -> Self {
        let channel = message.params.first().cloned().unwrap_or_default();
        let system_text = message.tag("system-msg").replace("\\s", " ");
        let user_text = message.params.get(1).cloned();

        Self {
            channel,
            system_text,
            user_text,
            message,
        }
    }

    #[must_use]
    pub const fn parsed(&self) -> &ParsedMessage {
        &self.message
    }
}

impl fmt::Display for SystemNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_text {
            Some(user_text) => write!(f, "{:10} {} \"{user_text}\"", self.channel, self.system_text),
            None => write!(f, "{:10} {}", self.channel, self.system_text),
        }
    }
}
