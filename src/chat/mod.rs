//! Chat channel connection
//!
//! A minimal line-oriented client: enough of the protocol to read a
//! channel's messages anonymously and stay connected.

mod client;
mod message;
mod transport;

pub use client::{ChatClient, ChatError, ConnectConfig, READ_SIZE};
pub use message::{ChatMessage, Message, ParsedMessage, SystemNotice, Tags};
pub use transport::Transport;
