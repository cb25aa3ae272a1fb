//! Interactive TUI interface

pub mod app;
pub mod rendering;

pub use app::{App, Phase, PlayMode, run_tui};
