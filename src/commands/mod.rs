//! Command implementations

pub mod candidates;
pub mod rounds;
pub mod simple;
pub mod words;

pub use candidates::{CandidateSurvey, survey_candidates};
pub use rounds::{LOCAL_PLAYER, RoundSettings, start_round};
pub use simple::run_simple;
pub use words::{SubWordReport, list_sub_words};
