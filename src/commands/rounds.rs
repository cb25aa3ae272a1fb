//! Round selection policy shared by the play modes

use crate::game::{Game, RoundError};
use rand::Rng;
use tracing::warn;

/// Player credited for guesses typed at the keyboard
pub const LOCAL_PLAYER: &str = "You";

/// How rounds are chosen and how long they last
#[derive(Debug, Clone)]
pub struct RoundSettings {
    pub round_duration: f64,
    pub min_length: usize,
    pub min_words: usize,
    pub max_words: usize,
    /// Word for the first round instead of a random pick
    pub first_word: Option<String>,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            round_duration: 120.0,
            min_length: 5,
            min_words: 1,
            max_words: 9001,
            first_word: None,
        }
    }
}

/// Start the next round, honouring a forced first word once
///
/// When no word meets the constraints, retries once accepting any number of
/// sub-words before giving up.
///
/// # Errors
///
/// Returns the `RoundError` of the last attempt.
pub fn start_round<R: Rng>(
    game: &mut Game<R>,
    dictionary: &[String],
    settings: &mut RoundSettings,
) -> Result<(), RoundError> {
    if let Some(word) = settings.first_word.take() {
        return game.set_word(&word, dictionary);
    }

    match game.pick_random_word(
        dictionary,
        settings.min_length,
        settings.min_words,
        settings.max_words,
    ) {
        Err(err @ RoundError::NoCandidate { .. }) if settings.min_words > 1 => {
            warn!(%err, "relaxing min_words to 1");
            settings.min_words = 1;
            game.pick_random_word(
                dictionary,
                settings.min_length,
                settings.min_words,
                settings.max_words,
            )
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn first_word_used_once() {
        let dict = dictionary(&["cat", "at", "stone", "notes", "one"]);
        let mut settings = RoundSettings {
            first_word: Some("Cat".to_string()),
            ..RoundSettings::default()
        };
        let mut game = Game::seeded(5);

        start_round(&mut game, &dict, &mut settings).unwrap();
        assert_eq!(game.words().len(), 2);
        assert!(settings.first_word.is_none());

        start_round(&mut game, &dict, &mut settings).unwrap();
        assert_eq!(game.letters().len(), 5);
    }

    #[test]
    fn relaxes_min_words() {
        let dict = dictionary(&["stone", "one"]);
        let mut settings = RoundSettings {
            min_words: 50,
            ..RoundSettings::default()
        };
        let mut game = Game::seeded(5);

        start_round(&mut game, &dict, &mut settings).unwrap();
        assert_eq!(settings.min_words, 1);
        assert!(game.is_active());
    }

    #[test]
    fn gives_up_when_nothing_long_enough() {
        let dict = dictionary(&["cat", "at"]);
        let mut settings = RoundSettings {
            min_length: 20,
            min_words: 3,
            ..RoundSettings::default()
        };
        let mut game = Game::seeded(5);

        let err = start_round(&mut game, &dict, &mut settings).unwrap_err();
        assert_eq!(
            err,
            RoundError::NoCandidate {
                min_length: 20,
                min_words: 1,
                max_words: 9001,
            }
        );
    }
}
