//! Cumulative player scores
//!
//! Scores live for the whole process run and only ever grow.

use rustc_hash::FxHashMap;

/// Player name to cumulative score
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: FxHashMap<String, u32>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of `player`, zero if they have never scored
    #[must_use]
    pub fn get(&self, player: &str) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    pub(crate) fn add(&mut self, player: &str, points: u32) {
        *self.scores.entry(player.to_string()).or_insert(0) += points;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest scores first, at most `limit` entries
    ///
    /// Ties are broken alphabetically so the leaderboard does not jitter
    /// between redraws.
    ///
    /// # Examples
    /// ```
    /// use words_on_terminal::game::Game;
    ///
    /// let dictionary = vec!["cat".to_string(), "at".to_string(), "a".to_string()];
    /// let mut game = Game::seeded(7);
    /// game.set_word("cat", &dictionary).unwrap();
    /// game.guess("Ann", "cat");
    /// game.guess("Bob", "at");
    ///
    /// let top = game.scores().most_common(10);
    /// assert_eq!(top, vec![("Ann", 3), ("Bob", 2)]);
    /// ```
    #[must_use]
    pub fn most_common(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .scores
            .iter()
            .map(|(player, &score)| (player.as_str(), score))
            .collect();
        entries.sort_by(|(p1, s1), (p2, s2)| s2.cmp(s1).then_with(|| p1.cmp(p2)));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_player_scores_zero() {
        let board = ScoreBoard::new();
        assert_eq!(board.get("nobody"), 0);
        assert!(board.is_empty());
    }

    #[test]
    fn scores_accumulate() {
        let mut board = ScoreBoard::new();
        board.add("Bob", 2);
        board.add("Bob", 5);
        board.add("Ann", 3);
        assert_eq!(board.get("Bob"), 7);
        assert_eq!(board.get("Ann"), 3);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn most_common_orders_and_limits() {
        let mut board = ScoreBoard::new();
        board.add("carol", 4);
        board.add("ann", 9);
        board.add("bob", 4);
        board.add("dave", 1);

        assert_eq!(
            board.most_common(3),
            vec![("ann", 9), ("bob", 4), ("carol", 4)]
        );
        assert_eq!(board.most_common(0), Vec::<(&str, u32)>::new());
    }
}
