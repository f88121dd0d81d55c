use std::collections::HashMap;

pub const SCORES_PER_GAME: usize = 5;
pub const NAME_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i32,
}

/// In-memory top scores, keyed by game title. Lives as long as the process.
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    scores: HashMap<String, Vec<ScoreEntry>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished (or abandoned) game. The list for `game` is kept
    /// sorted by descending score and cut down to the best five.
    pub fn submit(&mut self, game: &str, name: &str, score: i32) {
        let name: String = name.chars().take(NAME_LEN).collect();
        log::info!("leaderboard: {game} <- {name} {score}");

        let entries = self.scores.entry(game.to_string()).or_default();
        entries.push(ScoreEntry { name, score });
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(SCORES_PER_GAME);
    }

    /// Top entries for a game, best first. Empty if nothing was recorded yet.
    pub fn top_scores(&self, game: &str) -> &[ScoreEntry] {
        self.scores.get(game).map(Vec::as_slice).unwrap_or(&[])
    }
}
