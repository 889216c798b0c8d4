use std::fmt::{self, Display};

/// One line of the training leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub r2: f64,
    pub mse: f64,
}

impl Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> R2: {:.4}, MSE: {:.2}", self.name, self.r2, self.mse)
    }
}

/// Keeps every scored candidate and the best one seen so far.
///
/// A candidate replaces the current best only when its R² is strictly greater, so the first
/// one seen wins ties and a `NaN` score never wins.
#[derive(Debug, Clone)]
pub struct Leaderboard<T> {
    entries: Vec<LeaderboardEntry>,
    best: Option<(usize, T)>,
}

impl<T> Default for Leaderboard<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            best: None,
        }
    }
}

impl<T> Leaderboard<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scored candidate.
    ///
    /// # Returns
    /// Whether the candidate became the new best.
    pub fn record(&mut self, entry: LeaderboardEntry, candidate: T) -> bool {
        let best_r2 = self
            .best
            .as_ref()
            .map_or(f64::NEG_INFINITY, |(i, _)| self.entries[*i].r2);

        let wins = entry.r2 > best_r2;
        if wins {
            self.best = Some((self.entries.len(), candidate));
        }

        self.entries.push(entry);
        wins
    }

    /// Every recorded entry, in recording order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// The best entry and its candidate, if any candidate scored above minus infinity.
    pub fn best(&self) -> Option<(&LeaderboardEntry, &T)> {
        self.best.as_ref().map(|(i, c)| (&self.entries[*i], c))
    }

    /// Consumes the leaderboard, returning its entries and the best entry's index and candidate.
    pub fn into_parts(self) -> (Vec<LeaderboardEntry>, Option<(usize, T)>) {
        (self.entries, self.best)
    }
}
