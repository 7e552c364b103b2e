//! View configuration.
//!
//! Every tunable the derived views need is carried in [`ViewConfig`] and passed explicitly into the view
//! constructors. There is deliberately no process-wide mutable settings store: a caller that wants different batch
//! sizes for different screens builds a different config.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// How many matches of a round are revealed at a time in the round browser.
    pub round_batch_size: usize,
    /// How many matches per league are revealed at a time in the day view.
    pub daily_batch_size: usize,
    /// League ids treated as friendlies; these sort after every other league in the day view.
    pub friendly_league_ids: Vec<i64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { round_batch_size: 50, daily_batch_size: 9, friendly_league_ids: vec![10, 667] }
    }
}

impl ViewConfig {
    pub fn with_round_batch_size(mut self, size: usize) -> Self {
        self.round_batch_size = size;
        self
    }

    pub fn with_daily_batch_size(mut self, size: usize) -> Self {
        self.daily_batch_size = size;
        self
    }

    pub fn with_friendly_league_ids(mut self, ids: Vec<i64>) -> Self {
        self.friendly_league_ids = ids;
        self
    }
}
