use serde::{Deserialize, Serialize};

/// Per-movie review counts.
///
/// `positive + negative` can be lower than `total` when a review carries a
/// sentiment outside the recognized pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

impl ReviewStats {
    pub fn unclassified(&self) -> usize {
        self.total.saturating_sub(self.positive + self.negative)
    }
}
