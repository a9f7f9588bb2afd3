//! Full streak recount over a completion history.

use serde::{Deserialize, Serialize};

/// Positive and negative streak counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakCounts {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub current_negative: u32,
    pub longest_negative: u32,
}

impl StreakCounts {
    /// Recount every counter from `history` in one pass.
    ///
    /// Zero based: a history with no incomplete interval has a negative
    /// streak of 0 here. An empty history yields all zeros.
    pub fn from_history(history: &[bool]) -> Self {
        let mut longest_positive = 0u32;
        let mut longest_negative = 0u32;
        let mut current_positive = 0u32;
        let mut current_negative = 0u32;

        for &done in history {
            if done {
                current_positive += 1;
                longest_negative = longest_negative.max(current_negative);
                current_negative = 0;
            } else {
                current_negative += 1;
                longest_positive = longest_positive.max(current_positive);
                current_positive = 0;
            }
        }

        // a run reaching the end of history never hit a sign change
        Self {
            current_streak: current_positive,
            longest_streak: longest_positive.max(current_positive),
            current_negative,
            longest_negative: longest_negative.max(current_negative),
        }
    }
}
