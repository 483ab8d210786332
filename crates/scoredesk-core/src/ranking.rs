//! Leaderboard ranking.
//!
//! The service orders results by score descending (ties broken
//! server-side by accuracy, net-correct, then earliest submission), so
//! this engine does not re-sort. It assigns positional 1-based ranks,
//! preserving input order for equal scores. Tied scores receive
//! consecutive ranks, not a shared one; a shared-rank rule would slot
//! into `assign_ranks` if it is ever wanted.

use serde::Serialize;

use crate::model::StudentResult;

/// One ranked leaderboard row. Derived per request, never cached across
/// tests.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: u32,
    pub student_id: String,
    pub student_name: String,
    pub score: i64,
    pub accuracy: i64,
    pub net_correct: i64,
}

impl LeaderboardEntry {
    /// Ranks 1–3 get visual distinction in the console.
    pub fn is_top_three(&self) -> bool {
        self.rank <= 3
    }

    /// Rank 1 is rendered differently from 2 and 3.
    pub fn is_winner(&self) -> bool {
        self.rank == 1
    }
}

/// Assign positional ranks over server-ordered results.
pub fn assign_ranks(results: Vec<StudentResult>) -> Vec<LeaderboardEntry> {
    results
        .into_iter()
        .enumerate()
        .map(|(i, r)| LeaderboardEntry {
            rank: i as u32 + 1,
            student_id: r.student_id,
            student_name: r.student_name,
            score: r.score,
            accuracy: r.accuracy,
            net_correct: r.net_correct,
        })
        .collect()
}
