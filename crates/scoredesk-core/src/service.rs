//! The `ScoringService` trait, the seam between orchestration and the
//! remote scoring service.
//!
//! Implemented over HTTP by `scoredesk-client`; the in-memory mock there
//! implements it for tests. All reads return the service's state as-is;
//! the two mutations report success or failure only, since the resulting
//! attempt state is computed server-side.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{AttemptDetail, AttemptPage, Flag, Student, StudentResult, Test};
use crate::query::AttemptFilter;

#[async_trait]
pub trait ScoringService: Send + Sync {
    /// List all students.
    async fn students(&self) -> Result<Vec<Student>, ServiceError>;

    /// List all tests.
    async fn tests(&self) -> Result<Vec<Test>, ServiceError>;

    /// List attempts matching the filter. An empty filter imposes no
    /// constraints.
    async fn attempts(&self, filter: &AttemptFilter) -> Result<AttemptPage, ServiceError>;

    /// List all moderation flags.
    async fn flags(&self) -> Result<Vec<Flag>, ServiceError>;

    /// Fetch the detail record for one attempt.
    async fn attempt_detail(&self, attempt_id: &str) -> Result<AttemptDetail, ServiceError>;

    /// Fetch the per-student results for one test, ordered by score
    /// descending.
    async fn leaderboard(&self, test_id: &str) -> Result<Vec<StudentResult>, ServiceError>;

    /// Trigger server-side rescoring of an attempt.
    async fn recompute(&self, attempt_id: &str) -> Result<(), ServiceError>;

    /// Create a moderation flag for an attempt.
    async fn flag(&self, attempt_id: &str, reason: &str) -> Result<(), ServiceError>;
}
