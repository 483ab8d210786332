//! Read-side orchestration against the scoring service.
//!
//! Two patterns live here. Dashboard aggregation issues the four summary
//! reads concurrently and absorbs individual failures into per-resource
//! fallbacks, so one unreachable endpoint degrades one metric instead of
//! the whole view. Filtered list refreshes are guarded by a monotonic
//! request epoch: when filter churn overlaps fetches, only the latest
//! fetch's result is applied and stale responses are discarded on
//! arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{ActionError, ServiceError};
use crate::model::{AttemptDetail, Flag, Student, Test};
use crate::query::AttemptFilter;
use crate::ranking::{assign_ranks, LeaderboardEntry};
use crate::service::ScoringService;
use crate::store::AttemptStore;

/// The four dashboard metrics. Each degrades to zero independently when
/// its read fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub students: u64,
    pub tests: u64,
    pub attempts: u64,
    pub flagged: u64,
}

/// Issues reads against the scoring service and applies the results to
/// the shared [`AttemptStore`].
pub struct DataFetcher {
    service: Arc<dyn ScoringService>,
    store: Arc<AttemptStore>,
    refresh_epoch: AtomicU64,
}

impl DataFetcher {
    pub fn new(service: Arc<dyn ScoringService>, store: Arc<AttemptStore>) -> Self {
        Self {
            service,
            store,
            refresh_epoch: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &AttemptStore {
        &self.store
    }

    /// Best-effort aggregation of the four summary reads. Never fails:
    /// each metric falls back to zero when its read does, logged at warn.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let unfiltered = AttemptFilter::default();
        let (students, tests, attempts, flags) = futures::join!(
            self.service.students(),
            self.service.tests(),
            self.service.attempts(&unfiltered),
            self.service.flags(),
        );

        DashboardStats {
            students: count_or_zero("students", students.map(|s| s.len() as u64)),
            tests: count_or_zero("tests", tests.map(|t| t.len() as u64)),
            attempts: count_or_zero("attempts", attempts.map(|page| page.total)),
            flagged: count_or_zero("flags", flags.map(|f| f.len() as u64)),
        }
    }

    /// Fetch the attempts listing for `filter` and apply it to the store
    /// unless a newer refresh was issued while this one was in flight.
    ///
    /// Returns `Ok(true)` if the store was updated, `Ok(false)` if the
    /// response arrived stale and was discarded. Errors propagate and
    /// leave the store untouched.
    pub async fn refresh_attempts(&self, filter: &AttemptFilter) -> Result<bool, ServiceError> {
        let epoch = self.refresh_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let page = self.service.attempts(filter).await?;
        let applied = self.store.replace_list(epoch, page);
        if !applied {
            tracing::debug!(epoch, "discarding stale attempts response");
        }
        Ok(applied)
    }

    /// The detail record for one attempt, served from cache when current.
    /// `force` bypasses the cache.
    pub async fn attempt_detail(
        &self,
        attempt_id: &str,
        force: bool,
    ) -> Result<AttemptDetail, ServiceError> {
        if !force {
            if let Some(cached) = self.store.detail(attempt_id) {
                return Ok(cached);
            }
        }
        let detail = self.service.attempt_detail(attempt_id).await?;
        self.store.set_detail(detail.clone());
        Ok(detail)
    }

    /// Plain single-resource read; failure propagates to the caller.
    pub async fn students(&self) -> Result<Vec<Student>, ServiceError> {
        self.service.students().await
    }

    /// Plain single-resource read; failure propagates to the caller.
    pub async fn tests(&self) -> Result<Vec<Test>, ServiceError> {
        self.service.tests().await
    }

    /// Plain single-resource read; failure propagates to the caller.
    pub async fn flags(&self) -> Result<Vec<Flag>, ServiceError> {
        self.service.flags().await
    }

    /// Ranked leaderboard for one test. An empty test id short-circuits
    /// before any network call: "no test selected" is a different state
    /// from "no results for this test".
    pub async fn leaderboard(&self, test_id: &str) -> Result<Vec<LeaderboardEntry>, ActionError> {
        if test_id.is_empty() {
            return Err(ActionError::NoTestSelected);
        }
        let results = self.service.leaderboard(test_id).await?;
        Ok(assign_ranks(results))
    }
}

fn count_or_zero(resource: &str, outcome: Result<u64, ServiceError>) -> u64 {
    match outcome {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(resource, error = %err, "dashboard read failed, falling back to 0");
            0
        }
    }
}
