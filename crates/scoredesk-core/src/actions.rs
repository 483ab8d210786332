//! Moderation actions: recompute and flag.
//!
//! Both mutations are single-flight per attempt id: a second call while
//! one is pending is rejected synchronously, never queued. This is what
//! prevents duplicate flag submissions and concurrent recompute races
//! from producing inconsistent displayed state. Results are never
//! applied optimistically: a successful mutation invalidates the cached
//! detail and refetches it, because the true post-mutation score and
//! status are computed server-side (a recompute can even reassign dedup
//! back-references).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::ActionError;
use crate::model::AttemptDetail;
use crate::service::ScoringService;
use crate::store::AttemptStore;

/// Coordinates the two mutating actions against a consistent local view
/// of attempt state.
pub struct AttemptActions {
    service: Arc<dyn ScoringService>,
    store: Arc<AttemptStore>,
    pending: Mutex<HashSet<String>>,
}

impl AttemptActions {
    pub fn new(service: Arc<dyn ScoringService>, store: Arc<AttemptStore>) -> Self {
        Self {
            service,
            store,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Trigger server-side rescoring of an attempt, then refresh its
    /// cached detail. Returns the refreshed record.
    pub async fn recompute(&self, attempt_id: &str) -> Result<AttemptDetail, ActionError> {
        if attempt_id.is_empty() {
            return Err(ActionError::MissingAttemptId);
        }
        let _guard = self.begin(attempt_id)?;
        self.service.recompute(attempt_id).await?;
        tracing::info!(attempt_id, "recompute accepted");
        self.refresh_detail(attempt_id).await
    }

    /// Flag an attempt for manual review, then refresh its cached
    /// detail. An empty reason fails fast, client-side.
    pub async fn flag(&self, attempt_id: &str, reason: &str) -> Result<AttemptDetail, ActionError> {
        if attempt_id.is_empty() {
            return Err(ActionError::MissingAttemptId);
        }
        if reason.trim().is_empty() {
            return Err(ActionError::EmptyReason);
        }
        let _guard = self.begin(attempt_id)?;
        self.service.flag(attempt_id, reason).await?;
        tracing::info!(attempt_id, "flag created");
        self.refresh_detail(attempt_id).await
    }

    /// Claim the single-flight slot for an attempt, or reject.
    fn begin(&self, attempt_id: &str) -> Result<PendingGuard<'_>, ActionError> {
        let mut pending = self.pending.lock().expect("pending set mutex poisoned");
        if !pending.insert(attempt_id.to_string()) {
            return Err(ActionError::InProgress(attempt_id.to_string()));
        }
        Ok(PendingGuard {
            actions: self,
            attempt_id: attempt_id.to_string(),
        })
    }

    /// Invalidate and refetch after a successful mutation. The mutation
    /// has already landed, so the stale cache entry is dropped even if
    /// the refetch itself fails.
    async fn refresh_detail(&self, attempt_id: &str) -> Result<AttemptDetail, ActionError> {
        self.store.invalidate_detail(attempt_id);
        let detail = self.service.attempt_detail(attempt_id).await?;
        self.store.set_detail(detail.clone());
        Ok(detail)
    }
}

/// Releases the single-flight slot on every exit path.
struct PendingGuard<'a> {
    actions: &'a AttemptActions,
    attempt_id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.actions
            .pending
            .lock()
            .expect("pending set mutex poisoned")
            .remove(&self.attempt_id);
    }
}
