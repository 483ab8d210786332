//! In-memory cache of attempt state.
//!
//! The store holds the most recent filtered listing and, independently,
//! per-attempt detail records. Listing writes carry the epoch of the
//! fetch that produced them; a write from a superseded fetch is refused
//! so completion order can never leak a stale listing into the cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::model::{AttemptDetail, AttemptPage, AttemptSummary};

#[derive(Default)]
struct StoreInner {
    list: Vec<AttemptSummary>,
    list_total: u64,
    /// Epoch of the fetch that wrote the current list. 0 = never written.
    list_epoch: u64,
    details: HashMap<String, AttemptDetail>,
}

/// Shared cache of attempt records.
///
/// Writers are the fetch orchestrator (list and detail) and the mutation
/// coordinator (detail invalidation); presentation logic only reads.
#[derive(Default)]
pub struct AttemptStore {
    inner: Mutex<StoreInner>,
}

impl AttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("attempt store mutex poisoned")
    }

    /// Replace the cached listing wholesale with the result of the fetch
    /// issued at `epoch`. Returns `false` (and leaves the cache alone)
    /// if a fetch issued later has already been applied.
    pub fn replace_list(&self, epoch: u64, page: AttemptPage) -> bool {
        let mut inner = self.locked();
        if epoch <= inner.list_epoch {
            return false;
        }
        inner.list_epoch = epoch;
        inner.list = page.attempts;
        inner.list_total = page.total;
        true
    }

    /// Snapshot of the cached listing and its service-reported total.
    pub fn list(&self) -> (Vec<AttemptSummary>, u64) {
        let inner = self.locked();
        (inner.list.clone(), inner.list_total)
    }

    /// The cached detail record for an attempt, if current.
    pub fn detail(&self, attempt_id: &str) -> Option<AttemptDetail> {
        self.locked().details.get(attempt_id).cloned()
    }

    /// Store or overwrite one detail record.
    pub fn set_detail(&self, detail: AttemptDetail) {
        self.locked()
            .details
            .insert(detail.attempt_id.clone(), detail);
    }

    /// Drop the cached detail for an attempt so the next read refetches.
    pub fn invalidate_detail(&self, attempt_id: &str) {
        self.locked().details.remove(attempt_id);
    }
}
