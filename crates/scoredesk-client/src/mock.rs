//! In-memory mock scoring service for testing the orchestration layer
//! without real HTTP calls.
//!
//! The mock applies attempt filters the way the real service does, so
//! tests exercise the composed query semantics end to end. Per-endpoint
//! failure injection, per-filter response delays, and mutation gating
//! let tests drive the failure-tolerance and ordering behavior of the
//! fetch and action layers deterministically.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use scoredesk_core::model::{
    AttemptDetail, AttemptPage, AttemptSummary, Flag, Student, StudentResult, Test,
};
use scoredesk_core::query::AttemptFilter;
use scoredesk_core::service::ScoringService;
use scoredesk_core::ServiceError;

#[derive(Default)]
pub struct MockScoringService {
    students: Vec<Student>,
    tests: Vec<Test>,
    attempts: Vec<AttemptSummary>,
    flags: Vec<Flag>,
    details: Mutex<HashMap<String, AttemptDetail>>,
    leaderboards: HashMap<String, Vec<StudentResult>>,

    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<HashMap<&'static str, u32>>,
    last_filter: Mutex<Option<AttemptFilter>>,
    flagged_reasons: Mutex<Vec<(String, String)>>,
    /// Delay for the attempts endpoint, keyed by the status filter value
    /// ("" = no status filter).
    attempt_delays: Mutex<HashMap<String, Duration>>,
    /// Mutations for a gated attempt id park until the gate is notified.
    mutation_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockScoringService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(mut self, students: Vec<Student>) -> Self {
        self.students = students;
        self
    }

    pub fn with_tests(mut self, tests: Vec<Test>) -> Self {
        self.tests = tests;
        self
    }

    pub fn with_attempts(mut self, attempts: Vec<AttemptSummary>) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_flags(mut self, flags: Vec<Flag>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_detail(self, detail: AttemptDetail) -> Self {
        self.set_detail(detail);
        self
    }

    pub fn with_leaderboard(mut self, test_id: &str, results: Vec<StudentResult>) -> Self {
        self.leaderboards.insert(test_id.to_string(), results);
        self
    }

    /// Store or replace a detail record; used mid-test to simulate the
    /// service recomputing an attempt.
    pub fn set_detail(&self, detail: AttemptDetail) {
        self.details
            .lock()
            .unwrap()
            .insert(detail.attempt_id.clone(), detail);
    }

    /// Make the named endpoint fail with a network error.
    pub fn fail_endpoint(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    /// Delay attempts responses whose status filter renders as
    /// `status_key` ("" for unfiltered requests).
    pub fn delay_attempts_for(&self, status_key: &str, delay: Duration) {
        self.attempt_delays
            .lock()
            .unwrap()
            .insert(status_key.to_string(), delay);
    }

    /// Park the next mutation on `attempt_id` until the returned gate
    /// is notified. One-shot: later mutations pass freely.
    pub fn hold_mutations(&self, attempt_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.mutation_gates
            .lock()
            .unwrap()
            .insert(attempt_id.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn call_count(&self, endpoint: &'static str) -> u32 {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn last_filter(&self) -> Option<AttemptFilter> {
        self.last_filter.lock().unwrap().clone()
    }

    pub fn flagged_reasons(&self) -> Vec<(String, String)> {
        self.flagged_reasons.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) -> Result<(), ServiceError> {
        *self.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(ServiceError::Network(format!(
                "{endpoint} endpoint unreachable"
            )));
        }
        Ok(())
    }

    async fn wait_for_gate(&self, attempt_id: &str) {
        let gate = self.mutation_gates.lock().unwrap().remove(attempt_id);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn matches(filter: &AttemptFilter, row: &AttemptSummary) -> bool {
        if !filter.search.is_empty()
            && !row
                .student_name
                .to_lowercase()
                .contains(&filter.search.to_lowercase())
        {
            return false;
        }
        if let Some(status) = filter.status {
            if row.status != status {
                return false;
            }
        }
        if !filter.test_id.is_empty() && row.test_id != filter.test_id {
            return false;
        }
        if let Some(dup) = filter.has_duplicates {
            if row.is_duplicate() != dup {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ScoringService for MockScoringService {
    async fn students(&self) -> Result<Vec<Student>, ServiceError> {
        self.record("students")?;
        Ok(self.students.clone())
    }

    async fn tests(&self) -> Result<Vec<Test>, ServiceError> {
        self.record("tests")?;
        Ok(self.tests.clone())
    }

    async fn attempts(&self, filter: &AttemptFilter) -> Result<AttemptPage, ServiceError> {
        self.record("attempts")?;
        *self.last_filter.lock().unwrap() = Some(filter.clone());

        let status_key = filter.status.map(|s| s.to_string()).unwrap_or_default();
        let delay = self.attempt_delays.lock().unwrap().get(&status_key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let attempts: Vec<AttemptSummary> = self
            .attempts
            .iter()
            .filter(|row| Self::matches(filter, row))
            .cloned()
            .collect();
        Ok(AttemptPage {
            total: attempts.len() as u64,
            attempts,
        })
    }

    async fn flags(&self) -> Result<Vec<Flag>, ServiceError> {
        self.record("flags")?;
        Ok(self.flags.clone())
    }

    async fn attempt_detail(&self, attempt_id: &str) -> Result<AttemptDetail, ServiceError> {
        self.record("attempt_detail")?;
        self.details
            .lock()
            .unwrap()
            .get(attempt_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("attempt".into()))
    }

    async fn leaderboard(&self, test_id: &str) -> Result<Vec<StudentResult>, ServiceError> {
        self.record("leaderboard")?;
        Ok(self
            .leaderboards
            .get(test_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn recompute(&self, attempt_id: &str) -> Result<(), ServiceError> {
        self.record("recompute")?;
        self.wait_for_gate(attempt_id).await;
        Ok(())
    }

    async fn flag(&self, attempt_id: &str, reason: &str) -> Result<(), ServiceError> {
        self.record("flag")?;
        self.wait_for_gate(attempt_id).await;
        self.flagged_reasons
            .lock()
            .unwrap()
            .push((attempt_id.to_string(), reason.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoredesk_core::model::AttemptStatus;

    fn row(id: &str, name: &str, status: AttemptStatus, dup: Option<&str>) -> AttemptSummary {
        AttemptSummary {
            attempt_id: id.into(),
            student_id: String::new(),
            student_name: name.into(),
            test_id: "t1".into(),
            test_name: "Algebra I".into(),
            status,
            score: None,
            duplicate_of_attempt_id: dup.map(String::from),
        }
    }

    #[tokio::test]
    async fn filters_like_the_real_service() {
        let mock = MockScoringService::new().with_attempts(vec![
            row("a1", "Ada Lovelace", AttemptStatus::Scored, None),
            row("a2", "Grace Hopper", AttemptStatus::Deduped, Some("a1")),
            row("a3", "Ada Byron", AttemptStatus::Flagged, None),
        ]);

        let by_status = AttemptFilter {
            status: Some(AttemptStatus::Deduped),
            ..Default::default()
        };
        let page = mock.attempts(&by_status).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.attempts[0].attempt_id, "a2");

        let by_search = AttemptFilter {
            search: "ada".into(),
            ..Default::default()
        };
        assert_eq!(mock.attempts(&by_search).await.unwrap().total, 2);

        let unique_only = AttemptFilter {
            has_duplicates: Some(false),
            ..Default::default()
        };
        assert_eq!(mock.attempts(&unique_only).await.unwrap().total, 2);

        assert_eq!(mock.call_count("attempts"), 3);
        assert_eq!(mock.last_filter().unwrap(), unique_only);
    }

    #[tokio::test]
    async fn failure_injection() {
        let mock = MockScoringService::new();
        mock.fail_endpoint("students");
        assert!(mock.students().await.is_err());
        assert!(mock.tests().await.is_ok());
        assert_eq!(mock.call_count("students"), 1);
    }
}
