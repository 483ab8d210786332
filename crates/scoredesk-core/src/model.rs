//! Core entity types served by the remote scoring service.
//!
//! All of these are disposable local copies: the service owns the data
//! and wins on every refresh. Deserialization is deliberately lenient
//! about optional fields; the service omits score fields until an
//! attempt has been scored, and older deployments omit `total` on the
//! paged attempts response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student as listed by the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A test (assessment) as listed by the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub test_id: String,
    pub name: String,
    /// Maximum achievable marks, when the service reports it.
    #[serde(default)]
    pub max_marks: Option<u32>,
    #[serde(default)]
    pub attempt_count: Option<u64>,
}

/// Lifecycle status of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttemptStatus {
    /// Raw intake, not yet scored.
    Ingested,
    /// A computed score is available.
    Scored,
    /// Identified as a duplicate of another attempt.
    Deduped,
    /// Marked for manual review.
    Flagged,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Ingested => write!(f, "INGESTED"),
            AttemptStatus::Scored => write!(f, "SCORED"),
            AttemptStatus::Deduped => write!(f, "DEDUPED"),
            AttemptStatus::Flagged => write!(f, "FLAGGED"),
        }
    }
}

impl FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INGESTED" => Ok(AttemptStatus::Ingested),
            "SCORED" => Ok(AttemptStatus::Scored),
            "DEDUPED" => Ok(AttemptStatus::Deduped),
            "FLAGGED" => Ok(AttemptStatus::Flagged),
            other => Err(format!("unknown attempt status: {other}")),
        }
    }
}

/// One row of the filtered attempts listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub attempt_id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub test_name: String,
    pub status: AttemptStatus,
    /// Null until the attempt has been scored.
    #[serde(default)]
    pub score: Option<i64>,
    /// Non-owning back-reference to the attempt this one duplicates.
    #[serde(default)]
    pub duplicate_of_attempt_id: Option<String>,
}

impl AttemptSummary {
    pub fn is_duplicate(&self) -> bool {
        self.duplicate_of_attempt_id.is_some()
    }
}

/// The full detail record for a single attempt.
///
/// Score fields are independently nullable: the service computes them
/// asynchronously and a recompute may change any of them. `raw_payload`
/// is the opaque ingestion event, display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptDetail {
    pub attempt_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: Option<String>,
    #[serde(default)]
    pub test_name: String,
    pub status: AttemptStatus,
    #[serde(default)]
    pub score: Option<i64>,
    /// Accuracy percentage (0–100).
    #[serde(default)]
    pub accuracy: Option<i64>,
    /// Correct minus wrong answers.
    #[serde(default)]
    pub net_correct: Option<i64>,
    #[serde(default)]
    pub correct: Option<u32>,
    #[serde(default)]
    pub wrong: Option<u32>,
    #[serde(default)]
    pub skipped: Option<u32>,
    #[serde(default)]
    pub duplicate_of_attempt_id: Option<String>,
    #[serde(default)]
    pub raw_payload: serde_json::Value,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AttemptDetail {
    pub fn is_duplicate(&self) -> bool {
        self.duplicate_of_attempt_id.is_some()
    }
}

/// A moderation flag. Created only through the flag action; never
/// edited or deleted from this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub flag_id: String,
    pub attempt_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub test_name: String,
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One per-student result for a test, as returned by the leaderboard
/// endpoint. Already ordered by score descending on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResult {
    #[serde(default)]
    pub student_id: String,
    pub student_name: String,
    pub score: i64,
    #[serde(default)]
    pub accuracy: i64,
    #[serde(default)]
    pub net_correct: i64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// The attempts endpoint returns either a bare array or a paged object.
/// Both shapes must be accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttemptsPayload {
    Paged {
        #[serde(default)]
        data: Vec<AttemptSummary>,
        #[serde(default)]
        total: u64,
    },
    Bare(Vec<AttemptSummary>),
}

/// Normalized attempts listing: the rows plus the service-reported total.
#[derive(Debug, Clone, Default)]
pub struct AttemptPage {
    pub attempts: Vec<AttemptSummary>,
    pub total: u64,
}

impl From<AttemptsPayload> for AttemptPage {
    fn from(payload: AttemptsPayload) -> Self {
        match payload {
            AttemptsPayload::Paged { data, total } => AttemptPage {
                attempts: data,
                total,
            },
            // Bare lists carry no total; the list length stands in.
            AttemptsPayload::Bare(attempts) => AttemptPage {
                total: attempts.len() as u64,
                attempts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_and_parse() {
        assert_eq!(AttemptStatus::Scored.to_string(), "SCORED");
        assert_eq!(AttemptStatus::Deduped.to_string(), "DEDUPED");
        assert_eq!("SCORED".parse::<AttemptStatus>().unwrap(), AttemptStatus::Scored);
        assert_eq!("ingested".parse::<AttemptStatus>().unwrap(), AttemptStatus::Ingested);
        assert_eq!("Flagged".parse::<AttemptStatus>().unwrap(), AttemptStatus::Flagged);
        assert!("ARCHIVED".parse::<AttemptStatus>().is_err());
    }

    #[test]
    fn attempts_payload_bare_shape() {
        let json = r#"[
            {"attempt_id": "a1", "student_name": "Ada", "status": "SCORED", "score": 80},
            {"attempt_id": "a2", "student_name": "Grace", "status": "INGESTED"}
        ]"#;
        let payload: AttemptsPayload = serde_json::from_str(json).unwrap();
        let page = AttemptPage::from(payload);
        assert_eq!(page.total, 2);
        assert_eq!(page.attempts[0].score, Some(80));
        assert_eq!(page.attempts[1].score, None);
    }

    #[test]
    fn attempts_payload_paged_shape() {
        let json = r#"{"data": [{"attempt_id": "a1", "status": "DEDUPED",
            "duplicate_of_attempt_id": "a0"}], "total": 57}"#;
        let page = AttemptPage::from(serde_json::from_str::<AttemptsPayload>(json).unwrap());
        assert_eq!(page.total, 57);
        assert!(page.attempts[0].is_duplicate());
    }

    #[test]
    fn attempts_payload_paged_missing_total_defaults_to_zero() {
        let json = r#"{"data": []}"#;
        let page = AttemptPage::from(serde_json::from_str::<AttemptsPayload>(json).unwrap());
        assert_eq!(page.total, 0);
        assert!(page.attempts.is_empty());
    }

    #[test]
    fn detail_with_nulls_and_payload() {
        let json = r#"{
            "attempt_id": "a1",
            "student_name": "Ada",
            "test_name": "Algebra I",
            "status": "INGESTED",
            "score": null,
            "raw_payload": {"answers": {"q1": "B"}}
        }"#;
        let detail: AttemptDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.status, AttemptStatus::Ingested);
        assert_eq!(detail.score, None);
        assert_eq!(detail.accuracy, None);
        assert!(!detail.is_duplicate());
        assert_eq!(detail.raw_payload["answers"]["q1"], "B");
    }

    // The service is not supposed to attach a duplicate back-reference to
    // anything but DEDUPED attempts, but this layer renders whatever
    // combination arrives.
    #[test]
    fn inconsistent_duplicate_combination_still_decodes() {
        let json = r#"{"attempt_id": "a9", "status": "SCORED",
            "duplicate_of_attempt_id": "a3"}"#;
        let row: AttemptSummary = serde_json::from_str(json).unwrap();
        assert_eq!(row.status, AttemptStatus::Scored);
        assert!(row.is_duplicate());
    }
}
