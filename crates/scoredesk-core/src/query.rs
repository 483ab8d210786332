//! Filter-to-query composition for the attempts listing.

use serde::{Deserialize, Serialize};

use crate::model::AttemptStatus;

/// The console's filter selections for the attempts listing.
///
/// Empty strings and `None` mean "no constraint" and are omitted from
/// the composed parameters entirely: an unset status filter retrieves
/// all statuses rather than filtering on `status=""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptFilter {
    /// Free-text search over student names.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<AttemptStatus>,
    #[serde(default)]
    pub test_id: String,
    /// Tri-state: `None` = all records, `Some(true)` = duplicates only,
    /// `Some(false)` = unique only.
    #[serde(default)]
    pub has_duplicates: Option<bool>,
}

impl AttemptFilter {
    /// Compose the minimal request-parameter set. Present values pass
    /// through verbatim; absent ones produce no key at all.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if !self.test_id.is_empty() {
            params.push(("test_id", self.test_id.clone()));
        }
        if let Some(dup) = self.has_duplicates {
            params.push(("has_duplicates", dup.to_string()));
        }
        params
    }

    /// `true` when no filter is applied at all.
    pub fn is_unfiltered(&self) -> bool {
        self.params().is_empty()
    }
}
