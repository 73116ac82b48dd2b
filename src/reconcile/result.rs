//! Reconciliation outcomes, grouped per listing for reporting

use indexmap::IndexMap;

use crate::descriptor::artifact::ArtifactDescriptor;

/// Outcome classification for one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// the listing agrees with the authoritative record
    Match,
    /// the listing shows a different (or no) version
    VersionMismatch,
    /// version agrees but the listing date is outside the tolerance window
    DateMismatch,
    /// no row for this artifact in the listing
    NotFound,
    /// the authoritative record or the listing could not be fetched
    FetchError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub descriptor: ArtifactDescriptor,
    pub authoritative_version: Option<String>,
    pub authoritative_date: Option<String>,
    pub listing_version: Option<String>,
    pub listing_date: Option<String>,
    pub status: ReconcileStatus,
}

/// Everything a run produced: per-listing groups in first-seen order,
/// each group in configuration order, plus flat error lines for version
/// mismatches.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub by_listing: IndexMap<String, Vec<ReconcileResult>>,
    pub error_lines: Vec<String>,
}

impl ReconcileReport {
    pub(crate) fn push(&mut self, listing_url: &str, result: ReconcileResult) {
        self.by_listing
            .entry(listing_url.to_string())
            .or_default()
            .push(result);
    }

    pub(crate) fn record_error(&mut self, line: String) {
        self.error_lines.push(line);
    }

    /// All results in report order
    pub fn results(&self) -> impl Iterator<Item = &ReconcileResult> {
        self.by_listing.values().flatten()
    }

    /// Whether the run ended with hard failures: unsuppressed version
    /// mismatches or fetch errors
    pub fn has_failures(&self) -> bool {
        !self.error_lines.is_empty()
            || self
                .results()
                .any(|result| result.status == ReconcileStatus::FetchError)
    }
}
