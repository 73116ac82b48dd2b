//! Version/timestamp record fetched per artifact

use chrono::NaiveDateTime;

/// Display fallback for timestamps that do not parse. Participates in
/// later comparisons and simply never matches a listing date.
pub const CANNOT_PARSE: &str = "Cannot parse";

/// Compact timestamp format used by the authoritative metadata
const LAST_UPDATED_FORMAT: &str = "%Y%m%d%H%M%S";

/// Latest version and last-updated timestamp reported by the
/// authoritative source. Owned by the descriptor it was fetched for;
/// never shared or cached across descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoritativeRecord {
    pub latest_version: String,
    pub last_updated_raw: String,
}

impl AuthoritativeRecord {
    /// Release date as `YYYY-MM-DD`, or the [`CANNOT_PARSE`] sentinel
    pub fn release_date(&self) -> String {
        match NaiveDateTime::parse_from_str(&self.last_updated_raw, LAST_UPDATED_FORMAT) {
            Ok(timestamp) => timestamp.format("%Y-%m-%d").to_string(),
            Err(_) => CANNOT_PARSE.to_string(),
        }
    }
}
