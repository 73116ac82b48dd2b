//! Lenient version parsing helpers

use semver::{Version, VersionReq};

/// Parse a version string, padding partial versions like "3" or "3.8"
/// and tolerating a leading `v`.
pub fn parse_lenient(version: &str) -> Option<Version> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = trimmed.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => trimmed.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Highest version in `versions`, restricted to `constraint` when given.
/// Unparseable entries are skipped.
pub fn select_latest(versions: &[String], constraint: Option<&VersionReq>) -> Option<String> {
    versions
        .iter()
        .filter_map(|v| parse_lenient(v).map(|parsed| (v, parsed)))
        .filter(|(_, parsed)| constraint.is_none_or(|req| req.matches(parsed)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(v, _)| v.clone())
}
