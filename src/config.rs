//! Run configuration: constants, failure suppression, and the record reader

use std::time::Duration;

use crate::descriptor::artifact::ArtifactDescriptor;
use crate::descriptor::template::GroupTemplate;
use crate::error::ConfigError;

// =============================================================================
// Network constants
// =============================================================================

/// Default authoritative repository base URL
pub const DEFAULT_REPO_BASE_URL: &str = "https://repo.maven.apache.org/maven2/";

/// Bounded attempts for a listing fetch before surfacing the failure
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

/// Pause between listing fetch attempts
pub const FETCH_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Per-request timeout; a bounded retry count substitutes for cancellation
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = "dist-check";

/// Default file receiving one line per version mismatch
pub const FAILURES_FILENAME: &str = "check-index-page.log";

/// Failure suppression entry: an artifact id, optionally pinned to a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreEntry {
    artifact_id: String,
    version: Option<String>,
}

impl IgnoreEntry {
    /// Parse `artifactId` or `artifactId:version`
    pub fn parse(entry: &str) -> Self {
        match entry.split_once(':') {
            Some((artifact, version)) => Self {
                artifact_id: artifact.to_string(),
                version: Some(version.to_string()),
            },
            None => Self {
                artifact_id: entry.to_string(),
                version: None,
            },
        }
    }

    fn matches(&self, artifact_id: &str, version: &str) -> bool {
        self.artifact_id == artifact_id && self.version.as_deref().is_none_or(|v| v == version)
    }
}

/// Allow-list deciding whether a version mismatch is reportable
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreList {
    pub fn new(entries: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| IgnoreEntry::parse(entry.as_ref()))
                .collect(),
        }
    }

    /// Whether a mismatch for this artifact/version should be suppressed
    pub fn contains(&self, artifact_id: &str, version: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.matches(artifact_id, version))
    }
}

/// Read descriptors from line-oriented configuration text.
///
/// Unindented lines start a group record, indented lines add child
/// artifacts under the current group, `#` starts a comment. Descriptors
/// come back in file order.
pub fn read_configuration(text: &str) -> Result<Vec<ArtifactDescriptor>, ConfigError> {
    let mut descriptors = Vec::new();
    let mut current_group = None;

    for line in text.lines() {
        let without_comment = line.split('#').next().unwrap_or("");
        if without_comment.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = without_comment.split_whitespace().collect();

        if without_comment.starts_with([' ', '\t']) {
            let Some(template) = &current_group else {
                return Err(ConfigError::MalformedRecord(format!(
                    "child record before any group record: {}",
                    without_comment.trim()
                )));
            };
            descriptors.push(ArtifactDescriptor::from_child_record(template, &tokens)?);
        } else {
            let record = GroupTemplate::parse(&tokens)?;
            if let Some(singleton) = record.singleton {
                descriptors.push(singleton);
            }
            current_group = Some(record.template);
        }
    }

    Ok(descriptors)
}
