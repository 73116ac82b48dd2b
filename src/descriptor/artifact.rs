//! Per-artifact descriptors and derived repository URLs

use std::sync::Arc;

use semver::VersionReq;

use crate::descriptor::template::GroupTemplate;
use crate::error::ConfigError;

/// Artifact whose source-release archive keeps the plain suffix even when
/// its group publishes combined source+binary bundles
const SRC_BIN_EXEMPT_ARTIFACT: &str = "maven-ant-tasks";

/// One configured component: shared group fields by reference, plus the
/// artifact id, an optional version-range constraint, and an optional
/// forced version applied before reconciliation begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    template: Arc<GroupTemplate>,
    artifact_id: String,
    version_constraint: Option<VersionReq>,
    forced_version: Option<String>,
}

impl ArtifactDescriptor {
    pub(crate) fn new(template: Arc<GroupTemplate>, artifact_id: String) -> Self {
        Self {
            template,
            artifact_id,
            version_constraint: None,
            forced_version: None,
        }
    }

    /// Parse a child record under a group template.
    ///
    /// Token 0 is the artifact id (required); token 1, when present, is a
    /// version-range expression restricting which published versions count
    /// as current.
    pub fn from_child_record(
        template: &Arc<GroupTemplate>,
        tokens: &[&str],
    ) -> Result<Self, ConfigError> {
        let artifact_id = tokens
            .first()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ConfigError::MalformedRecord("child record needs an artifact id".to_string())
            })?;

        let version_constraint = tokens
            .get(1)
            .map(|range| {
                VersionReq::parse(range).map_err(|e| ConfigError::InvalidRange {
                    range: range.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            template: Arc::clone(template),
            artifact_id: artifact_id.to_string(),
            version_constraint,
            forced_version: None,
        })
    }

    /// Replace the computed latest version for artifacts where automatic
    /// detection is known to be unreliable. Must be applied before the
    /// descriptor is handed to the reconciliation engine.
    pub fn with_forced_version(mut self, version: impl Into<String>) -> Self {
        self.forced_version = Some(version.into());
        self
    }

    pub fn directory(&self) -> &str {
        self.template.directory()
    }

    pub fn group_id(&self) -> &str {
        self.template.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn src_bin(&self) -> bool {
        self.template.src_bin()
    }

    pub fn listing_url(&self) -> Option<&str> {
        self.template.listing_url()
    }

    pub fn version_constraint(&self) -> Option<&VersionReq> {
        self.version_constraint.as_ref()
    }

    pub fn forced_version(&self) -> Option<&str> {
        self.forced_version.as_deref()
    }

    fn base_url(&self, repo_base: &str, suffix: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            repo_base.trim_end_matches('/'),
            self.group_id().replace('.', "/"),
            self.artifact_id,
            suffix
        )
    }

    /// URL of the authoritative metadata file for this artifact
    pub fn metadata_url(&self, repo_base: &str) -> String {
        self.base_url(repo_base, "maven-metadata.xml")
    }

    /// URL of the release folder for a specific version
    pub fn versioned_folder_url(&self, repo_base: &str, version: &str) -> String {
        format!("{}/", self.base_url(repo_base, version))
    }

    /// URL of the pom published for a specific version
    pub fn versioned_pom_url(&self, repo_base: &str, version: &str) -> String {
        self.base_url(
            repo_base,
            &format!("{version}/{}-{version}.pom", self.artifact_id),
        )
    }

    /// Filename of the source release archive for a specific version
    pub fn source_release_filename(&self, version: &str, dist_area: bool) -> String {
        let suffix =
            if self.src_bin() && (dist_area || self.artifact_id != SRC_BIN_EXEMPT_ARTIFACT) {
                "-src"
            } else {
                "-source-release"
            };
        format!("{}-{version}{suffix}.zip", self.artifact_id)
    }
}
