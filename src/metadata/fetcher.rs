//! Authoritative metadata retrieval

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use tracing::warn;

use crate::config::{REQUEST_TIMEOUT, USER_AGENT};
use crate::descriptor::artifact::ArtifactDescriptor;
use crate::error::FetchError;
use crate::metadata::record::AuthoritativeRecord;
use crate::metadata::versions::select_latest;

/// Trait for obtaining the authoritative record for a descriptor
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the latest version and last-updated timestamp for an artifact
    ///
    /// # Returns
    /// * `Ok(AuthoritativeRecord)` - record owned by the caller
    /// * `Err(FetchError)` - if the document is unreachable or malformed
    async fn fetch_record(
        &self,
        descriptor: &ArtifactDescriptor,
    ) -> Result<AuthoritativeRecord, FetchError>;
}

/// Authoritative metadata document layout
#[derive(Debug, Deserialize)]
struct MetadataXml {
    versioning: Option<VersioningXml>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VersioningXml {
    latest: Option<String>,
    release: Option<String>,
    last_updated: Option<String>,
    #[serde(default)]
    versions: VersionsXml,
}

#[derive(Debug, Deserialize, Default)]
struct VersionsXml {
    #[serde(default, rename = "version")]
    entries: Vec<String>,
}

/// Fetches per-artifact metadata documents from the repository
pub struct MetadataFetcher {
    client: reqwest::Client,
    repo_base_url: String,
}

impl MetadataFetcher {
    pub fn new(repo_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            repo_base_url: repo_base_url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MetadataSource for MetadataFetcher {
    async fn fetch_record(
        &self,
        descriptor: &ArtifactDescriptor,
    ) -> Result<AuthoritativeRecord, FetchError> {
        let url = descriptor.metadata_url(&self.repo_base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }

        if status.is_server_error() {
            warn!("metadata host returned status {} for {}", status, url);
            return Err(FetchError::Server {
                status: status.as_u16(),
                url,
            });
        }

        if !status.is_success() {
            warn!("metadata host returned status {} for {}", status, url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {status}"
            )));
        }

        let body = response.text().await?;
        let metadata: MetadataXml = quick_xml::de::from_str(&body).map_err(|e| {
            warn!("Failed to parse metadata document at {}: {}", url, e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        let versioning = metadata.versioning.unwrap_or_default();

        let latest_version = match descriptor.version_constraint() {
            Some(constraint) => select_latest(&versioning.versions.entries, Some(constraint)),
            None => versioning
                .latest
                .or(versioning.release)
                .or_else(|| select_latest(&versioning.versions.entries, None)),
        }
        .ok_or_else(|| {
            FetchError::InvalidResponse(format!(
                "no usable version for {}",
                descriptor.artifact_id()
            ))
        })?;

        Ok(AuthoritativeRecord {
            latest_version,
            last_updated_raw: versioning.last_updated.unwrap_or_default(),
        })
    }
}
