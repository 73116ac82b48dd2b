//! Group-level configuration records

use std::sync::Arc;

use crate::descriptor::artifact::ArtifactDescriptor;
use crate::error::ConfigError;
use crate::listing::page::POMS_INDEX_URL;

/// Marker token selecting combined source+binary bundles for a group
const SRC_BIN_MARKER: &str = "src+bin";

/// Fields a group record contributes to each of its child artifacts.
///
/// Children hold the template by reference; nothing is copied down an
/// inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTemplate {
    directory: String,
    group_id: String,
    src_bin: bool,
    listing_url: Option<String>,
}

/// Outcome of parsing a group record: the template children inherit from,
/// plus a ready descriptor when the record names a singleton artifact
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub template: Arc<GroupTemplate>,
    pub singleton: Option<ArtifactDescriptor>,
}

impl GroupTemplate {
    /// Parse a 2-3 token group record.
    ///
    /// Token 0 is the directory path (path separators and colons normalized
    /// to spaces). Token 1 is the group coordinate; a `group:artifact` form
    /// declares a singleton component checked against the poms index.
    /// Token 2, when present, is either the `src+bin` marker or a listing
    /// URL for the whole group.
    pub fn parse(tokens: &[&str]) -> Result<GroupRecord, ConfigError> {
        if tokens.len() < 2 {
            return Err(ConfigError::MalformedRecord(format!(
                "group record needs a directory and a coordinate, got {tokens:?}"
            )));
        }

        let directory = tokens[0].replace(['/', ':'], " ").trim().to_string();
        let (group_id, singleton_artifact) = match tokens[1].split_once(':') {
            Some((group, artifact)) => (group.to_string(), Some(artifact.to_string())),
            None => (tokens[1].to_string(), None),
        };
        let src_bin = tokens.len() > 2 && tokens[2] == SRC_BIN_MARKER;
        let listing_url = (!src_bin)
            .then(|| tokens.get(2).map(|url| url.to_string()))
            .flatten();

        let template = Arc::new(GroupTemplate {
            directory: directory.clone(),
            group_id: group_id.clone(),
            src_bin,
            listing_url,
        });

        // A singleton parent artifact is listed on the poms index, not on
        // the listing its children use.
        let singleton = singleton_artifact.map(|artifact_id| {
            let own = Arc::new(GroupTemplate {
                directory,
                group_id,
                src_bin,
                listing_url: Some(POMS_INDEX_URL.to_string()),
            });
            ArtifactDescriptor::new(own, artifact_id)
        });

        Ok(GroupRecord { template, singleton })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn src_bin(&self) -> bool {
        self.src_bin
    }

    pub fn listing_url(&self) -> Option<&str> {
        self.listing_url.as_deref()
    }
}
