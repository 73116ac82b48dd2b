//! Drives fetch, match, and comparison for every configured artifact

use tracing::{debug, info, warn};

use crate::config::IgnoreList;
use crate::descriptor::artifact::ArtifactDescriptor;
use crate::error::ConfigError;
use crate::listing::cache::ListingCache;
use crate::listing::matcher::find_entry;
use crate::listing::page::{ListingPage, ListingSet};
use crate::metadata::fetcher::MetadataSource;
use crate::reconcile::date::is_date_similar;
use crate::reconcile::result::{ReconcileReport, ReconcileResult, ReconcileStatus};

pub struct Reconciler<M> {
    metadata: M,
    listings: ListingCache,
    pages: ListingSet,
    ignore: IgnoreList,
}

impl<M: MetadataSource> Reconciler<M> {
    pub fn new(metadata: M, listings: ListingCache, pages: ListingSet, ignore: IgnoreList) -> Self {
        Self {
            metadata,
            listings,
            pages,
            ignore,
        }
    }

    /// Reconcile every descriptor with a listing reference, in
    /// configuration order.
    ///
    /// Per-descriptor fetch failures become `FetchError` results and the
    /// run continues; only a listing URL with no registered page layout
    /// aborts, since that is a configuration mistake caught before any
    /// network traffic.
    pub async fn run(
        &self,
        descriptors: &[ArtifactDescriptor],
    ) -> Result<ReconcileReport, ConfigError> {
        for descriptor in descriptors {
            if let Some(url) = descriptor.listing_url()
                && self.pages.get(url).is_none()
            {
                return Err(ConfigError::UnknownListing(url.to_string()));
            }
        }

        let mut report = ReconcileReport::default();

        for descriptor in descriptors {
            let Some(listing_url) = descriptor.listing_url() else {
                debug!("skipping {}: no listing reference", descriptor.artifact_id());
                continue;
            };
            let Some(page) = self.pages.get(listing_url) else {
                continue; // validated above
            };

            let result = self.reconcile_one(descriptor, page, &mut report).await;
            report.push(listing_url, result);
        }

        info!(
            "reconciled {} artifacts across {} listings",
            report.results().count(),
            report.by_listing.len()
        );
        Ok(report)
    }

    async fn reconcile_one(
        &self,
        descriptor: &ArtifactDescriptor,
        page: &ListingPage,
        report: &mut ReconcileReport,
    ) -> ReconcileResult {
        let record = match self.metadata.fetch_record(descriptor).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "metadata fetch failed for {}: {}",
                    descriptor.artifact_id(),
                    e
                );
                return fetch_error_result(descriptor, None, None);
            }
        };

        // The forced override replaces the fetched latest for comparison.
        let expected = descriptor
            .forced_version()
            .unwrap_or(&record.latest_version)
            .to_string();
        let authoritative_date = record.release_date();

        let table = match self.listings.get(&page.url).await {
            Ok(table) => table,
            Err(e) => {
                warn!("listing fetch failed for {}: {}", page.url, e);
                return fetch_error_result(descriptor, Some(expected), Some(authoritative_date));
            }
        };

        let Some(row) = find_entry(&table, page, descriptor.artifact_id()) else {
            return ReconcileResult {
                descriptor: descriptor.clone(),
                authoritative_version: Some(expected),
                authoritative_date: Some(authoritative_date),
                listing_version: None,
                listing_date: None,
                status: ReconcileStatus::NotFound,
            };
        };

        let status = if row.version.as_deref() != Some(expected.as_str()) {
            if self.ignore.contains(descriptor.artifact_id(), &expected) {
                debug!(
                    "suppressing version mismatch for {} per ignore list",
                    descriptor.artifact_id()
                );
            } else {
                report.record_error(format!(
                    "{}: found {} instead of {} in {}",
                    descriptor.artifact_id(),
                    row.version.as_deref().unwrap_or("nothing"),
                    expected,
                    page.url
                ));
            }
            ReconcileStatus::VersionMismatch
        } else if page.has_date
            && !is_date_similar(&authoritative_date, row.date.as_deref().unwrap_or(""))
        {
            warn!(
                "date drift for {}: metadata says {}, index says {}",
                descriptor.artifact_id(),
                authoritative_date,
                row.date.as_deref().unwrap_or("nothing")
            );
            ReconcileStatus::DateMismatch
        } else {
            ReconcileStatus::Match
        };

        ReconcileResult {
            descriptor: descriptor.clone(),
            authoritative_version: Some(expected),
            authoritative_date: Some(authoritative_date),
            listing_version: row.version,
            listing_date: row.date,
            status,
        }
    }
}

fn fetch_error_result(
    descriptor: &ArtifactDescriptor,
    authoritative_version: Option<String>,
    authoritative_date: Option<String>,
) -> ReconcileResult {
    ReconcileResult {
        descriptor: descriptor.clone(),
        authoritative_version,
        authoritative_date,
        listing_version: None,
        listing_date: None,
        status: ReconcileStatus::FetchError,
    }
}
