//! Locating an artifact's row within a listing table

use tracing::debug;

use crate::listing::document::{ListingRow, ListingTable};
use crate::listing::page::ListingPage;

/// How a lookup key is matched against candidate cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// substring of a non-external link's href (ordinary rows)
    AnchorHref,
    /// substring of emphasized header-cell text (umbrella rows)
    HeaderText,
}

/// Umbrella artifacts are rendered differently from ordinary rows, so
/// their derived key is replaced by a listing-specific literal. Adding a
/// case is a data change, not a code change.
const UMBRELLA_KEYS: &[(&str, &str, MatchStrategy)] = &[
    ("maven-parent", "Maven Parent POMs", MatchStrategy::HeaderText),
    ("maven-skins", "skins/", MatchStrategy::AnchorHref),
    ("apache", "asf/", MatchStrategy::AnchorHref),
];

/// Key and strategy used to find an artifact's row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub key: String,
    pub strategy: MatchStrategy,
}

impl LookupKey {
    pub fn for_artifact(artifact_id: &str) -> Self {
        for (id, key, strategy) in UMBRELLA_KEYS {
            if artifact_id == *id {
                return Self {
                    key: (*key).to_string(),
                    strategy: *strategy,
                };
            }
        }
        Self {
            key: format!("/{artifact_id}/"),
            strategy: MatchStrategy::AnchorHref,
        }
    }
}

/// Version and date text found in a matched row. Either field may be
/// absent when the row is shorter than the configured column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMatch {
    pub version: Option<String>,
    pub date: Option<String>,
}

/// Find the listing row for `artifact_id` and read its version/date cells.
///
/// Matching is by substring containment, and the first matching row wins:
/// scanning stops so a looser match later in the document cannot
/// overwrite a correct earlier hit. An artifact id that is a substring of
/// another's can still land on the wrong row first; that approximation is
/// accepted (see DESIGN.md).
pub fn find_entry(
    table: &ListingTable,
    page: &ListingPage,
    artifact_id: &str,
) -> Option<RowMatch> {
    let lookup = LookupKey::for_artifact(artifact_id);

    for row in &table.rows {
        if row_matches(row, &lookup) {
            debug!(
                "matched {} via {:?} in {}",
                artifact_id, lookup.strategy, page.url
            );
            return Some(read_row(row, page));
        }
    }
    None
}

fn row_matches(row: &ListingRow, lookup: &LookupKey) -> bool {
    row.cells.iter().any(|cell| match lookup.strategy {
        MatchStrategy::AnchorHref => cell
            .links
            .iter()
            .any(|link| !link.external && link.href.contains(&lookup.key)),
        MatchStrategy::HeaderText => {
            cell.is_header && cell.emphasized.iter().any(|text| text.contains(&lookup.key))
        }
    })
}

fn read_row(row: &ListingRow, page: &ListingPage) -> RowMatch {
    let version = row
        .cells
        .get(page.version_column - 1)
        .map(|cell| cell.own_text.clone());
    let date = page
        .has_date
        .then(|| row.cells.get(page.version_column).map(|cell| cell.own_text.clone()))
        .flatten();
    RowMatch { version, date }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page(version_column: usize, has_date: bool) -> ListingPage {
        ListingPage::new("https://maven.apache.org/plugins/", "Plugins", version_column, has_date)
    }

    #[rstest]
    #[case("maven-clean-plugin", "/maven-clean-plugin/", MatchStrategy::AnchorHref)]
    #[case("maven-skins", "skins/", MatchStrategy::AnchorHref)]
    #[case("apache", "asf/", MatchStrategy::AnchorHref)]
    #[case("maven-parent", "Maven Parent POMs", MatchStrategy::HeaderText)]
    fn lookup_key_substitutes_umbrella_artifacts(
        #[case] artifact_id: &str,
        #[case] expected_key: &str,
        #[case] expected_strategy: MatchStrategy,
    ) {
        let lookup = LookupKey::for_artifact(artifact_id);

        assert_eq!(lookup.key, expected_key);
        assert_eq!(lookup.strategy, expected_strategy);
    }

    #[test]
    fn finds_ordinary_row_by_anchor_href() {
        let table = ListingTable::parse(
            r#"<table>
            <tr><th>Plugin</th><th>Version</th><th>Release Date</th></tr>
            <tr><td><a href="/plugins/maven-antrun-plugin/">antrun</a></td><td>3.1.0</td><td>2024-02-01</td></tr>
            <tr><td><a href="/plugins/maven-clean-plugin/">clean</a></td><td>3.8.1</td><td>2024-01-05</td></tr>
            </table>"#,
        );

        let found = find_entry(&table, &page(2, true), "maven-clean-plugin").unwrap();

        assert_eq!(found.version.as_deref(), Some("3.8.1"));
        assert_eq!(found.date.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn first_matching_row_wins() {
        let table = ListingTable::parse(
            r#"<table>
            <tr><td><a href="/plugins/maven-clean-plugin/">clean</a></td><td>3.8.1</td></tr>
            <tr><td><a href="/archive/plugins/maven-clean-plugin/old/">old clean</a></td><td>2.5</td></tr>
            </table>"#,
        );

        let found = find_entry(&table, &page(2, false), "maven-clean-plugin").unwrap();

        assert_eq!(found.version.as_deref(), Some("3.8.1"));
    }

    #[test]
    fn external_links_are_not_candidates() {
        let table = ListingTable::parse(
            r#"<table>
            <tr><td><a class="externalLink" href="https://mirror.example/maven-clean-plugin/">mirror</a></td><td>9.9.9</td></tr>
            <tr><td><a href="/plugins/maven-clean-plugin/">clean</a></td><td>3.8.1</td></tr>
            </table>"#,
        );

        let found = find_entry(&table, &page(2, false), "maven-clean-plugin").unwrap();

        assert_eq!(found.version.as_deref(), Some("3.8.1"));
    }

    #[test]
    fn umbrella_parent_matches_header_row() {
        let table = ListingTable::parse(
            r#"<table>
            <tr><td><a href="/pom/asf/">asf</a></td><td>33</td><td>2024-03-01</td></tr>
            <tr><th><b>Maven Parent POMs</b></th><td>41</td><td>2024-01-05</td></tr>
            </table>"#,
        );

        let found = find_entry(&table, &page(2, true), "maven-parent").unwrap();

        assert_eq!(found.version.as_deref(), Some("41"));
        assert_eq!(found.date.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn skins_umbrella_uses_listing_specific_key() {
        let table = ListingTable::parse(
            r#"<table>
            <tr><td><a href="/skins/">all skins</a></td><td>1.3</td></tr>
            </table>"#,
        );

        let found = find_entry(&table, &page(2, false), "maven-skins").unwrap();

        assert_eq!(found.version.as_deref(), Some("1.3"));
    }

    #[test]
    fn missing_row_yields_none() {
        let table = ListingTable::parse(
            r#"<table><tr><td><a href="/plugins/maven-antrun-plugin/">antrun</a></td><td>3.1.0</td></tr></table>"#,
        );

        assert!(find_entry(&table, &page(2, false), "maven-clean-plugin").is_none());
    }

    #[test]
    fn short_row_yields_absent_cells_without_panicking() {
        let table = ListingTable::parse(
            r#"<table><tr><td><a href="/plugins/maven-clean-plugin/">clean</a></td></tr></table>"#,
        );

        let found = find_entry(&table, &page(3, true), "maven-clean-plugin").unwrap();

        assert!(found.version.is_none());
        assert!(found.date.is_none());
    }
}
