//! Plain data model of a fetched listing page
//!
//! The markup is parsed once at fetch time; matching walks this model
//! without touching the HTML again, so cached documents stay cheap to
//! share across descriptors.

use scraper::{ElementRef, Html, Selector};

/// CSS class marking links that point off the listing site
const EXTERNAL_LINK_CLASS: &str = "externalLink";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLink {
    pub href: String,
    pub external: bool,
}

/// One table cell: its own text plus the anchors and emphasized text the
/// matcher scans for artifact keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingCell {
    /// text directly inside the cell, excluding child elements
    pub own_text: String,
    pub is_header: bool,
    pub links: Vec<CellLink>,
    /// text of `<b>` children; only collected for header cells, where
    /// umbrella rows carry their identifier
    pub emphasized: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRow {
    pub cells: Vec<ListingCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTable {
    pub rows: Vec<ListingRow>,
}

impl ListingTable {
    /// Build the table model from listing markup
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("tr").expect("static selector");

        let rows = document
            .select(&row_selector)
            .map(|tr| ListingRow {
                cells: parse_cells(tr),
            })
            .collect();

        Self { rows }
    }
}

fn parse_cells(tr: ElementRef<'_>) -> Vec<ListingCell> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|element| matches!(element.value().name(), "td" | "th"))
        .map(parse_cell)
        .collect()
}

fn parse_cell(cell: ElementRef<'_>) -> ListingCell {
    let is_header = cell.value().name() == "th";
    let mut links = Vec::new();
    let mut emphasized = Vec::new();

    for child in cell.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "a" => {
                if let Some(href) = child.value().attr("href") {
                    links.push(CellLink {
                        href: href.to_string(),
                        external: child
                            .value()
                            .classes()
                            .any(|class| class == EXTERNAL_LINK_CLASS),
                    });
                }
            }
            "b" if is_header => {
                emphasized.push(child.text().collect::<String>().trim().to_string());
            }
            _ => {}
        }
    }

    ListingCell {
        own_text: own_text(cell),
        is_header,
        links,
        emphasized,
    }
}

fn own_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_rows_cells_and_links() {
        let table = ListingTable::parse(
            r#"<html><body><table>
            <tr><th>Plugin</th><th>Version</th><th>Release Date</th></tr>
            <tr>
              <td><a href="/plugins/maven-clean-plugin/">clean</a></td>
              <td>3.8.1</td>
              <td>2024-01-05</td>
            </tr>
            </table></body></html>"#,
        );

        assert_eq!(table.rows.len(), 2);

        let header = &table.rows[0];
        assert!(header.cells.iter().all(|cell| cell.is_header));

        let body = &table.rows[1];
        assert_eq!(body.cells.len(), 3);
        assert_eq!(
            body.cells[0].links,
            vec![CellLink {
                href: "/plugins/maven-clean-plugin/".to_string(),
                external: false,
            }]
        );
        assert_eq!(body.cells[1].own_text, "3.8.1");
        assert_eq!(body.cells[2].own_text, "2024-01-05");
    }

    #[test]
    fn own_text_excludes_child_elements() {
        let table = ListingTable::parse(
            r#"<table><tr><td><a href="/x/">link label</a> 2.0.1 <span>extra</span></td></tr></table>"#,
        );

        assert_eq!(table.rows[0].cells[0].own_text, "2.0.1");
    }

    #[test]
    fn external_links_are_flagged() {
        let table = ListingTable::parse(
            r#"<table><tr>
            <td><a class="externalLink" href="https://elsewhere.example/x/">x</a></td>
            <td><a href="/local/y/">y</a></td>
            </tr></table>"#,
        );

        let cells = &table.rows[0].cells;
        assert!(cells[0].links[0].external);
        assert!(!cells[1].links[0].external);
    }

    #[test]
    fn header_emphasis_is_collected() {
        let table = ListingTable::parse(
            r#"<table><tr><th><b>Maven Parent POMs</b></th><td>41</td><td>2024-01-05</td></tr></table>"#,
        );

        let row = &table.rows[0];
        assert_eq!(row.cells[0].emphasized, vec!["Maven Parent POMs"]);
        assert_eq!(row.cells[1].own_text, "41");
    }

    #[test]
    fn emphasis_in_body_cells_is_not_collected() {
        let table =
            ListingTable::parse(r#"<table><tr><td><b>just bold text</b></td></tr></table>"#);

        assert!(table.rows[0].cells[0].emphasized.is_empty());
    }
}
