//! Known listing pages and their table layout

/// Index listing the parent poms; singleton group artifacts are checked here
pub const POMS_INDEX_URL: &str = "https://maven.apache.org/pom/";

/// One listing page plus the layout of its component table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub url: String,
    pub name: String,
    /// 1-based column position holding the version text
    pub version_column: usize,
    /// whether the column after the version holds a date
    pub has_date: bool,
}

impl ListingPage {
    pub fn new(url: &str, name: &str, version_column: usize, has_date: bool) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            version_column,
            has_date,
        }
    }
}

/// Lookup table from listing URL to page layout
#[derive(Debug, Clone, Default)]
pub struct ListingSet {
    pages: Vec<ListingPage>,
}

impl ListingSet {
    pub fn new(pages: Vec<ListingPage>) -> Self {
        Self { pages }
    }

    /// The listings this tool knows how to read out of the box
    pub fn builtin() -> Self {
        Self::new(vec![
            ListingPage::new("https://maven.apache.org/plugins/", "Plugins", 3, true),
            ListingPage::new("https://maven.apache.org/shared/", "Shared", 2, true),
            ListingPage::new("https://maven.apache.org/skins/", "Skins", 2, false),
            ListingPage::new(POMS_INDEX_URL, "Poms", 2, true),
        ])
    }

    pub fn get(&self, url: &str) -> Option<&ListingPage> {
        self.pages.iter().find(|page| page.url == url)
    }
}
