use serde::{Deserialize, Serialize};

/// A named, ordered list of URLs recovered from one bookmark folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkGroup {
    pub name: String,
    pub urls: Vec<String>,
}

impl BookmarkGroup {
    pub fn new(name: &str, urls: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            urls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Drop groups that have no URLs
pub fn non_empty(groups: Vec<BookmarkGroup>) -> Vec<BookmarkGroup> {
    groups.into_iter().filter(|g| !g.is_empty()).collect()
}

/// Total number of URLs across groups
pub fn total_urls(groups: &[BookmarkGroup]) -> usize {
    groups.iter().map(|g| g.urls.len()).sum()
}
