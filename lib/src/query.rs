use crate::models::{Collection, CompiledQuery, Site};

pub const DEFAULT_SEARCH_ENGINE: &str = "www.google.com";

/// Compiles collections into search-engine URLs, one per site
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    search_engine: String,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_ENGINE)
    }
}

impl QueryCompiler {
    pub fn new(search_engine: &str) -> Self {
        let engine = crate::utils::strip_scheme(search_engine).trim_end_matches('/');
        Self {
            search_engine: engine.to_string(),
        }
    }

    /// Build the search URL for one site, `None` when the collection has no terms
    pub fn compile(&self, collection: &Collection, site: &Site) -> Option<CompiledQuery> {
        let query = build_query_text(collection, site)?;
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();

        let mut url = format!("https://{}/search?q={}", self.search_engine, encoded);
        if let Some(code) = collection.range.qdr_code() {
            url.push_str("&tbs=qdr:");
            url.push_str(code);
        }

        Some(CompiledQuery {
            site: site.clone(),
            url,
        })
    }

    /// Compile for every site, skipping sites that yield no query
    pub fn compile_all(&self, collection: &Collection, sites: &[Site]) -> Vec<CompiledQuery> {
        sites
            .iter()
            .filter_map(|site| self.compile(collection, site))
            .collect()
    }
}

/// The literal query text, e.g. `site:jobs.lever.co ("remote job" OR engineer) -intern`
pub fn build_query_text(collection: &Collection, site: &Site) -> Option<String> {
    if !collection.has_terms() {
        return None;
    }

    let (positive, negative) = collection.partition_terms();
    let mut query = format!("site:{}", site.host());

    if let Some(first) = positive.first() {
        let joiner = format!(" {} ", first.operator.keyword());
        let joined = positive
            .iter()
            .map(|term| quote_if_spaced(&term.text))
            .collect::<Vec<_>>()
            .join(&joiner);
        query.push_str(&format!(" ({})", joined));
    }

    if !negative.is_empty() {
        let joined = negative
            .iter()
            .map(|term| format!("-{}", quote_if_spaced(&term.text)))
            .collect::<Vec<_>>()
            .join(" ");
        query.push(' ');
        query.push_str(&joined);
    }

    Some(query)
}

/// Human-readable term summary with every term quoted: `"a" OR "b" -"c"`
pub fn display_terms(collection: &Collection) -> String {
    let (positive, negative) = collection.partition_terms();
    let mut parts = Vec::new();

    if let Some(first) = positive.first() {
        let joiner = format!(" {} ", first.operator.keyword());
        parts.push(
            positive
                .iter()
                .map(|term| format!("\"{}\"", term.text))
                .collect::<Vec<_>>()
                .join(&joiner),
        );
    }

    parts.extend(negative.iter().map(|term| format!("-\"{}\"", term.text)));
    parts.join(" ")
}

fn quote_if_spaced(text: &str) -> String {
    if text.chars().any(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text.to_string()
    }
}
