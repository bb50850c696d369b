//! Read access to the sites, collections and terms the queries are built from.

use crate::config::Config;
use crate::error::{DogearError, Result};
use crate::models::{Collection, Operator, Site, Term, TimeRange};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SITES_PATH: &str = "/api/sites?populate=tags";
pub const COLLECTIONS_PATH: &str =
    "/api/collections?populate[0]=tags&populate[1]=Terms&populate[2]=Terms.term";
pub const TERMS_PATH: &str = "/api/terms";

/// A standalone term record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub id: u64,
    pub text: String,
}

/// Source of sites, collections and terms
pub trait ContentStore {
    fn sites(&self) -> Result<Vec<Site>>;
    fn collections(&self) -> Result<Vec<Collection>>;
    fn terms(&self) -> Result<Vec<TermEntry>>;
}

/// One complete read of a content store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub terms: Vec<TermEntry>,
}

impl Catalog {
    /// Look a collection up by numeric id or case-insensitive name
    pub fn find_collection(&self, key: &str) -> Result<&Collection> {
        let key = key.trim();
        let by_id = key.parse::<u64>().ok();
        self.collections
            .iter()
            .find(|c| Some(c.id) == by_id || c.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| DogearError::NotFound(format!("collection '{}'", key)))
    }

    /// Sites whose host contains `filter`, or every site when no filter is given
    pub fn matching_sites(&self, filter: Option<&str>) -> Vec<Site> {
        match filter {
            Some(f) => {
                let f = f.to_lowercase();
                self.sites
                    .iter()
                    .filter(|s| s.host().to_lowercase().contains(&f))
                    .cloned()
                    .collect()
            }
            None => self.sites.clone(),
        }
    }
}

/// Read sites, collections and terms, failing as a whole if any read fails
pub fn load_catalog(store: &dyn ContentStore) -> Result<Catalog> {
    let sites = store.sites()?;
    let collections = store.collections()?;
    let terms = store.terms()?;
    log::debug!(
        "Loaded {} sites, {} collections, {} terms",
        sites.len(),
        collections.len(),
        terms.len()
    );
    Ok(Catalog {
        sites,
        collections,
        terms,
    })
}

// Wire shapes of the headless CMS

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WireTag {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireSite {
    id: u64,
    #[serde(default)]
    site: String,
    #[serde(default)]
    tags: Option<Vec<WireTag>>,
}

#[derive(Debug, Deserialize)]
struct WireTerm {
    id: u64,
    #[serde(default)]
    term: String,
}

#[derive(Debug, Deserialize)]
struct WireTermComponent {
    #[serde(default)]
    term: Option<WireTerm>,
    #[serde(default)]
    term_id: Option<u64>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    negative: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WireCollection {
    id: u64,
    #[serde(default)]
    collection: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    range: Option<String>,
    #[serde(rename = "Terms", default)]
    terms: Option<Vec<WireTermComponent>>,
    #[serde(default)]
    tags: Option<Vec<WireTag>>,
}

impl WireCollection {
    fn needs_term_lookup(&self) -> bool {
        self.terms
            .iter()
            .flatten()
            .any(|t| t.term.is_none() && t.term_id.is_some())
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<Vec<T>> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| DogearError::Transport(format!("unexpected {} response: {}", what, e)))
}

fn tag_names(tags: Option<Vec<WireTag>>) -> Vec<String> {
    tags.unwrap_or_default().into_iter().map(|t| t.name).collect()
}

fn map_site(wire: WireSite) -> Site {
    Site {
        id: wire.id,
        url: wire.site,
        tags: tag_names(wire.tags),
    }
}

fn map_collection(wire: WireCollection, lookup: &HashMap<u64, String>) -> Collection {
    let terms = wire
        .terms
        .unwrap_or_default()
        .into_iter()
        .map(|component| {
            // Unpopulated relations fall back to the term table, then to blank
            let text = match (component.term, component.term_id) {
                (Some(term), _) => term.term,
                (None, Some(id)) => lookup.get(&id).cloned().unwrap_or_default(),
                (None, None) => String::new(),
            };
            Term {
                text,
                negative: component.negative.unwrap_or(false),
                operator: Operator::from(component.operator),
            }
        })
        .collect();

    Collection {
        id: wire.id,
        name: wire.collection,
        description: wire.description.unwrap_or_default(),
        range: TimeRange::from(wire.range),
        terms,
        tags: tag_names(wire.tags),
    }
}

fn parse_sites(body: &str) -> Result<Vec<Site>> {
    Ok(decode::<WireSite>(body, "sites")?.into_iter().map(map_site).collect())
}

fn parse_terms(body: &str) -> Result<Vec<TermEntry>> {
    Ok(decode::<WireTerm>(body, "terms")?
        .into_iter()
        .map(|t| TermEntry {
            id: t.id,
            text: t.term,
        })
        .collect())
}

fn map_collections(wire: Vec<WireCollection>, terms: &[TermEntry]) -> Vec<Collection> {
    let lookup: HashMap<u64, String> = terms.iter().map(|t| (t.id, t.text.clone())).collect();
    wire.into_iter()
        .map(|c| map_collection(c, &lookup))
        .collect()
}

/// Content store served over HTTP by the headless CMS
pub struct StrapiStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl StrapiStore {
    pub fn new(base_url: &str, token: Option<String>, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.api_token.clone(), &config.user_agent)
    }

    fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send()?;

        let status = resp.status();
        if !status.is_success() {
            let hint = match status.as_u16() {
                401 | 403 => " (check api_token / DOGEAR_API_TOKEN)",
                404 => " (check api_url / DOGEAR_API_URL)",
                _ => "",
            };
            return Err(DogearError::Transport(format!(
                "GET {} returned {}{}",
                path, status, hint
            )));
        }

        Ok(resp.text()?)
    }
}

impl ContentStore for StrapiStore {
    fn sites(&self) -> Result<Vec<Site>> {
        parse_sites(&self.get(SITES_PATH)?)
    }

    fn collections(&self) -> Result<Vec<Collection>> {
        let body = self.get(COLLECTIONS_PATH)?;
        let wire = decode::<WireCollection>(&body, "collections")?;

        let terms = if wire.iter().any(WireCollection::needs_term_lookup) {
            self.terms()?
        } else {
            Vec::new()
        };
        Ok(map_collections(wire, &terms))
    }

    fn terms(&self) -> Result<Vec<TermEntry>> {
        parse_terms(&self.get(TERMS_PATH)?)
    }
}

/// Content store read from a local YAML or JSON document
#[derive(Debug, Clone)]
pub struct FileStore {
    catalog: Catalog,
}

impl FileStore {
    /// JSON when the extension is `.json`, YAML otherwise
    pub fn open(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let catalog: Catalog = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        log::debug!("Opened file store {}", path.display());
        Ok(Self { catalog })
    }
}

impl ContentStore for FileStore {
    fn sites(&self) -> Result<Vec<Site>> {
        Ok(self.catalog.sites.clone())
    }

    fn collections(&self) -> Result<Vec<Collection>> {
        Ok(self.catalog.collections.clone())
    }

    fn terms(&self) -> Result<Vec<TermEntry>> {
        Ok(self.catalog.terms.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    const SITES_BODY: &str = r#"{
        "data": [
            {"id": 1, "documentId": "a1", "site": "jobs.lever.co", "tags": [{"id": 3, "name": "ats"}]},
            {"id": 2, "site": "https://boards.greenhouse.io", "tags": null}
        ],
        "meta": {"pagination": {"total": 2}}
    }"#;

    const TERMS_BODY: &str = r#"{"data": [{"id": 10, "term": "remote job"}, {"id": 11, "term": "intern"}]}"#;

    const COLLECTIONS_BODY: &str = r#"{
        "data": [{
            "id": 7,
            "collection": "Remote",
            "description": null,
            "range": "Past week",
            "Terms": [
                {"id": 1, "term": {"id": 10, "term": "remote job"}, "operator": "OR", "negative": false},
                {"id": 2, "term": null, "term_id": 11, "operator": null, "negative": true},
                {"id": 3, "term": null, "operator": "AND", "negative": false}
            ],
            "tags": [{"name": "jobs"}]
        }]
    }"#;

    #[test]
    fn test_parse_sites() {
        let sites = parse_sites(SITES_BODY).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].url, "jobs.lever.co");
        assert_eq!(sites[0].tags, vec!["ats"]);
        assert_eq!(sites[1].host(), "boards.greenhouse.io");
        assert!(sites[1].tags.is_empty());
    }

    fn parse_collections(body: &str, terms: &[TermEntry]) -> Result<Vec<Collection>> {
        Ok(map_collections(decode(body, "collections")?, terms))
    }

    #[test]
    fn test_parse_collections_resolves_term_ids() {
        let terms = parse_terms(TERMS_BODY).unwrap();
        let collections = parse_collections(COLLECTIONS_BODY, &terms).unwrap();
        let remote = &collections[0];

        assert_eq!(remote.id, 7);
        assert_eq!(remote.name, "Remote");
        assert_eq!(remote.range, TimeRange::PastWeek);
        assert_eq!(remote.description, "");
        assert_eq!(remote.tags, vec!["jobs"]);

        assert_eq!(remote.terms[0], Term::positive("remote job", Operator::Or));
        assert_eq!(remote.terms[1].text, "intern");
        assert!(remote.terms[1].negative);
        // Nothing to resolve from: kept blank, ignored at compile time
        assert_eq!(remote.terms[2].text, "");
        assert_eq!(remote.terms[2].operator, Operator::And);
    }

    #[test]
    fn test_unresolved_term_id_stays_blank() {
        let collections = parse_collections(COLLECTIONS_BODY, &[]).unwrap();
        assert_eq!(collections[0].terms[1].text, "");
    }

    #[test]
    fn test_needs_term_lookup() {
        let wire = decode::<WireCollection>(COLLECTIONS_BODY, "collections").unwrap();
        assert!(wire[0].needs_term_lookup());
    }

    #[test]
    fn test_undecodable_body_is_transport_error() {
        let err = parse_sites("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, DogearError::Transport(_)));
        assert!(err.to_string().starts_with("Failed to load data from the content store"));
    }

    struct FailingStore;

    impl ContentStore for FailingStore {
        fn sites(&self) -> Result<Vec<Site>> {
            Ok(vec![Site::new("a.example")])
        }
        fn collections(&self) -> Result<Vec<Collection>> {
            Err(DogearError::Transport("GET /api/collections returned 500".into()))
        }
        fn terms(&self) -> Result<Vec<TermEntry>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_load_catalog_fails_as_a_whole() {
        assert!(load_catalog(&FailingStore).is_err());
    }

    #[test]
    fn test_file_store_yaml() {
        let file = Builder::new().suffix(".yml").tempfile().unwrap();
        fs::write(
            file.path(),
            r#"
sites:
  - url: jobs.lever.co
collections:
  - id: 3
    name: Remote Rust
    range: Past month
    terms:
      - text: rust
        operator: AND
      - text: intern
        negative: true
"#,
        )
        .unwrap();

        let store = FileStore::open(file.path()).unwrap();
        let catalog = load_catalog(&store).unwrap();
        assert_eq!(catalog.sites, vec![Site::new("jobs.lever.co")]);
        assert!(catalog.terms.is_empty());

        let collection = catalog.find_collection("remote rust").unwrap();
        assert_eq!(collection.range, TimeRange::PastMonth);
        assert_eq!(collection.terms[0].operator, Operator::And);
        assert!(collection.terms[1].negative);
        assert_eq!(catalog.find_collection("3").unwrap().name, "Remote Rust");
    }

    #[test]
    fn test_file_store_json() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        fs::write(
            file.path(),
            r#"{"sites": [{"url": "workable.com", "tags": ["ats"]}], "terms": [{"id": 1, "text": "rust"}]}"#,
        )
        .unwrap();

        let catalog = load_catalog(&FileStore::open(file.path()).unwrap()).unwrap();
        assert_eq!(catalog.sites[0].tags, vec!["ats"]);
        assert_eq!(catalog.terms[0].text, "rust");
        assert!(catalog.collections.is_empty());
    }

    #[test]
    fn test_find_collection_not_found() {
        let catalog = Catalog::default();
        let err = catalog.find_collection("missing").unwrap_err();
        assert!(matches!(err, DogearError::NotFound(_)));
    }

    #[test]
    fn test_matching_sites() {
        let catalog = Catalog {
            sites: vec![Site::new("jobs.lever.co"), Site::new("workable.com")],
            ..Default::default()
        };
        assert_eq!(catalog.matching_sites(Some("LEVER")).len(), 1);
        assert_eq!(catalog.matching_sites(None).len(), 2);
    }
}
