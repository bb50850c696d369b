use super::markup::{escape_attr, escape_text};
use crate::models::{Collection, Site};
use crate::query::{display_terms, QueryCompiler};
use crate::utils;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders a collection into a Netscape bookmark file with a single folder
pub struct HtmlExporter<'a> {
    compiler: &'a QueryCompiler,
    timestamp: i64,
}

impl<'a> HtmlExporter<'a> {
    /// Exporter stamping entries with the current time
    pub fn new(compiler: &'a QueryCompiler) -> Self {
        Self::with_timestamp(compiler, chrono::Utc::now().timestamp())
    }

    pub fn with_timestamp(compiler: &'a QueryCompiler, timestamp: i64) -> Self {
        Self {
            compiler,
            timestamp,
        }
    }

    /// One link per site with a non-empty query, in site order
    pub fn render(&self, collection: &Collection, sites: &[Site]) -> String {
        let now = self.timestamp;
        let mut html = String::new();

        html.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
        html.push_str("<!-- This is an automatically generated file.\n");
        html.push_str("     It will be read and overwritten.\n");
        html.push_str("     DO NOT EDIT! -->\n");
        html.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
        html.push_str("<TITLE>Bookmarks</TITLE>\n");
        html.push_str("<H1>Bookmarks</H1>\n");
        html.push_str("<DL><p>\n");
        html.push_str(&format!(
            "    <DT><H3 ADD_DATE=\"{now}\" LAST_MODIFIED=\"{now}\">{}</H3>\n",
            escape_text(&collection.name)
        ));
        html.push_str("    <DL><p>\n");

        let summary = display_terms(collection);
        for compiled in self.compiler.compile_all(collection, sites) {
            let title = format!("{} {}", utils::simplify_host(&compiled.site.url), summary);
            html.push_str(&format!(
                "        <DT><A HREF=\"{}\" ADD_DATE=\"{now}\">{}</A>\n",
                escape_attr(&compiled.url),
                escape_text(title.trim_end())
            ));
        }

        html.push_str("    </DL><p>\n");
        html.push_str("</DL><p>\n");
        html
    }
}

/// `bookmarks-<slug>.html` for a collection
pub fn default_file_name(collection: &Collection) -> String {
    format!("bookmarks-{}.html", utils::slugify(&collection.name))
}

/// Write a collection's bookmark file, returning the path written
///
/// When `path` is a directory the default file name is used inside it.
pub fn export_collection(
    compiler: &QueryCompiler,
    collection: &Collection,
    sites: &[Site],
    path: &Path,
) -> crate::error::Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(default_file_name(collection))
    } else {
        path.to_path_buf()
    };

    let html = HtmlExporter::new(compiler).render(collection, sites);
    fs::write(&target, html)?;
    log::info!(
        "Exported collection '{}' to {}",
        collection.name,
        target.display()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_export::import::parse_bookmark_groups;
    use crate::models::{Operator, Term, TimeRange};
    use tempfile::tempdir;

    fn collection() -> Collection {
        Collection::new(
            "Remote Rust",
            TimeRange::PastWeek,
            vec![
                Term::positive("remote job", Operator::Or),
                Term::positive("engineer", Operator::Or),
                Term::negative("intern"),
            ],
        )
    }

    fn sites() -> Vec<Site> {
        vec![
            Site::new("jobs.lever.co"),
            Site::new("https://boards.greenhouse.io"),
            Site::new("workable.com"),
        ]
    }

    #[test]
    fn test_render_structure() {
        let compiler = QueryCompiler::default();
        let html = HtmlExporter::with_timestamp(&compiler, 1_700_000_000).render(&collection(), &sites());

        assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n"));
        assert!(html.contains(
            "<DT><H3 ADD_DATE=\"1700000000\" LAST_MODIFIED=\"1700000000\">Remote Rust</H3>"
        ));
        assert_eq!(html.matches("<DT><A HREF=").count(), 3);
        assert_eq!(html.matches("ADD_DATE=\"1700000000\"").count(), 4);
        assert!(html.contains("&amp;tbs=qdr:w\" ADD_DATE=\"1700000000\">lever.co \"remote job\""));
        assert!(html.trim_end().ends_with("    </DL><p>\n</DL><p>"));
    }

    #[test]
    fn test_link_text_uses_simplified_host_and_quoted_terms() {
        let compiler = QueryCompiler::default();
        let html = HtmlExporter::with_timestamp(&compiler, 0).render(&collection(), &sites());
        assert!(html.contains(r#">lever.co "remote job" OR "engineer" -"intern"</A>"#));
        assert!(html.contains(r#">greenhouse.io "remote job""#));
        assert!(html.contains(r#">workable.com "remote job""#));
    }

    #[test]
    fn test_round_trip_keeps_site_order() {
        let compiler = QueryCompiler::default();
        let sites = sites();
        let html = HtmlExporter::new(&compiler).render(&collection(), &sites);

        let groups = parse_bookmark_groups(&html);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Remote Rust");

        let expected: Vec<String> = compiler
            .compile_all(&collection(), &sites)
            .into_iter()
            .map(|c| c.url)
            .collect();
        assert_eq!(groups[0].urls.len(), sites.len());
        assert_eq!(groups[0].urls, expected);
    }

    #[test]
    fn test_collection_without_terms_has_no_links() {
        let compiler = QueryCompiler::default();
        let empty = Collection::new("Nothing", TimeRange::Any, vec![]);
        let html = HtmlExporter::new(&compiler).render(&empty, &sites());
        assert!(!html.contains("<A "));
        assert!(parse_bookmark_groups(&html).is_empty());
    }

    #[test]
    fn test_markup_in_collection_name_survives_round_trip() {
        let compiler = QueryCompiler::default();
        let mut tricky = collection();
        tricky.name = "R&D <Europe>".to_string();
        let html = HtmlExporter::new(&compiler).render(&tricky, &sites());
        assert!(html.contains(">R&amp;D &lt;Europe&gt;</H3>"));
        assert_eq!(parse_bookmark_groups(&html)[0].name, "R&D <Europe>");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name(&collection()), "bookmarks-remote-rust.html");
    }

    #[test]
    fn test_export_collection_into_directory() {
        let dir = tempdir().unwrap();
        let written =
            export_collection(&QueryCompiler::default(), &collection(), &sites(), dir.path()).unwrap();
        assert_eq!(written, dir.path().join("bookmarks-remote-rust.html"));

        let html = fs::read_to_string(&written).unwrap();
        assert_eq!(parse_bookmark_groups(&html)[0].urls.len(), 3);
    }

    #[test]
    fn test_export_collection_to_explicit_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("custom.html");
        let written =
            export_collection(&QueryCompiler::default(), &collection(), &sites(), &target).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }
}
