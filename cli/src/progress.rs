use dogear::error::{DogearError, Result};
use dogear::store::{load_catalog, Catalog, ContentStore};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Steady-ticking spinner on stderr
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Read the whole catalog with visual spinner feedback
///
/// Shows an animated spinner while loading, then a success or categorized
/// failure line.
pub fn load_with_spinner(store: &dyn ContentStore, source: &str) -> Result<Catalog> {
    let source_display = truncate_url(source, 60);
    let spinner = spinner(format!("Loading: {}", source_display));

    let result = load_catalog(store);

    match &result {
        Ok(catalog) => spinner.finish_with_message(format!(
            "✓ {} ({} collections, {} sites)",
            source_display,
            catalog.collections.len(),
            catalog.sites.len()
        )),
        Err(e) => {
            spinner.finish_with_message(format!("✗ {} ({})", source_display, categorize_error(e)))
        }
    }

    result
}

/// Truncate URL to specified length with ellipsis
pub fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() > max_len {
        let keep = max_len.saturating_sub(3);
        format!("{}...", url.chars().take(keep).collect::<String>())
    } else {
        url.to_string()
    }
}

/// Short label for a load failure
pub fn categorize_error(error: &DogearError) -> &'static str {
    match error {
        DogearError::Io(_) => "unreadable file",
        DogearError::Yaml(_) | DogearError::Json(_) => "invalid file",
        _ => {
            let message = error.to_string().to_lowercase();
            if message.contains("401") || message.contains("403") {
                "unauthorized"
            } else if message.contains("404") {
                "not found"
            } else if message.contains("timed out") || message.contains("timeout") {
                "timeout"
            } else if message.contains("unexpected") {
                "bad response"
            } else if message.contains("connect") || message.contains("dns") {
                "connection error"
            } else {
                "load error"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogear::models::{Collection, Site};
    use dogear::store::TermEntry;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", 60, "https://example.com")]
    #[case(
        "https://example.com/very/long/path/that/exceeds/the/limit",
        30,
        "https://example.com/very/lo..."
    )]
    #[case("https://example.com/test", 20, "https://example.c...")]
    fn test_truncate_url(#[case] url: &str, #[case] max_len: usize, #[case] expected: &str) {
        let result = truncate_url(url, max_len);
        assert_eq!(result, expected);
        assert!(result.len() <= max_len);
    }

    #[rstest]
    #[case(DogearError::Transport("GET /api/sites returned 403 Forbidden".into()), "unauthorized")]
    #[case(DogearError::Transport("GET /api/sites returned 404 Not Found".into()), "not found")]
    #[case(DogearError::Transport("unexpected sites response: EOF".into()), "bad response")]
    #[case(DogearError::Yaml("bad indent".into()), "invalid file")]
    #[case(DogearError::Other("something else".into()), "load error")]
    fn test_categorize_error(#[case] error: DogearError, #[case] expected: &str) {
        assert_eq!(categorize_error(&error), expected);
    }

    struct BrokenStore;

    impl ContentStore for BrokenStore {
        fn sites(&self) -> Result<Vec<Site>> {
            Err(DogearError::Transport("GET /api/sites returned 500".into()))
        }
        fn collections(&self) -> Result<Vec<Collection>> {
            Ok(vec![])
        }
        fn terms(&self) -> Result<Vec<TermEntry>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_load_with_spinner_passes_error_through() {
        let err = load_with_spinner(&BrokenStore, "http://localhost:1337").unwrap_err();
        assert!(matches!(err, DogearError::Transport(_)));
    }
}
