use std::path::PathBuf;

/// URL prefixes that are opened as-is; anything else gets `https://`.
const KNOWN_SCHEMES: &[&str] = &[
    "http://", "https://", "ftp://", "file://", "about:", "chrome://", "edge://",
];

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("dogear");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/dogear");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("dogear");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Strip a leading `http://` or `https://` from a site URL
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Shorten a host to its last two labels: `jobs.lever.co` -> `lever.co`
pub fn simplify_host(url: &str) -> String {
    let host = strip_scheme(url);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

/// Prefix `https://` unless the URL already carries a recognized scheme
pub fn ensure_https(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Lower-case a name and collapse whitespace runs into `-`
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
