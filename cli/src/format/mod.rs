use crate::output::colorize::{Colorize, ColorizeCollection, ColorizeSite, Palette};
use dogear::error::Result;
use dogear::models::{Collection, Site};

pub mod json;
pub mod yaml;

/// Print rendered output, ending with exactly one newline
pub fn emit(out: &str) {
    if out.ends_with('\n') {
        print!("{}", out);
    } else {
        println!("{}", out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Colored,
        }
    }

    pub fn from_option(format: Option<&str>) -> Self {
        format.map(Self::from_string).unwrap_or(OutputFormat::Colored)
    }

    pub fn render_collections(self, records: &[Collection], no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(records),
            OutputFormat::Yaml => yaml::to_yaml(records),
            OutputFormat::Colored => {
                let palette = Palette::new(no_color);
                Ok(records
                    .iter()
                    .map(|c| ColorizeCollection(c).render(palette))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    pub fn render_sites(self, records: &[Site], no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(records),
            OutputFormat::Yaml => yaml::to_yaml(records),
            OutputFormat::Colored => {
                let palette = Palette::new(no_color);
                Ok(records
                    .iter()
                    .map(|s| ColorizeSite(s).render(palette))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogear::models::TimeRange;
    use rstest::rstest;

    #[rstest]
    #[case("json", OutputFormat::Json)]
    #[case("yaml", OutputFormat::Yaml)]
    #[case("yml", OutputFormat::Yaml)]
    #[case("table", OutputFormat::Colored)]
    fn test_from_string(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(OutputFormat::from_string(input), expected);
    }

    #[test]
    fn test_collections_as_json() {
        let records = vec![Collection::new("Remote", TimeRange::PastHour, vec![])];
        let out = OutputFormat::Json.render_collections(&records, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Remote");
        assert_eq!(value[0]["range"], "Past hour");
    }

    #[test]
    fn test_sites_as_yaml() {
        let out = OutputFormat::Yaml
            .render_sites(&[Site::new("workable.com")], true)
            .unwrap();
        assert!(out.contains("url: workable.com"));
    }
}
