use dogear::models::{BookmarkGroup, Collection, CompiledQuery, Site};
use dogear::query::display_terms;
use dogear::tabs::TabColor;
use owo_colors::{OwoColorize, Style};

/// Applies styles only when color output is enabled
#[derive(Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(no_color: bool) -> Self {
        Self { color: !no_color }
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn id(&self, text: &str) -> String {
        self.paint(text, Style::new().bright_blue())
    }

    fn title(&self, text: &str) -> String {
        self.paint(text, Style::new().bold().green())
    }

    fn marker(&self, text: &str) -> String {
        self.paint(text, Style::new().red())
    }

    /// Marker right-aligned to `width` columns, padded before painting
    fn aligned_marker(&self, text: &str, width: usize) -> String {
        self.marker(&format!("{:>width$}", text))
    }

    fn url(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    fn tags(&self, text: &str) -> String {
        self.paint(text, Style::new().blue())
    }

    /// Group color swatch in the closest terminal color
    pub fn tab_color(&self, color: TabColor) -> String {
        let style = match color {
            TabColor::Blue => Style::new().blue(),
            TabColor::Red => Style::new().red(),
            TabColor::Yellow => Style::new().yellow(),
            TabColor::Green => Style::new().green(),
            TabColor::Pink => Style::new().bright_magenta(),
            TabColor::Purple => Style::new().magenta(),
            TabColor::Cyan => Style::new().cyan(),
            TabColor::Orange => Style::new().bright_red(),
            TabColor::Grey => Style::new().bright_black(),
        };
        self.paint(color.as_str(), style)
    }
}

pub trait Colorize {
    fn render(&self, palette: Palette) -> String;
}

pub struct ColorizeCollection<'a>(pub &'a Collection);

impl<'a> Colorize for ColorizeCollection<'a> {
    fn render(&self, p: Palette) -> String {
        let c = self.0;
        let mut s = String::new();
        let id = c.id.to_string();
        s.push_str(&format!("{}. {}\n", p.id(&id), p.title(&c.name)));
        let padding = id.len() + 3;

        let terms = display_terms(c);
        if !terms.is_empty() {
            s.push_str(&format!("{} {}\n", p.aligned_marker(">", padding), terms));
        }
        s.push_str(&format!("{} {}\n", p.aligned_marker("@", padding), c.range.label()));

        if !c.description.trim().is_empty() {
            s.push_str(&format!("{} {}\n", p.aligned_marker("+", padding), c.description));
        }
        if !c.tags.is_empty() {
            s.push_str(&format!("{} {}\n", p.aligned_marker("#", padding), p.tags(&c.tags.join(", "))));
        }
        s
    }
}

pub struct ColorizeSite<'a>(pub &'a Site);

impl<'a> Colorize for ColorizeSite<'a> {
    fn render(&self, p: Palette) -> String {
        let site = self.0;
        let mut s = format!("{}. {}", p.id(&site.id.to_string()), p.url(&site.url));
        if !site.tags.is_empty() {
            s.push_str(&format!(" {}", p.tags(&format!("[{}]", site.tags.join(", ")))));
        }
        s.push('\n');
        s
    }
}

pub struct ColorizeQuery<'a>(pub &'a CompiledQuery);

impl<'a> Colorize for ColorizeQuery<'a> {
    fn render(&self, p: Palette) -> String {
        format!(
            "{}\n  {} {}\n",
            p.title(self.0.site.host()),
            p.marker(">"),
            p.url(&self.0.url)
        )
    }
}

pub struct ColorizeGroup<'a>(pub &'a BookmarkGroup);

impl<'a> Colorize for ColorizeGroup<'a> {
    fn render(&self, p: Palette) -> String {
        let group = self.0;
        let mut s = format!(
            "{} ({} URLs)\n",
            p.title(&group.name),
            group.urls.len()
        );
        for url in &group.urls {
            s.push_str(&format!("  {} {}\n", p.marker(">"), p.url(url)));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogear::models::{Operator, Term, TimeRange};
    use rstest::rstest;

    fn collection() -> Collection {
        let mut c = Collection::new(
            "Remote Rust",
            TimeRange::PastWeek,
            vec![
                Term::positive("rust", Operator::And),
                Term::negative("intern"),
            ],
        );
        c.id = 42;
        c.tags = vec!["jobs".into(), "rust".into()];
        c
    }

    #[test]
    fn test_collection_output_structure() {
        let rendered = ColorizeCollection(&collection()).render(Palette::new(true));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "42. Remote Rust");
        assert!(lines[1].ends_with("> \"rust\" -\"intern\""));
        assert!(lines[2].ends_with("@ Past week"));
        assert!(lines[3].ends_with("# jobs, rust"));
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn test_markers_keep_their_column_with_color() {
        let plain = ColorizeCollection(&collection()).render(Palette::new(true));
        let colored = ColorizeCollection(&collection()).render(Palette::new(false));

        assert_eq!(plain.lines().nth(2), Some("    @ Past week"));
        assert!(colored.contains('\u{1b}'));
        assert_eq!(strip_ansi(&colored), plain);
    }

    #[test]
    fn test_collection_without_description_has_no_description_line() {
        let rendered = ColorizeCollection(&collection()).render(Palette::new(true));
        assert!(!rendered.lines().any(|line| line.trim().starts_with('+')));
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let colored = ColorizeSite(&Site::new("jobs.lever.co")).render(Palette::new(false));
        let plain = ColorizeSite(&Site::new("jobs.lever.co")).render(Palette::new(true));
        assert!(colored.contains('\u{1b}'));
        assert!(!plain.contains('\u{1b}'));
        assert_eq!(plain, "0. jobs.lever.co\n");
    }

    #[test]
    fn test_group_lists_urls() {
        let group = BookmarkGroup::new("Jobs", vec!["https://a".into(), "https://b".into()]);
        let rendered = ColorizeGroup(&group).render(Palette::new(true));
        assert_eq!(rendered, "Jobs (2 URLs)\n  > https://a\n  > https://b\n");
    }

    #[rstest]
    #[case(TabColor::Grey, "grey")]
    #[case(TabColor::Orange, "orange")]
    fn test_tab_color_plain(#[case] color: TabColor, #[case] expected: &str) {
        assert_eq!(Palette::new(true).tab_color(color), expected);
    }
}
