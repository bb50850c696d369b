use serde::{Deserialize, Serialize};

/// Boolean join applied across the positive terms of a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Operator {
    #[default]
    None,
    Or,
    And,
}

impl Operator {
    /// Keyword placed between positive terms; `None` joins with OR
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::None | Operator::Or => "OR",
            Operator::And => "AND",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::None => "None",
            Operator::Or => "OR",
            Operator::And => "AND",
        }
    }
}

impl From<Option<String>> for Operator {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("or") => Operator::Or,
            Some(s) if s.eq_ignore_ascii_case("and") => Operator::And,
            _ => Operator::None,
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// Time window applied to search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TimeRange {
    PastHour,
    Past24h,
    PastWeek,
    Past2Weeks,
    PastMonth,
    Past2Months,
    Past4Months,
    Past6Months,
    PastYear,
    #[default]
    Any,
}

impl TimeRange {
    pub const ALL: [TimeRange; 10] = [
        TimeRange::PastHour,
        TimeRange::Past24h,
        TimeRange::PastWeek,
        TimeRange::Past2Weeks,
        TimeRange::PastMonth,
        TimeRange::Past2Months,
        TimeRange::Past4Months,
        TimeRange::Past6Months,
        TimeRange::PastYear,
        TimeRange::Any,
    ];

    /// Label used by the content store
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::PastHour => "Past hour",
            TimeRange::Past24h => "Past 24 hours",
            TimeRange::PastWeek => "Past week",
            TimeRange::Past2Weeks => "Past 2 weeks",
            TimeRange::PastMonth => "Past month",
            TimeRange::Past2Months => "Past 2 months",
            TimeRange::Past4Months => "Past 4 months",
            TimeRange::Past6Months => "Past 6 months",
            TimeRange::PastYear => "Past year",
            TimeRange::Any => "Any time",
        }
    }

    /// Unknown labels map to `Any`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.label().eq_ignore_ascii_case(label))
            .unwrap_or(TimeRange::Any)
    }

    /// Search engine `qdr` code, `None` for `Any`
    pub fn qdr_code(self) -> Option<&'static str> {
        match self {
            TimeRange::PastHour => Some("h"),
            TimeRange::Past24h => Some("d"),
            TimeRange::PastWeek => Some("w"),
            TimeRange::Past2Weeks => Some("w2"),
            TimeRange::PastMonth => Some("m"),
            TimeRange::Past2Months => Some("m2"),
            TimeRange::Past4Months => Some("m4"),
            TimeRange::Past6Months => Some("m6"),
            TimeRange::PastYear => Some("y"),
            TimeRange::Any => None,
        }
    }
}

impl From<Option<String>> for TimeRange {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(TimeRange::from_label)
            .unwrap_or_default()
    }
}

impl From<TimeRange> for Option<String> {
    fn from(range: TimeRange) -> Self {
        match range {
            TimeRange::Any => None,
            other => Some(other.label().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    #[serde(default)]
    pub negative: bool,
    #[serde(default)]
    pub operator: Operator,
}

impl Term {
    pub fn positive(text: &str, operator: Operator) -> Self {
        Self {
            text: text.to_string(),
            negative: false,
            operator,
        }
    }

    pub fn negative(text: &str) -> Self {
        Self {
            text: text.to_string(),
            negative: true,
            operator: Operator::None,
        }
    }
}

/// A named term set with its time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub range: TimeRange,
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Collection {
    pub fn new(name: &str, range: TimeRange, terms: Vec<Term>) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            description: String::new(),
            range,
            terms,
            tags: Vec::new(),
        }
    }

    /// Terms that carry text, split into (positive, negative) in original order
    pub fn partition_terms(&self) -> (Vec<&Term>, Vec<&Term>) {
        self.terms
            .iter()
            .filter(|term| !term.text.trim().is_empty())
            .partition(|term| !term.negative)
    }

    pub fn has_terms(&self) -> bool {
        self.terms.iter().any(|term| !term.text.trim().is_empty())
    }
}

/// A target site, bare host or protocol-prefixed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Site {
    pub fn new(url: &str) -> Self {
        Self {
            id: 0,
            url: url.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn host(&self) -> &str {
        crate::utils::strip_scheme(&self.url)
    }
}

/// A search URL compiled for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub site: Site,
    pub url: String,
}
