//! Lenient tokenizer for Netscape bookmark markup.
//!
//! Bookmark files leave `<DT>` and `<p>` unclosed and mix upper and lower
//! case freely, so they are read as a flat stream of open tags, close tags
//! and text rather than as a DOM. Tag names are upper-cased, attribute names
//! are upper-cased, and attribute values and text are entity-decoded.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open { name: String, attrs: Vec<(String, String)> },
    Close { name: String },
    Text(String),
}

impl Token {
    pub fn is_open(&self, tag: &str) -> bool {
        matches!(self, Token::Open { name, .. } if name == tag)
    }

    pub fn is_close(&self, tag: &str) -> bool {
        matches!(self, Token::Close { name } if name == tag)
    }

    /// Value of an attribute on an open tag
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Token::Open { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        // Quoted values may hold `>`; a bare `<` means the tag never closed
        Regex::new(r#"^<\s*(/)?\s*([A-Za-z][A-Za-z0-9]*)((?:"[^"]*"|'[^']*'|[^'"<>])*)>"#)
            .expect("valid tag regex")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#,
        )
        .expect("valid attribute regex")
    })
}

/// Split a document into tokens. Never fails; unrecognized `<` is text.
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = html;
    let last_gt = html.rfind('>');

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        rest = &rest[lt..];

        // Nothing after this point can close a tag
        let offset = html.len() - rest.len();
        if last_gt.map_or(true, |gt| gt < offset) {
            break;
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            // Unterminated comments swallow the rest of the document
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        match tag_regex().captures(rest) {
            Some(caps) => {
                flush_text(&mut text, &mut tokens);

                let name = caps[2].to_ascii_uppercase();
                if caps.get(1).is_some() {
                    tokens.push(Token::Close { name });
                } else {
                    let attrs = caps.get(3).map(|m| parse_attrs(m.as_str())).unwrap_or_default();
                    tokens.push(Token::Open { name, attrs });
                }

                rest = &rest[caps[0].len()..];
            }
            None => {
                text.push('<');
                rest = &rest[1..];
            }
        }
    }

    text.push_str(rest);
    flush_text(&mut text, &mut tokens);
    tokens
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text(decode_entities(text)));
        text.clear();
    }
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    attr_regex()
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_uppercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Decode the character references bookmark exporters emit
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = reference.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escape text content for markup
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value
pub fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn open(name: &str) -> Token {
        Token::Open {
            name: name.to_string(),
            attrs: vec![],
        }
    }

    #[test]
    fn test_tokenize_mixed_case_and_unclosed_tags() {
        let tokens = tokenize("<dl><p>\n<DT><a href=\"https://x\">X</A>\n</Dl>");
        assert_eq!(tokens[0], open("DL"));
        assert_eq!(tokens[1], open("P"));
        assert_eq!(tokens[2], Token::Text("\n".into()));
        assert_eq!(tokens[3], open("DT"));
        assert_eq!(tokens[4].attr("HREF"), Some("https://x"));
        assert_eq!(tokens[5], Token::Text("X".into()));
        assert!(tokens[6].is_close("A"));
        assert!(tokens[8].is_close("DL"));
    }

    #[test]
    fn test_comments_and_doctype_are_skipped() {
        let tokens = tokenize(
            "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n<!-- <H3>hidden</H3> -->\n<H1>Bookmarks</H1>",
        );
        assert!(tokens.iter().all(|t| !t.is_open("H3")));
        assert!(tokens.iter().any(|t| t.is_open("H1")));
    }

    #[test]
    fn test_attribute_forms() {
        let tokens = tokenize(r#"<A HREF='single' ADD_DATE=123 PRIVATE data-x="a &amp; b">"#);
        let tag = &tokens[0];
        assert_eq!(tag.attr("HREF"), Some("single"));
        assert_eq!(tag.attr("ADD_DATE"), Some("123"));
        assert_eq!(tag.attr("PRIVATE"), Some(""));
        assert_eq!(tag.attr("DATA-X"), Some("a & b"));
    }

    #[test]
    fn test_stray_less_than_is_text() {
        let tokens = tokenize("a < b <3");
        assert_eq!(tokens, vec![Token::Text("a < b <3".into())]);
    }

    #[test]
    fn test_quoted_greater_than_stays_in_attribute() {
        let tokens = tokenize(r#"<A HREF="https://example.com/search?q=a>b" TITLE='x>y'>Q</A>"#);
        assert_eq!(tokens[0].attr("HREF"), Some("https://example.com/search?q=a>b"));
        assert_eq!(tokens[0].attr("TITLE"), Some("x>y"));
        assert_eq!(tokens[1], Token::Text("Q".into()));
        assert!(tokens[2].is_close("A"));
    }

    #[test]
    fn test_less_than_in_text_keeps_next_tag() {
        let tokens = tokenize("<H3>a<b</H3>");
        assert_eq!(
            tokens,
            vec![
                open("H3"),
                Token::Text("a<b".into()),
                Token::Close { name: "H3".into() },
            ]
        );
    }

    #[test]
    fn test_unterminated_tags_become_text() {
        let input = "<a ".repeat(20_000);
        assert_eq!(tokenize(&input), vec![Token::Text(input.clone())]);
    }

    #[test]
    fn test_unterminated_comment_consumes_rest() {
        let tokens = tokenize("<H3>x</H3><!-- never closed <A HREF=\"y\">");
        assert!(tokens.iter().all(|t| !t.is_open("A")));
    }

    #[rstest]
    #[case("a &amp; b", "a & b")]
    #[case("&lt;tag&gt;", "<tag>")]
    #[case("&quot;q&quot; &#39;s&#39;", "\"q\" 's'")]
    #[case("&#x41;&#66;", "AB")]
    #[case("q=1&tbs=qdr:w", "q=1&tbs=qdr:w")]
    #[case("AT&T", "AT&T")]
    #[case("&unknown;", "&unknown;")]
    fn test_decode_entities(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(input), expected);
    }

    #[test]
    fn test_escape_then_decode_is_identity() {
        let raw = r#"https://x/search?q=a&tbs=qdr:w "<b>""#;
        assert_eq!(decode_entities(&escape_attr(raw)), raw);
        assert_eq!(decode_entities(&escape_text(raw)), raw);
    }
}
