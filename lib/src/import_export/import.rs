use super::markup::{tokenize, Token};
use crate::models::BookmarkGroup;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Heading text of the document root folder
pub const ROOT_FOLDER_LABEL: &str = "Bookmarks";
/// Marker of the browser toolbar folder (text or attribute)
pub const TOOLBAR_FOLDER_MARKER: &str = "PERSONAL_TOOLBAR_FOLDER";
/// Name used for folders whose heading has no text
pub const UNNAMED_FOLDER: &str = "Unnamed Folder";

/// How links inside nested folders are assigned to groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    /// Each link belongs to its nearest enclosing folder only
    #[default]
    Nearest,
    /// A folder's group also holds every link of its nested folders
    Flatten,
}

/// Reads bookmark documents from any exporter into named URL groups
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkParser {
    nesting: NestingMode,
}

/// An open `DL` while walking the document
struct Frame {
    /// `None` for containers without a usable heading
    name: Option<String>,
    order: usize,
    direct: Vec<String>,
    nested: Vec<String>,
}

struct Folder {
    name: String,
    order: usize,
    direct: Vec<String>,
    nested: Vec<String>,
}

/// Heading state between `<H3>` and the container it names
enum Heading {
    None,
    /// Inside `<H3>...</H3>`; `skip` when it marks the root or toolbar
    Reading { text: String, skip: bool },
    /// Closed heading waiting for its `DL`
    Pending { name: String, skip: bool },
}

impl BookmarkParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nesting(mut self, nesting: NestingMode) -> Self {
        self.nesting = nesting;
        self
    }

    /// Parse a document into groups in heading order, dropping empty ones
    pub fn parse(&self, html: &str) -> Vec<BookmarkGroup> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut folders: Vec<Folder> = Vec::new();
        let mut heading = Heading::None;
        let mut next_order = 0;

        for token in tokenize(html) {
            // Text of an open heading, up to its close tag or the next structural tag
            if let Heading::Reading { text, skip } = &mut heading {
                match &token {
                    Token::Text(t) => {
                        text.push_str(t);
                        continue;
                    }
                    t if t.is_close("H3") => {
                        heading = finish_heading(text, *skip);
                        continue;
                    }
                    Token::Open { name, .. } if !is_structural(name) => continue,
                    Token::Close { .. } => continue,
                    _ => heading = finish_heading(text, *skip),
                }
            }

            match token {
                _ if token.is_open("H3") => {
                    if let Heading::Pending { name, .. } = &heading {
                        log::debug!("Folder '{}' has no contents, skipping", name);
                    }
                    let skip = token.attr(TOOLBAR_FOLDER_MARKER).is_some();
                    heading = Heading::Reading {
                        text: String::new(),
                        skip,
                    };
                }
                _ if token.is_open("DL") => {
                    let name = match std::mem::replace(&mut heading, Heading::None) {
                        Heading::Pending { name, skip: false } => Some(name),
                        _ => None,
                    };
                    stack.push(Frame {
                        name,
                        order: next_order,
                        direct: Vec::new(),
                        nested: Vec::new(),
                    });
                    next_order += 1;
                }
                _ if token.is_close("DL") => {
                    if let Heading::Pending { name, .. } = &heading {
                        log::debug!("Folder '{}' has no contents, skipping", name);
                        heading = Heading::None;
                    }
                    if let Some(frame) = stack.pop() {
                        close_frame(frame, &mut folders);
                    }
                }
                _ if token.is_open("A") => {
                    if let Heading::Pending { name, .. } = &heading {
                        log::debug!("Folder '{}' is followed by a link, skipping", name);
                        heading = Heading::None;
                    }
                    let href = token.attr("HREF").map(str::trim).unwrap_or_default();
                    if href.is_empty() {
                        continue;
                    }
                    match stack.last_mut() {
                        Some(top) => {
                            log::debug!("Found URL: {}", href);
                            top.direct.push(href.to_string());
                            for frame in stack.iter_mut() {
                                frame.nested.push(href.to_string());
                            }
                        }
                        None => log::debug!("Ignoring link outside any folder: {}", href),
                    }
                }
                _ => {}
            }
        }

        // Unterminated documents close every open folder
        while let Some(frame) = stack.pop() {
            close_frame(frame, &mut folders);
        }

        folders.sort_by_key(|folder| folder.order);
        folders
            .into_iter()
            .map(|folder| {
                let urls = match self.nesting {
                    NestingMode::Nearest => folder.direct,
                    NestingMode::Flatten => folder.nested,
                };
                BookmarkGroup {
                    name: folder.name,
                    urls,
                }
            })
            .filter(|group| !group.is_empty())
            .collect()
    }
}

/// Tags that end a heading even when `</H3>` is missing
fn is_structural(name: &str) -> bool {
    matches!(name, "H3" | "DL" | "DT" | "A" | "H1")
}

fn finish_heading(text: &str, skip_attr: bool) -> Heading {
    let trimmed = text.trim();
    let skip = skip_attr || trimmed == ROOT_FOLDER_LABEL || trimmed.contains(TOOLBAR_FOLDER_MARKER);
    let name = if trimmed.is_empty() {
        UNNAMED_FOLDER.to_string()
    } else {
        trimmed.to_string()
    };

    if skip {
        log::debug!("Skipping root folder '{}'", name);
    } else {
        log::debug!("Found folder: {}", name);
    }
    Heading::Pending { name, skip }
}

fn close_frame(frame: Frame, folders: &mut Vec<Folder>) {
    if let Some(name) = frame.name {
        folders.push(Folder {
            name,
            order: frame.order,
            direct: frame.direct,
            nested: frame.nested,
        });
    }
}

/// Parse a document with the default nesting mode
pub fn parse_bookmark_groups(html: &str) -> Vec<BookmarkGroup> {
    BookmarkParser::new().parse(html)
}

/// Read and parse a bookmark file from disk
pub fn parse_bookmark_file(path: &Path, nesting: NestingMode) -> crate::error::Result<Vec<BookmarkGroup>> {
    let html = std::fs::read_to_string(path)?;
    let groups = BookmarkParser::new().nesting(nesting).parse(&html);
    log::debug!("Parsed {} bookmark groups from {}", groups.len(), path.display());
    Ok(groups)
}
