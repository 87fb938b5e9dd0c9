//! The display surface: an HTML page held in memory.
//!
//! The renderer only needs two things from a page: find the element with a
//! given id, and replace everything between its opening and closing tags.
//! The rest of the document is kept byte for byte.
//!
//! Replaced content is bracketed by [`REGION_START`] and [`REGION_END`].
//! Scans jump over a bracketed region as a whole, so markup inside it that
//! does not balance cannot hide the element's closing tag on the next run.

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};

pub const REGION_START: &str = "<!-- shelf:start -->";
pub const REGION_END: &str = "<!-- shelf:end -->";

/// An HTML page whose elements can be addressed by id
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    source: String,
}

/// An opening tag located in the source
#[derive(Debug)]
struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
    /// Byte offset just past the closing `>`
    end: usize,
    self_closing: bool,
}

impl HtmlDocument {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a page from disk
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page: {}", path.display()))?;
        Ok(Self::new(source))
    }

    /// Write the page back to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.source)
            .with_context(|| format!("Failed to write page: {}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.inner_range(id).is_some()
    }

    /// Current inner HTML of the element with this id, without region markers
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.inner_range(id).map(|range| {
            let inner = &self.source[range];
            inner
                .strip_prefix(REGION_START)
                .and_then(|rest| rest.strip_suffix(REGION_END))
                .unwrap_or(inner)
        })
    }

    /// Replace the element's children. Returns `false` if no such element.
    pub fn replace_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.inner_range(id) {
            Some(range) => {
                let region = format!(
                    "{}{}{}",
                    REGION_START,
                    html.replace(REGION_END, ""),
                    REGION_END
                );
                self.source.replace_range(range, &region);
                true
            }
            None => false,
        }
    }

    /// Byte range of the element's content
    fn inner_range(&self, id: &str) -> Option<Range<usize>> {
        let src = self.source.as_str();
        let mut pos = 0;

        while let Some(offset) = src[pos..].find('<') {
            let at = pos + offset;
            if src[at..].starts_with("<!--") {
                pos = skip_comment(src, at);
                continue;
            }
            match parse_open_tag(src, at) {
                Some(tag) => {
                    let matches = tag
                        .attrs
                        .iter()
                        .any(|(name, value)| name == "id" && value == id);
                    if matches {
                        if tag.self_closing {
                            return None;
                        }
                        let close = find_matching_close(src, tag.end, &tag.name)?;
                        return Some(tag.end..close);
                    }
                    pos = tag.end;
                }
                None => pos = at + 1,
            }
        }

        None
    }
}

/// Offset just past the comment at `at`, or past the whole region it opens
fn skip_comment(src: &str, at: usize) -> usize {
    if src[at..].starts_with(REGION_START) {
        let body = at + REGION_START.len();
        if let Some(end) = src[body..].find(REGION_END) {
            return body + end + REGION_END.len();
        }
    }
    src[at + 4..]
        .find("-->")
        .map(|end| at + 4 + end + 3)
        .unwrap_or(src.len())
}

/// Parse `<name attr="v" ...>` starting at `at` (which holds `<`)
fn parse_open_tag(src: &str, at: usize) -> Option<OpenTag> {
    let bytes = src.as_bytes();
    let mut i = at + 1;

    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = src[name_start..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        match bytes[i] {
            b'>' => {
                return Some(OpenTag {
                    name,
                    attrs,
                    end: i + 1,
                    self_closing: false,
                })
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    name,
                    attrs,
                    end: i + 2,
                    self_closing: true,
                })
            }
            b'/' => i += 1,
            _ => {
                let attr_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                let attr_name = src[attr_start..i].to_ascii_lowercase();

                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let mut value = String::new();
                if bytes.get(i) == Some(&b'=') {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    match bytes.get(i) {
                        Some(&quote @ (b'"' | b'\'')) => {
                            let value_start = i + 1;
                            let len = src[value_start..].find(quote as char)?;
                            value = src[value_start..value_start + len].to_string();
                            i = value_start + len + 1;
                        }
                        Some(_) => {
                            let value_start = i;
                            while i < bytes.len()
                                && !bytes[i].is_ascii_whitespace()
                                && bytes[i] != b'>'
                            {
                                i += 1;
                            }
                            value = src[value_start..i].to_string();
                        }
                        None => return None,
                    }
                }
                attrs.push((attr_name, value));
            }
        }
    }
}

/// Find the `</name>` that closes an element whose content starts at `from`
fn find_matching_close(src: &str, from: usize, name: &str) -> Option<usize> {
    if is_void(name) {
        return None;
    }
    let mut depth = 0usize;
    let mut pos = from;

    while let Some(offset) = src[pos..].find('<') {
        let at = pos + offset;
        let rest = &src[at..];

        if rest.starts_with("<!--") {
            pos = skip_comment(src, at);
            continue;
        }

        if let Some(after) = rest.strip_prefix("</") {
            if tag_name_matches(after, name) {
                if depth == 0 {
                    return Some(at);
                }
                depth -= 1;
            }
            pos = at + 2;
            continue;
        }

        match parse_open_tag(src, at) {
            Some(tag) => {
                if tag.name == name && !tag.self_closing {
                    depth += 1;
                }
                pos = tag.end;
            }
            None => pos = at + 1,
        }
    }

    None
}

fn tag_name_matches(rest: &str, name: &str) -> bool {
    rest.len() >= name.len()
        && rest.is_char_boundary(name.len())
        && rest[..name.len()].eq_ignore_ascii_case(name)
        && rest[name.len()..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_ascii_whitespace())
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}
