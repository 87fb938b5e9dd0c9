//! Minimal HTML element tree.
//!
//! Just enough structure for the renderer: elements with ordered
//! attributes, escaped text, and raw HTML fragments.

use std::fmt::Write;

/// Void elements never get a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input", "source"];

/// A node in the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped on output
    Text(String),
    /// Emitted verbatim
    RawHtml(String),
}

/// An HTML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Boolean attribute such as `controls`
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    /// Append a class to the `class` attribute
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(n, _)| n == "class") {
            Some((_, value)) if !value.is_empty() => {
                value.push(' ');
                value.push_str(class);
            }
            Some((_, value)) => value.push_str(class),
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn raw_html(self, html: impl Into<String>) -> Self {
        self.child(Node::RawHtml(html.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn classes(&self) -> Vec<&str> {
        self.get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Serialize to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() && name != "alt" {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl Node {
    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape(text)),
            Node::RawHtml(html) => out.push_str(html),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Serialize a sequence of sibling elements
pub fn to_html(elements: &[Element]) -> String {
    let mut out = String::new();
    for el in elements {
        el.write_html(&mut out);
    }
    out
}

/// Escape text for use in element content or a quoted attribute
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
