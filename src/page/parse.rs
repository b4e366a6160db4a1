//! HTML → [`Page`] parsing.
//!
//! The document is parsed with `tl` and walked once in document order:
//!
//! ```text
//! <h1>Go Tips 101</h1>                    → page title
//! <ul class="index">                      → declared index block
//!   <li><a href="#defer">…</a></li>       →   declared entry + CrossLink
//! </ul>
//! <a class="anchor" id="defer"></a>       → Section { anchor: "defer" }
//! <h3>Use defer to …</h3>                 →   its title
//! <p>… <a href="panic.html#recover">      → CrossLink
//! <h3 id="misc">Misc</h3>                 → Section { anchor: "misc" }
//! <!-- draft tips -->                     → skipped
//! ```

use thiserror::Error;

use super::markup::{LineIndex, check_structure};
use super::{Anchor, AnchorTarget, CrossLink, Page, Section};
use crate::index::IndexEntry;
use crate::utils::html::plain_text;
use crate::utils::path::route::percent_decode;

/// Why a page could not be turned into sections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not valid UTF-8")]
    Encoding,

    #[error("unmatched </{tag}> at line {line}")]
    UnmatchedClose { tag: String, line: usize },

    #[error("</{found}> at line {line} closes <{open}> opened at line {open_line}")]
    Mismatched {
        found: String,
        line: usize,
        open: String,
        open_line: usize,
    },

    #[error("unclosed <{tag}> opened at line {line}")]
    Unclosed { tag: String, line: usize },

    #[error("html parser rejected the document: {0}")]
    Html(String),
}

/// Parse one page. `path` is its corpus-relative identifier.
pub fn parse_page(path: &str, bytes: &[u8]) -> Result<Page, ParseError> {
    let source = std::str::from_utf8(bytes).map_err(|_| ParseError::Encoding)?;
    let lines = LineIndex::new(source);
    check_structure(source, &lines)?;

    let dom = tl::parse(source, tl::ParserOptions::default())
        .map_err(|e| ParseError::Html(format!("{e:?}")))?;
    let parser = dom.parser();

    let mut walker = Walker::new(path, parser, &lines);
    for handle in dom.children() {
        walker.visit(*handle);
    }
    Ok(walker.finish())
}

// ============================================================================
// Walker
// ============================================================================

/// Tags whose text is never section body.
const SKIPPED: &[&str] = &["script", "style", "template"];

/// Headings that title sections. `<h1>` titles the page instead.
#[inline]
fn is_subheading(tag: &str) -> bool {
    matches!(tag, "h2" | "h3" | "h4" | "h5" | "h6")
}

struct Walker<'p, 'buf> {
    parser: &'p tl::Parser<'buf>,
    lines: &'p LineIndex,
    page: Page,
    h1_title: Option<String>,
    head_title: Option<String>,
    /// Last section came from an anchor marker and still waits for its heading.
    pending_marker: bool,
    /// Currently inside the declared index block.
    in_index: bool,
    /// Currently inside a heading (text is title, not body).
    in_heading: bool,
    /// Section titled by the subheading currently being walked.
    heading_section: Option<usize>,
}

impl<'p, 'buf> Walker<'p, 'buf> {
    fn new(path: &str, parser: &'p tl::Parser<'buf>, lines: &'p LineIndex) -> Self {
        Self {
            parser,
            lines,
            page: Page {
                path: path.to_string(),
                ..Page::default()
            },
            h1_title: None,
            head_title: None,
            pending_marker: false,
            in_index: false,
            in_heading: false,
            heading_section: None,
        }
    }

    fn finish(mut self) -> Page {
        self.page.title = self
            .h1_title
            .or(self.head_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.page.path.clone());
        for section in &mut self.page.sections {
            let body = plain_text(&section.body);
            section.body = body;
        }
        self.page
    }

    fn visit(&mut self, handle: tl::NodeHandle) {
        let Some(node) = handle.get(self.parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => self.visit_tag(tag),
            tl::Node::Raw(bytes) => {
                if self.in_heading {
                    return;
                }
                if let Some(section) = self.page.sections.last_mut() {
                    section.body.push_str(&bytes.as_utf8_str());
                    section.body.push(' ');
                }
            }
            // Commented-out drafts are not content
            tl::Node::Comment(_) => {}
        }
    }

    fn visit_tag(&mut self, tag: &tl::HTMLTag<'buf>) {
        let name = tag.name().as_utf8_str().to_ascii_lowercase();
        if SKIPPED.contains(&name.as_str()) {
            return;
        }

        let line = self.lines.line(tag.boundaries(self.parser).0);
        let attrs = Attrs::collect(tag);

        if name == "title" {
            if self.head_title.is_none() {
                self.head_title = Some(plain_text(&tag.inner_text(self.parser)));
            }
            return;
        }

        if let Some(href) = attrs.get("href").filter(|h| !h.trim().is_empty()) {
            self.page
                .links
                .push(CrossLink::new(self.page.path.as_str(), line, href));
            if self.in_index
                && let Some(anchor) = href.trim().strip_prefix('#')
                && let Some(index) = self.page.declared_index.as_mut()
            {
                index.push(IndexEntry {
                    anchor: percent_decode(anchor).into_owned(),
                    text: plain_text(&tag.inner_text(self.parser)),
                });
            }
        }

        let id = attrs.get("id").map(str::trim).filter(|id| !id.is_empty());

        let opens_index = !self.in_index
            && self.page.declared_index.is_none()
            && (attrs.has_class("index") || id == Some("index"));
        if opens_index {
            self.page.declared_index = Some(Vec::new());
        }

        let is_heading = name == "h1" || is_subheading(&name);
        let mut heading_section = self.heading_section;
        let is_marker = name == "a" && attrs.has_class("anchor");

        if name == "h1" {
            if self.h1_title.is_none() {
                self.h1_title = Some(plain_text(&tag.inner_text(self.parser)));
            }
            if let Some(id) = id {
                self.push_element_anchor(id, line);
            }
        } else if is_marker && let Some(id) = id {
            if self.in_heading {
                // <h3><a class="anchor" id="x"></a>Title</h3>
                self.anchor_heading_section(id, line);
            } else {
                self.open_section(Some(id), String::new(), line);
                self.pending_marker = true;
            }
        } else if is_subheading(&name) {
            let title = plain_text(&tag.inner_text(self.parser));
            let titles_marker = self.pending_marker
                && self
                    .page
                    .sections
                    .last()
                    .is_some_and(|s| s.title.is_empty());

            if titles_marker {
                if let Some(section) = self.page.sections.last_mut() {
                    section.title = title;
                }
                if let Some(id) = id {
                    self.push_element_anchor(id, line);
                }
            } else {
                self.open_section(id, title, line);
            }
            self.pending_marker = false;
            heading_section = Some(self.page.sections.len() - 1);
        } else if let Some(id) = id {
            self.push_element_anchor(id, line);
        }

        let (was_index, was_heading) = (self.in_index, self.in_heading);
        let was_section = std::mem::replace(&mut self.heading_section, heading_section);
        self.in_index |= opens_index;
        self.in_heading |= is_heading;
        for child in tag.children().top().iter() {
            self.visit(*child);
        }
        self.in_index = was_index;
        self.in_heading = was_heading;
        self.heading_section = was_section;
    }

    /// Give the enclosing heading's section an anchor, unless it already has one.
    fn anchor_heading_section(&mut self, id: &str, line: usize) {
        let Some(index) = self.heading_section else {
            self.push_element_anchor(id, line);
            return;
        };
        match self.page.sections.get_mut(index) {
            Some(section) if section.anchor.is_none() => {
                section.anchor = Some(id.to_string());
                self.page.anchors.push(Anchor {
                    id: id.to_string(),
                    line,
                    target: AnchorTarget::Section(index),
                });
            }
            _ => self.push_element_anchor(id, line),
        }
    }

    fn open_section(&mut self, anchor: Option<&str>, title: String, line: usize) {
        let index = self.page.sections.len();
        self.page.sections.push(Section {
            anchor: anchor.map(str::to_string),
            title,
            body: String::new(),
            line,
        });
        if let Some(id) = anchor {
            self.page.anchors.push(Anchor {
                id: id.to_string(),
                line,
                target: AnchorTarget::Section(index),
            });
        }
    }

    fn push_element_anchor(&mut self, id: &str, line: usize) {
        self.page.anchors.push(Anchor {
            id: id.to_string(),
            line,
            target: AnchorTarget::Element,
        });
    }
}

/// Attributes of one tag with lowercased keys.
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn collect(tag: &tl::HTMLTag<'_>) -> Self {
        let attributes = tag.attributes();
        let mut pairs: Vec<(String, String)> = attributes
            .iter()
            .map(|(key, value)| {
                (
                    key.to_ascii_lowercase(),
                    value.map(|v| v.to_string()).unwrap_or_default(),
                )
            })
            .collect();

        // tl keeps id and class outside the generic attribute table
        for (key, value) in [("id", attributes.id()), ("class", attributes.class())] {
            if let Some(value) = value
                && !pairs.iter().any(|(k, _)| k == key)
            {
                pairs.push((key.to_string(), value.as_utf8_str().into_owned()));
            }
        }
        Self(pairs)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
}

// ============================================================================
// Tests
// ============================================================================
