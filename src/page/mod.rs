//! Page types: parsed documents, sections, anchors and outgoing links.
//!
//! Pages are parsed once from static HTML and never mutated afterwards.
//! Everything downstream (registry, resolver, index builder) borrows them.

mod graph;
mod link;
mod markup;
mod parse;

use serde::Serialize;

use crate::index::IndexEntry;

pub use graph::LinkGraph;
pub use link::{CrossLink, LinkTarget};
pub use parse::{ParseError, parse_page};

/// A titled block of content, usually introduced by
/// `<a class="anchor" id="...">` followed by a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Anchor id marking this section, if any.
    pub anchor: Option<String>,
    /// Heading text, HTML-stripped. Empty when no heading followed the marker.
    pub title: String,
    /// Text content of the section. Opaque to every consumer.
    #[serde(skip)]
    pub body: String,
    /// 1-based line where the section starts.
    pub line: usize,
}

/// What an anchor id points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorTarget {
    /// Index into [`Page::sections`].
    Section(usize),
    /// Any other element carrying an `id` (index block, tables, ...).
    Element,
}

/// A named location declared in a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub id: String,
    pub line: usize,
    pub target: AnchorTarget,
}

/// One parsed HTML document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    /// Corpus-relative path, `/`-separated. Unique across the corpus.
    pub path: String,
    /// Text of the first `<h1>`, else `<title>`, else the path.
    pub title: String,
    /// Sections in declaration order.
    pub sections: Vec<Section>,
    /// Every declared id in document order, duplicates included.
    pub anchors: Vec<Anchor>,
    /// Outgoing `href`s in document order.
    #[serde(skip)]
    pub links: Vec<CrossLink>,
    /// Entries of the page's own index block (`<ul class="index">`), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_index: Option<Vec<IndexEntry>>,
}

impl Page {
    /// Section an anchor points at, if it is a section marker.
    pub fn section_for(&self, anchor: &Anchor) -> Option<&Section> {
        match anchor.target {
            AnchorTarget::Section(i) => self.sections.get(i),
            AnchorTarget::Element => None,
        }
    }

    /// Declared anchor ids in document order.
    pub fn anchor_ids(&self) -> impl Iterator<Item = &str> {
        self.anchors.iter().map(|a| a.id.as_str())
    }
}
