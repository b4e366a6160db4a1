//! Outgoing links extracted from a page.

use serde::Serialize;

use crate::core::LinkKind;
use crate::utils::path::route::{join_page_path, percent_decode, split_path_fragment, strip_query};

/// A reference from one page to another page and/or anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossLink {
    /// Path of the page containing the link.
    pub source: String,
    /// 1-based line of the link element.
    pub line: usize,
    /// The `href` exactly as written.
    pub href: String,
}

/// Semantic target of a [`CrossLink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Outside the corpus. Recorded, never resolved.
    External(String),
    /// A corpus path, optionally with an anchor.
    Page {
        page: String,
        fragment: Option<String>,
    },
    /// A relative path climbing above the corpus root.
    OutsideCorpus(String),
}

impl CrossLink {
    pub fn new(source: impl Into<String>, line: usize, href: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line,
            href: href.into(),
        }
    }

    /// Classify this link.
    #[inline]
    pub fn kind(&self) -> LinkKind<'_> {
        LinkKind::parse(self.href.trim())
    }

    /// Resolve the href against the source page.
    ///
    /// Query strings are dropped, path and fragment are percent-decoded and an
    /// empty fragment (`page.html#`) counts as no fragment.
    pub fn target(&self) -> LinkTarget {
        let href = self.href.trim();
        let fragment_of = |raw: &str| {
            let decoded = percent_decode(raw);
            (!decoded.is_empty()).then(|| decoded.into_owned())
        };

        match LinkKind::parse(href) {
            LinkKind::External(url) => LinkTarget::External(url.to_string()),
            LinkKind::Fragment(anchor) => LinkTarget::Page {
                page: self.source.clone(),
                fragment: fragment_of(anchor),
            },
            LinkKind::SiteRoot(link) | LinkKind::FileRelative(link) => {
                let (path, fragment) = split_path_fragment(link);
                let path = percent_decode(strip_query(path));
                if path.is_empty() {
                    // `?q#x` style link: same page
                    return LinkTarget::Page {
                        page: self.source.clone(),
                        fragment: fragment_of(fragment),
                    };
                }
                match join_page_path(&self.source, &path) {
                    Some(page) => LinkTarget::Page {
                        page,
                        fragment: fragment_of(fragment),
                    },
                    None => LinkTarget::OutsideCorpus(link.to_string()),
                }
            }
        }
    }
}
