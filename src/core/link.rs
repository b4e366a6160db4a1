//! Link classification utilities.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of an `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, ...) or protocol-relative.
    External(&'a str),
    /// Pure fragment link (#section). Value is the anchor without `#`.
    Fragment(&'a str),
    /// Corpus-root-relative path (/reflection.html#deep-equal).
    SiteRoot(&'a str),
    /// Page-relative path (reflection.html, ../tips.html#x).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            // ./#fragment is the current page
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Whether the link stays inside the corpus.
    #[inline]
    pub const fn is_internal(&self) -> bool {
        !matches!(self, Self::External(_))
    }
}
