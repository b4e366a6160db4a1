//! AnchorRegistry - the `(page, anchor id)` → target mapping.
//!
//! Built once by a single pass over every parsed page, then only read.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::page::{Anchor, Page, Section};

/// The same anchor id declared twice on one page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{page}: duplicate anchor \"{id}\"")]
pub struct DuplicateAnchor {
    pub page: String,
    pub id: String,
    /// Line of the rejected declaration.
    pub line: usize,
    /// Line of the declaration that was kept.
    pub first_line: usize,
}

/// One registered anchor.
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    anchor: &'a Anchor,
    /// Set when the anchor marks a section rather than a plain element.
    section: Option<&'a Section>,
}

/// Anchors of a single page.
#[derive(Debug)]
struct PageAnchors<'a> {
    page: &'a Page,
    by_id: FxHashMap<&'a str, Entry<'a>>,
    /// Ids in first-declaration order.
    order: Vec<&'a str>,
}

impl<'a> PageAnchors<'a> {
    fn new(page: &'a Page) -> Self {
        Self {
            page,
            by_id: FxHashMap::default(),
            order: Vec::new(),
        }
    }
}

/// Registry of every page and anchor in the corpus.
///
/// Borrows the parsed pages; lookups are exact-match only.
#[derive(Debug, Default)]
pub struct AnchorRegistry<'a> {
    pages: FxHashMap<&'a str, PageAnchors<'a>>,
    /// Non-HTML corpus files that may be linked to.
    assets: FxHashSet<&'a str>,
}

impl<'a> AnchorRegistry<'a> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every page and its anchors.
    ///
    /// Duplicates do not stop the build: the first declaration is kept and
    /// each redundant one is returned as a [`DuplicateAnchor`].
    pub fn build(pages: &'a [Page]) -> (Self, Vec<DuplicateAnchor>) {
        let mut registry = Self::new();
        let mut duplicates = Vec::new();

        for page in pages {
            registry.register_page(page);
            for anchor in &page.anchors {
                if let Err(dup) = registry.insert(page, anchor) {
                    duplicates.push(dup);
                }
            }
        }

        (registry, duplicates)
    }

    /// Register a page without anchors. Re-registering a path is a no-op.
    pub fn register_page(&mut self, page: &'a Page) {
        self.pages
            .entry(page.path.as_str())
            .or_insert_with(|| PageAnchors::new(page));
    }

    /// Register linkable non-HTML files.
    pub fn register_assets(&mut self, assets: impl IntoIterator<Item = &'a str>) {
        self.assets.extend(assets);
    }

    /// Insert `(page.path, anchor.id)`.
    pub fn insert(&mut self, page: &'a Page, anchor: &'a Anchor) -> Result<(), DuplicateAnchor> {
        let entry = self
            .pages
            .entry(page.path.as_str())
            .or_insert_with(|| PageAnchors::new(page));

        if let Some(existing) = entry.by_id.get(anchor.id.as_str()) {
            return Err(DuplicateAnchor {
                page: page.path.clone(),
                id: anchor.id.clone(),
                line: anchor.line,
                first_line: existing.anchor.line,
            });
        }

        entry.by_id.insert(
            anchor.id.as_str(),
            Entry {
                anchor,
                section: entry.page.section_for(anchor),
            },
        );
        entry.order.push(anchor.id.as_str());
        Ok(())
    }

    /// Section marked by `anchor` on `page`. Plain element ids are not sections.
    pub fn lookup(&self, page: &str, anchor: &str) -> Option<&'a Section> {
        self.pages.get(page)?.by_id.get(anchor)?.section
    }

    /// Whether `anchor` is a valid fragment on `page` (section or plain element id).
    pub fn contains_anchor(&self, page: &str, anchor: &str) -> bool {
        self.pages
            .get(page)
            .is_some_and(|p| p.by_id.contains_key(anchor))
    }

    /// Check if a page path is registered.
    pub fn contains_page(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    /// Check if a path is a registered non-HTML file.
    pub fn is_asset(&self, path: &str) -> bool {
        self.assets.contains(path)
    }

    /// Anchor ids of `page` in declaration order.
    pub fn anchors_of(&self, page: &str) -> Vec<&'a str> {
        self.pages
            .get(page)
            .map(|p| p.order.clone())
            .unwrap_or_default()
    }

    /// Number of registered pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of registered anchors across all pages.
    pub fn anchor_count(&self) -> usize {
        self.pages.values().map(|p| p.by_id.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_page;

    fn page(path: &str, html: &str) -> Page {
        parse_page(path, html.as_bytes()).unwrap()
    }

    fn corpus() -> Vec<Page> {
        vec![
            page(
                "reflection.html",
                r#"<h1>Reflections</h1>
<a class="anchor" id="deep-equal"></a><h3>DeepEqual</h3>
<a class="anchor" id="type"></a><h3>Type</h3>
<table id="kinds"></table>"#,
            ),
            page(
                "panic.html",
                r#"<a class="anchor" id="recover"></a><h3>Recover</h3>"#,
            ),
        ]
    }

    #[test]
    fn test_lookup_round_trip() {
        let pages = corpus();
        let (registry, duplicates) = AnchorRegistry::build(&pages);
        assert!(duplicates.is_empty());

        for page in &pages {
            for section in &page.sections {
                let anchor = section.anchor.as_deref().unwrap();
                let found = registry.lookup(&page.path, anchor).unwrap();
                assert!(std::ptr::eq(found, section));
            }
        }
        assert_eq!(registry.page_count(), 2);
        assert_eq!(registry.anchor_count(), 4);
    }

    #[test]
    fn test_lookup_exact_only() {
        let pages = corpus();
        let (registry, _) = AnchorRegistry::build(&pages);
        assert!(registry.lookup("reflection.html", "Deep-Equal").is_none());
        assert!(registry.lookup("reflection.html", "deep").is_none());
        assert!(registry.lookup("panic.html", "deep-equal").is_none());
        assert!(registry.lookup("missing.html", "deep-equal").is_none());
    }

    #[test]
    fn test_element_ids_are_targets_not_sections() {
        let pages = corpus();
        let (registry, _) = AnchorRegistry::build(&pages);
        assert!(registry.contains_anchor("reflection.html", "kinds"));
        assert!(registry.lookup("reflection.html", "kinds").is_none());
        assert_eq!(
            registry.anchors_of("reflection.html"),
            vec!["deep-equal", "type", "kinds"]
        );
    }

    #[test]
    fn test_duplicate_anchor_reported_once() {
        let pages = vec![page(
            "tips.html",
            r#"<a class="anchor" id="x"></a><h3>First</h3>
<a class="anchor" id="x"></a><h3>Second</h3>"#,
        )];
        let (registry, duplicates) = AnchorRegistry::build(&pages);

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].id, "x");
        assert_eq!(duplicates[0].page, "tips.html");
        assert_eq!((duplicates[0].first_line, duplicates[0].line), (1, 2));
        assert_eq!(duplicates[0].to_string(), "tips.html: duplicate anchor \"x\"");

        // First declaration wins
        assert_eq!(registry.lookup("tips.html", "x").unwrap().title, "First");
    }

    #[test]
    fn test_duplicate_regardless_of_order() {
        let pages = vec![page(
            "tips.html",
            r#"<a class="anchor" id="a"></a><h3>A</h3><a class="anchor" id="b"></a><h3>B</h3>"#,
        )];
        let page = &pages[0];
        let (a, b) = (&page.anchors[0], &page.anchors[1]);

        for order in [[a, b, a], [b, a, a], [a, a, b]] {
            let mut registry = AnchorRegistry::new();
            let errors: Vec<_> = order
                .into_iter()
                .filter_map(|anchor| registry.insert(page, anchor).err())
                .collect();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].id, "a");
        }
    }

    #[test]
    fn test_same_id_on_different_pages_is_fine() {
        let pages = vec![
            page("a.html", r#"<a class="anchor" id="intro"></a>"#),
            page("b.html", r#"<a class="anchor" id="intro"></a>"#),
        ];
        let (registry, duplicates) = AnchorRegistry::build(&pages);
        assert!(duplicates.is_empty());
        assert!(registry.contains_anchor("a.html", "intro"));
        assert!(registry.contains_anchor("b.html", "intro"));
    }

    #[test]
    fn test_assets() {
        let mut registry = AnchorRegistry::new();
        registry.register_assets(["images/gopher.png"]);
        assert!(registry.is_asset("images/gopher.png"));
        assert!(!registry.contains_page("images/gopher.png"));
    }
}
