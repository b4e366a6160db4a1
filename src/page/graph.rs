//! Page link graph for links-to / linked-by tracking.
//!
//! Tracks resolved internal links between pages:
//! - `links_to`: Pages that this page links to (outgoing)
//! - `linked_by`: Pages that link to this page (incoming/backlinks)

use rustc_hash::{FxHashMap, FxHashSet};

use super::{LinkTarget, Page};

type PageSet = FxHashSet<String>;
type PageSetMap = FxHashMap<String, PageSet>;

/// Bidirectional page link graph.
#[derive(Debug, Default)]
pub struct LinkGraph {
    /// Forward: page → pages it links to
    links_to: PageSetMap,
    /// Reverse: page → pages that link to it
    linked_by: PageSetMap,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of links between `pages`. Links to anything else are left out.
    pub fn build(pages: &[Page]) -> Self {
        let known: FxHashSet<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        let mut graph = Self::new();
        for page in pages {
            for link in page.links.iter().filter(|l| l.kind().is_internal()) {
                if let LinkTarget::Page { page: target, .. } = link.target()
                    && known.contains(target.as_str())
                {
                    graph.record(&page.path, &target);
                }
            }
        }
        graph
    }

    /// Record a link from `from` to `to`. Self-links are ignored.
    pub fn record(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.links_to
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.linked_by
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
    }

    /// Pages that `page` links to, sorted.
    pub fn links_to(&self, page: &str) -> Vec<String> {
        Self::sorted(self.links_to.get(page))
    }

    /// Pages that link to `page`, sorted.
    pub fn linked_by(&self, page: &str) -> Vec<String> {
        Self::sorted(self.linked_by.get(page))
    }

    fn sorted(set: Option<&PageSet>) -> Vec<String> {
        let mut pages: Vec<String> = set.map(|s| s.iter().cloned().collect()).unwrap_or_default();
        pages.sort_unstable();
        pages
    }
}
