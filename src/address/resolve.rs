//! Link resolution against the [`AnchorRegistry`].

use super::AnchorRegistry;
use crate::page::{CrossLink, LinkTarget};
use crate::report::{Defect, ValidationReport};

/// Knobs for [`resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Check `#fragment`s against the target page's anchors.
    pub fragments: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { fragments: true }
    }
}

/// Result of resolving a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Target page (and anchor, if any) exists.
    Found,
    /// Existing non-HTML corpus file.
    Asset,
    /// Outside the corpus. Recorded, never resolved.
    External(String),
    /// No page with this path.
    PageNotFound {
        /// The corpus path that was looked up
        page: String,
    },
    /// The page exists but does not declare the fragment.
    AnchorNotFound {
        page: String,
        anchor: String,
        /// Anchors the page does declare (for suggestions)
        available: Vec<String>,
    },
    /// Relative path climbing above the corpus root.
    OutsideCorpus,
}

impl AnchorRegistry<'_> {
    /// Resolve one link.
    ///
    /// A missing page short-circuits: its fragment is never looked at.
    pub fn resolve_link(&self, link: &CrossLink, options: ResolveOptions) -> ResolveResult {
        let (page, fragment) = match link.target() {
            LinkTarget::External(url) => return ResolveResult::External(url),
            LinkTarget::OutsideCorpus(_) => return ResolveResult::OutsideCorpus,
            LinkTarget::Page { page, fragment } => (page, fragment),
        };

        if !self.contains_page(&page) {
            return if self.is_asset(&page) {
                ResolveResult::Asset
            } else {
                ResolveResult::PageNotFound { page }
            };
        }

        match fragment {
            Some(anchor) if options.fragments && !self.contains_anchor(&page, &anchor) => {
                let available = self
                    .anchors_of(&page)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                ResolveResult::AnchorNotFound {
                    page,
                    anchor,
                    available,
                }
            }
            _ => ResolveResult::Found,
        }
    }
}

/// Resolve every link, collecting all defects into one report.
///
/// Never stops at the first failure. External links are only counted.
pub fn resolve<'l>(
    links: impl IntoIterator<Item = &'l CrossLink>,
    registry: &AnchorRegistry<'_>,
    options: ResolveOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for link in links {
        report.links_checked += 1;
        match registry.resolve_link(link, options) {
            ResolveResult::Found | ResolveResult::Asset => {}
            ResolveResult::External(_) => report.external.push(link.clone()),
            ResolveResult::PageNotFound { .. } | ResolveResult::OutsideCorpus => {
                report.push(Defect::BrokenPageLink {
                    page: link.source.clone(),
                    line: link.line,
                    target: link.href.trim().to_string(),
                });
            }
            ResolveResult::AnchorNotFound {
                anchor, available, ..
            } => {
                report.push(Defect::BrokenAnchorLink {
                    page: link.source.clone(),
                    line: link.line,
                    target: link.href.trim().to_string(),
                    anchor,
                    available,
                });
            }
        }
    }

    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Page, parse_page};

    fn page(path: &str, html: &str) -> Page {
        parse_page(path, html.as_bytes()).unwrap()
    }

    fn kinds(report: &ValidationReport) -> Vec<&'static str> {
        report.defects.iter().map(Defect::kind).collect()
    }

    #[test]
    fn test_anchor_link_scenario() {
        let pages = vec![
            page("a.html", r#"<a class="anchor" id="foo"></a><h3>Foo</h3>"#),
            page(
                "b.html",
                "<p><a href=\"a.html#foo\">ok</a>\n<a href=\"a.html#bar\">broken</a></p>",
            ),
        ];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(&pages[1].links, &registry, ResolveOptions::default());

        assert_eq!(kinds(&report), vec!["broken_anchor_link"]);
        assert_eq!(report.links_checked, 2);
        assert_eq!(
            report.defects[0].to_string(),
            "b.html:2: broken link to a.html#bar"
        );
        match &report.defects[0] {
            Defect::BrokenAnchorLink {
                anchor, available, ..
            } => {
                assert_eq!(anchor, "bar");
                assert_eq!(available, &vec!["foo".to_string()]);
            }
            other => panic!("unexpected defect {other:?}"),
        }
    }

    #[test]
    fn test_missing_page_skips_fragment() {
        let pages = vec![page("b.html", r#"<a href="c.html#z">c</a>"#)];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(&pages[0].links, &registry, ResolveOptions::default());

        assert_eq!(kinds(&report), vec!["broken_page_link"]);
        assert_eq!(
            registry.resolve_link(&pages[0].links[0], ResolveOptions::default()),
            ResolveResult::PageNotFound {
                page: "c.html".to_string()
            }
        );
    }

    #[test]
    fn test_known_page_without_fragment_is_ok() {
        let pages = vec![
            page("a.html", "<h1>A</h1>"),
            page(
                "b.html",
                r#"<a href="a.html">a</a><a href="./a.html">a</a><a href="/a.html?x=1">a</a><a href="a.html#">a</a>"#,
            ),
        ];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(&pages[1].links, &registry, ResolveOptions::default());
        assert!(report.defects.is_empty());
        assert_eq!(report.links_checked, 4);
    }

    #[test]
    fn test_each_missing_fragment_reported_exactly_once() {
        let pages = vec![page(
            "a.html",
            r##"<a class="anchor" id="x"></a><a href="#y">1</a><a href="#y">2</a><a href="#x">3</a>"##,
        )];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(&pages[0].links, &registry, ResolveOptions::default());
        assert_eq!(kinds(&report), vec!["broken_anchor_link", "broken_anchor_link"]);
    }

    #[test]
    fn test_fragments_can_be_disabled() {
        let pages = vec![page("a.html", r##"<a href="#nowhere">x</a>"##)];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(
            &pages[0].links,
            &registry,
            ResolveOptions { fragments: false },
        );
        assert!(report.defects.is_empty());
    }

    #[test]
    fn test_external_recorded_not_resolved() {
        let pages = vec![page(
            "a.html",
            r#"<a href="https://golang.org/ref/spec#Struct_types">spec</a><a href="mailto:x@y.z">m</a>"#,
        )];
        let (registry, _) = AnchorRegistry::build(&pages);
        let report = resolve(&pages[0].links, &registry, ResolveOptions::default());
        assert!(report.defects.is_empty());
        assert_eq!(report.external.len(), 2);
    }

    #[test]
    fn test_assets_and_outside_corpus() {
        let pages = vec![page(
            "docs/a.html",
            r#"<a href="../img/gopher.png">img</a><a href="../../x.html">out</a>"#,
        )];
        let (mut registry, _) = AnchorRegistry::build(&pages);
        registry.register_assets(["img/gopher.png"]);
        let report = resolve(&pages[0].links, &registry, ResolveOptions::default());
        assert_eq!(kinds(&report), vec!["broken_page_link"]);
        assert_eq!(
            report.defects[0].to_string(),
            "docs/a.html:1: broken link to ../../x.html"
        );
    }
}
