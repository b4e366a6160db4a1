//! Per-page summary index.
//!
//! [`build_index`] derives the ordered `(anchor, text)` list a page should
//! show near its top, [`render_index`] turns it into `<ul class="index">`
//! markup, and [`missing_from_declared`] compares it with the index block the
//! page actually carries.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::page::Page;
use crate::utils::html::escape;

/// One row of a page's summary list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub anchor: String,
    pub text: String,
}

/// Build the index of `page` from its anchored sections, in declaration order.
///
/// Sections without a heading fall back to their anchor id as display text.
/// Pure: the same page always yields the same entries.
pub fn build_index(page: &Page) -> Vec<IndexEntry> {
    page.sections
        .iter()
        .filter_map(|section| {
            let anchor = section.anchor.as_ref()?;
            let text = if section.title.is_empty() {
                anchor.clone()
            } else {
                section.title.clone()
            };
            Some(IndexEntry {
                anchor: anchor.clone(),
                text,
            })
        })
        .collect()
}

/// Render entries as an HTML list.
///
/// ```text
/// <ul class="index">
/// <li><a href="#defer">Use defer</a></li>
/// </ul>
/// ```
pub fn render_index(entries: &[IndexEntry], class: &str) -> String {
    let mut html = format!("<ul class=\"{}\">\n", escape(class));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            escape(&entry.anchor),
            escape(&entry.text)
        ));
    }
    html.push_str("</ul>\n");
    html
}

/// Anchors of the built index that the page's declared index block omits.
///
/// Returns nothing when the page has no declared index block at all.
pub fn missing_from_declared(page: &Page) -> Vec<IndexEntry> {
    let Some(declared) = &page.declared_index else {
        return Vec::new();
    };
    let listed: FxHashSet<&str> = declared.iter().map(|e| e.anchor.as_str()).collect();

    build_index(page)
        .into_iter()
        .filter(|entry| !listed.contains(entry.anchor.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_page;

    const PAGE: &str = r##"<h1>Reflections in Go</h1>
<ul class="index">
<li><a href="#type">Type</a></li>
</ul>
<a class="anchor" id="type"></a><h3>The <code>reflect.Type</code> type</h3>
<h3>Unanchored</h3>
<a class="anchor" id="value"></a><h3>Values &amp; kinds</h3>
<a class="anchor" id="bare"></a>
"##;

    fn page() -> Page {
        parse_page("reflection.html", PAGE.as_bytes()).unwrap()
    }

    fn entry(anchor: &str, text: &str) -> IndexEntry {
        IndexEntry {
            anchor: anchor.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_build_index_order_and_text() {
        assert_eq!(
            build_index(&page()),
            vec![
                entry("type", "The reflect.Type type"),
                entry("value", "Values & kinds"),
                entry("bare", "bare"),
            ]
        );
    }

    #[test]
    fn test_build_index_idempotent() {
        let page = page();
        assert_eq!(build_index(&page), build_index(&page));
    }

    #[test]
    fn test_render_index_escapes() {
        let html = render_index(&[entry("value", "Values & kinds")], "index");
        assert_eq!(
            html,
            "<ul class=\"index\">\n<li><a href=\"#value\">Values &amp; kinds</a></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_missing_from_declared() {
        let missing: Vec<_> = missing_from_declared(&page())
            .into_iter()
            .map(|e| e.anchor)
            .collect();
        assert_eq!(missing, vec!["value", "bare"]);

        let undeclared = parse_page("a.html", b"<a class=\"anchor\" id=\"x\"></a>").unwrap();
        assert!(missing_from_declared(&undeclared).is_empty());
    }
}
