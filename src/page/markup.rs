//! Structural tag balance check.
//!
//! `tl` recovers silently from broken markup, so unbalanced structure is
//! detected separately on the raw source before the DOM is built. Only
//! container tags whose end tag is mandatory are tracked; `<p>`, `<li>` and
//! friends may legally be left open.

use std::sync::LazyLock;

use regex::Regex;

use super::ParseError;

/// Comments and raw-text elements. Their content is never markup.
static OPAQUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>").unwrap()
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*?(/?)>").unwrap());

/// `html`, `head` and `body` are absent: their end tags are optional.
const STRUCTURAL: &[&str] = &[
    "div",
    "section",
    "article",
    "ul",
    "ol",
    "table",
    "pre",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

/// Byte offsets of line starts, for offset → line lookups.
#[derive(Debug)]
pub(super) struct LineIndex(Vec<usize>);

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self(starts)
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        self.0.partition_point(|&start| start <= offset)
    }
}

/// Blank out opaque regions while keeping byte offsets and newlines intact.
fn mask_opaque(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for m in OPAQUE.find_iter(source) {
        out.push_str(&source[last..m.start()]);
        for c in m.as_str().chars() {
            if c == '\n' {
                out.push('\n');
            } else {
                out.extend(std::iter::repeat_n(' ', c.len_utf8()));
            }
        }
        last = m.end();
    }
    out.push_str(&source[last..]);
    out
}

/// Check that structural tags open and close in a properly nested order.
pub(super) fn check_structure(source: &str, lines: &LineIndex) -> Result<(), ParseError> {
    let masked = mask_opaque(source);
    let mut stack: Vec<(String, usize)> = Vec::new();

    for caps in TAG.captures_iter(&masked) {
        let name = caps[2].to_ascii_lowercase();
        if !STRUCTURAL.contains(&name.as_str()) {
            continue;
        }
        let offset = caps.get(0).map_or(0, |m| m.start());
        let line = lines.line(offset);
        let closing = !caps[1].is_empty();
        let self_closing = !caps[3].is_empty();

        if !closing {
            if !self_closing {
                stack.push((name, line));
            }
            continue;
        }

        match stack.pop() {
            Some((open, _)) if open == name => {}
            Some((open, open_line)) => {
                return Err(ParseError::Mismatched {
                    found: name,
                    line,
                    open,
                    open_line,
                });
            }
            None => return Err(ParseError::UnmatchedClose { tag: name, line }),
        }
    }

    match stack.pop() {
        Some((tag, line)) => Err(ParseError::Unclosed { tag, line }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str) -> Result<(), ParseError> {
        check_structure(source, &LineIndex::new(source))
    }

    #[test]
    fn test_line_index() {
        let lines = LineIndex::new("a\nbc\n\nd");
        assert_eq!(lines.line(0), 1);
        assert_eq!(lines.line(2), 2);
        assert_eq!(lines.line(5), 3);
        assert_eq!(lines.line(6), 4);
    }

    #[test]
    fn test_balanced() {
        let html = "<html><body><div><h3>T</h3><p>open paragraph<ul><li>x</ul></div></body></html>";
        assert!(check(html).is_ok());
    }

    #[test]
    fn test_optional_end_tags() {
        assert!(check("<html><head><title>T</title><body><h1>X</h1>").is_ok());
        assert!(check("<div></div></body></html>").is_ok());
    }

    #[test]
    fn test_comments_and_scripts_ignored() {
        let html = "<div>\n<!-- <div> draft tip -->\n<script>if (a < b) document.write('</div>')</script>\n</div>";
        assert!(check(html).is_ok());
    }

    #[test]
    fn test_unclosed() {
        let err = check("<section>\n<div>\n</section>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Mismatched { ref found, line: 3, ref open, open_line: 2 }
                if found == "section" && open == "div"
        ));

        let err = check("<body>\n<div>\n</body>").unwrap_err();
        assert!(matches!(err, ParseError::Unclosed { ref tag, line: 2 } if tag == "div"));

        let err = check("<div>\n<pre>code").unwrap_err();
        assert!(matches!(err, ParseError::Unclosed { ref tag, line: 2 } if tag == "pre"));
    }

    #[test]
    fn test_unmatched_close() {
        let err = check("<h3>Title</h3>\n</div>").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedClose { ref tag, line: 2 } if tag == "div"));
    }
}
