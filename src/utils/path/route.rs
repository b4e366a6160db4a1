//! Link helpers.
//!
//! Splitting hrefs into path and fragment, detecting external links, and
//! resolving page-relative hrefs to corpus paths.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Check if a link points outside the corpus.
///
/// A link is external when it has a URL scheme (`https:`, `mailto:`, ...) or
/// is protocol-relative (`//host/path`). A valid scheme has at least one
/// character before the colon and only ASCII alphanumerics or `+`, `-`, `.`.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a link into path and fragment parts.
///
/// The fragment is empty when there is no `#`.
#[inline]
pub fn split_path_fragment(link: &str) -> (&str, &str) {
    link.split_once('#').unwrap_or((link, ""))
}

/// Drop a `?query` suffix from a path.
#[inline]
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}

/// Percent-decode a path or fragment (`Deep%20Equal` -> `Deep Equal`).
#[inline]
pub fn percent_decode(s: &str) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }
    percent_decode_str(s).decode_utf8_lossy()
}

/// Resolve `rel` against the page at `source` to a corpus path.
///
/// `rel` starting with `/` is resolved from the corpus root. A trailing `/`,
/// `.` or `..` targets that directory's `index.html`. Returns `None` when `..` segments
/// climb above the corpus root.
///
/// ```text
/// source = "tips/panic.html", rel = "../reflection.html" -> "reflection.html"
/// source = "a.html",          rel = "guide/"             -> "guide/index.html"
/// ```
pub fn join_page_path(source: &str, rel: &str) -> Option<String> {
    let mut segments: Vec<&str> = if rel.starts_with('/') {
        Vec::new()
    } else {
        let mut dirs: Vec<&str> = source.split('/').filter(|s| !s.is_empty()).collect();
        dirs.pop();
        dirs
    };

    for part in rel.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(part),
        }
    }

    let names_directory = rel.ends_with('/')
        || rel.rsplit('/').next().is_some_and(|last| matches!(last, "." | ".."));
    if names_directory || segments.is_empty() {
        segments.push("index.html");
    }

    Some(segments.join("/"))
}
