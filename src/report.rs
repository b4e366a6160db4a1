//! Validation report types and formatting.
//!
//! Every defect found in a run lands here; nothing is raised early. The text
//! rendering is one line per defect so CI logs can be grepped:
//!
//! ```text
//! b.html:12: broken link to a.html#bar
//! tips.html: duplicate anchor "defer"
//! broken.html: malformed markup: unclosed <div> opened at line 3
//! ```

use std::fmt;
use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::address::DuplicateAnchor;
use crate::page::{CrossLink, ParseError};
use crate::utils::plural_s;

/// A single problem in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Defect {
    /// Same anchor id declared twice on one page.
    DuplicateAnchor {
        page: String,
        id: String,
        line: usize,
    },
    /// Link to a page path that is not in the corpus.
    BrokenPageLink {
        page: String,
        line: usize,
        target: String,
    },
    /// Link to an existing page but an anchor it does not declare.
    BrokenAnchorLink {
        page: String,
        line: usize,
        target: String,
        anchor: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        available: Vec<String>,
    },
    /// Page could not be parsed into sections at all.
    MalformedMarkup { page: String, reason: String },
    /// Anchored section missing from the page's declared index block.
    IndexDrift { page: String, anchor: String },
}

impl Defect {
    /// Page the defect was found in.
    pub fn page(&self) -> &str {
        match self {
            Self::DuplicateAnchor { page, .. }
            | Self::BrokenPageLink { page, .. }
            | Self::BrokenAnchorLink { page, .. }
            | Self::MalformedMarkup { page, .. }
            | Self::IndexDrift { page, .. } => page,
        }
    }

    /// Line within the page, `0` when the defect concerns the whole page.
    pub fn line(&self) -> usize {
        match self {
            Self::DuplicateAnchor { line, .. }
            | Self::BrokenPageLink { line, .. }
            | Self::BrokenAnchorLink { line, .. } => *line,
            Self::MalformedMarkup { .. } | Self::IndexDrift { .. } => 0,
        }
    }

    /// Stable snake_case name, matching the JSON `kind` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateAnchor { .. } => "duplicate_anchor",
            Self::BrokenPageLink { .. } => "broken_page_link",
            Self::BrokenAnchorLink { .. } => "broken_anchor_link",
            Self::MalformedMarkup { .. } => "malformed_markup",
            Self::IndexDrift { .. } => "index_drift",
        }
    }

    /// Extra detail worth showing in verbose mode.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::BrokenAnchorLink {
                anchor, available, ..
            } if !available.is_empty() => Some(format!(
                "anchor '{}' not found (available: {})",
                anchor,
                available.join(", ")
            )),
            Self::BrokenAnchorLink { anchor, .. } => {
                Some(format!("anchor '{anchor}' not found, page declares none"))
            }
            _ => None,
        }
    }

    pub fn malformed(page: impl Into<String>, error: &ParseError) -> Self {
        Self::MalformedMarkup {
            page: page.into(),
            reason: error.to_string(),
        }
    }
}

impl From<DuplicateAnchor> for Defect {
    fn from(dup: DuplicateAnchor) -> Self {
        Self::DuplicateAnchor {
            page: dup.page,
            id: dup.id,
            line: dup.line,
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenPageLink { page, line, target }
            | Self::BrokenAnchorLink {
                page, line, target, ..
            } => write!(f, "{page}:{line}: broken link to {target}"),
            Self::DuplicateAnchor { page, id, .. } => {
                write!(f, "{page}: duplicate anchor \"{id}\"")
            }
            Self::MalformedMarkup { page, reason } => {
                write!(f, "{page}: malformed markup: {reason}")
            }
            Self::IndexDrift { page, anchor } => {
                write!(f, "{page}: index missing anchor \"{anchor}\"")
            }
        }
    }
}

/// Aggregated result of one run.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Every defect found.
    pub defects: Vec<Defect>,
    /// External links seen (never resolved).
    #[serde(skip)]
    pub external: Vec<CrossLink>,
    /// Number of links examined.
    pub links_checked: usize,
}

impl ValidationReport {
    /// Add a defect.
    pub fn push(&mut self, defect: impl Into<Defect>) {
        self.defects.push(defect.into());
    }

    /// Order defects by page, then line. Stable for equal keys.
    pub fn sort(&mut self) {
        self.defects
            .sort_by(|a, b| a.page().cmp(b.page()).then(a.line().cmp(&b.line())));
    }

    pub fn is_clean(&self) -> bool {
        self.defects.is_empty()
    }

    /// Count of defects of one kind (see [`Defect::kind`]).
    pub fn count(&self, kind: &str) -> usize {
        self.defects.iter().filter(|d| d.kind() == kind).count()
    }

    /// Count of distinct pages with at least one defect.
    pub fn page_count(&self) -> usize {
        let mut pages: Vec<&str> = self.defects.iter().map(Defect::page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages.len()
    }

    /// Write one line per defect.
    pub fn write_text(&self, out: &mut impl Write, verbose: bool) -> io::Result<()> {
        for defect in &self.defects {
            writeln!(out, "{defect}")?;
            if verbose && let Some(hint) = defect.hint() {
                let label = "hint:".if_supports_color(Stream::Stdout, |t| t.yellow());
                writeln!(out, "  {label} {hint}")?;
            }
        }
        Ok(())
    }

    /// Write the report as JSON.
    pub fn write_json(&self, out: &mut impl Write, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut *out, self)?;
        } else {
            serde_json::to_writer(&mut *out, self)?;
        }
        writeln!(out)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.defects.len();
        if total == 0 {
            let ok = "all checks passed";
            write!(f, "{}", ok.if_supports_color(Stream::Stderr, |t| t.green()))
        } else {
            let count = total.to_string();
            write!(
                f,
                "found {} defect{}",
                count.if_supports_color(Stream::Stderr, |t| t.red()),
                plural_s(total)
            )
        }
    }
}
