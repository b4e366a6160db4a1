//! Corpus loading: discover files, parse pages in parallel.
//!
//! A page that fails to parse does not abort the run. It becomes a
//! `MalformedMarkup` defect and its path is still linkable, so links to it
//! are not reported a second time as broken. An unreadable file is an I/O
//! problem, not a corpus defect, and aborts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::address::{AnchorRegistry, DuplicateAnchor};
use crate::config::CorpusConfig;
use crate::logger::ProgressLine;
use crate::page::{Page, parse_page};
use crate::report::Defect;
use crate::utils::path::corpus_path;
use crate::utils::plural_count;
use crate::{debug, log};

/// OS metadata files never treated as part of the corpus.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Every file under the corpus root, split into parsed pages and assets.
#[derive(Debug, Default)]
pub struct Corpus {
    /// Absolute corpus root.
    pub root: PathBuf,
    /// Successfully parsed pages, sorted by path.
    pub pages: Vec<Page>,
    /// Linkable paths that are not parsed pages, sorted.
    pub assets: Vec<String>,
    /// `MalformedMarkup` defects of pages that failed to parse.
    pub failures: Vec<Defect>,
}

impl Corpus {
    /// Walk `config.root`, read and parse every page.
    pub fn load(config: &CorpusConfig) -> Result<Self> {
        let root = config.root.clone();
        let mut page_files = Vec::new();
        let mut assets = Vec::new();

        for file in collect_all_files(&root)? {
            let path = corpus_path(&root, &file);
            if config.is_excluded(&path) {
                debug!("corpus"; "excluded {}", path);
            } else if config.is_page(&file) {
                page_files.push((file, path));
            } else {
                assets.push(path);
            }
        }

        log!(
            "corpus";
            "parsing {} under {}",
            plural_count(page_files.len(), "page"),
            root.display()
        );

        let progress = ProgressLine::new(&[("pages", page_files.len())]);
        let parsed = page_files
            .par_iter()
            .map(|(file, path)| -> Result<_> {
                let bytes =
                    fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
                progress.inc("pages");
                Ok((path, parse_page(path, &bytes)))
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish();

        let mut pages = Vec::with_capacity(parsed.len());
        let mut failures = Vec::new();
        for (path, result) in parsed {
            match result {
                Ok(page) => pages.push(page),
                Err(err) => {
                    debug!("corpus"; "{}: {}", path, err);
                    failures.push(Defect::malformed(path.as_str(), &err));
                    assets.push(path.clone());
                }
            }
        }

        pages.sort_by(|a, b| a.path.cmp(&b.path));
        assets.sort();

        Ok(Self {
            root,
            pages,
            assets,
            failures,
        })
    }

    /// Build a corpus directly from parsed pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Build the anchor registry over every page and asset.
    pub fn registry(&self) -> (AnchorRegistry<'_>, Vec<DuplicateAnchor>) {
        let (mut registry, duplicates) = AnchorRegistry::build(&self.pages);
        registry.register_assets(self.assets.iter().map(String::as_str));
        (registry, duplicates)
    }

    /// Find a parsed page by corpus path.
    pub fn page(&self, path: &str) -> Option<&Page> {
        self.pages
            .binary_search_by(|p| p.path.as_str().cmp(path))
            .ok()
            .map(|i| &self.pages[i])
    }

    /// Corpus path of a filesystem path under the root.
    pub fn path_of(&self, file: &Path) -> String {
        corpus_path(&self.root, file)
    }
}

/// Collect all files from a directory recursively (hidden entries skipped).
///
/// A directory that cannot be read aborts the walk: silently dropping it
/// would turn every link into it into a broken page link.
fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort(true) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if !IGNORED_FILES.contains(&name) {
            files.push(entry.path());
        }
    }
    Ok(files)
}
