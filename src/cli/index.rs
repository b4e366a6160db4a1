//! `anchorlint index`: print each page's summary index.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::IndexArgs;
use super::common::collect_paths;
use crate::config::LintConfig;
use crate::index::{IndexEntry, build_index, render_index};
use crate::page::{Page, parse_page};
use crate::utils::path::{corpus_path, normalize_path, resolve_path};
use crate::{debug, log};

/// Build and print the index of every requested page.
///
/// Only the named pages are parsed; no corpus walk happens.
pub fn print_index(args: &IndexArgs, config: &LintConfig) -> Result<()> {
    let root = &config.corpus.root;
    let paths = collect_paths(&args.pages)?;
    let mut out = io::stdout().lock();

    for (i, path) in paths.iter().enumerate() {
        let file = normalize_path(&resolve_path(path, root));
        let page = load_page(root, &file)?;
        let entries = build_index(&page);
        debug!("index"; "{}: {} entries", page.path, entries.len());

        if entries.is_empty() {
            log!("index"; "{} has no anchored sections", page.path);
            continue;
        }

        if args.html {
            write!(out, "{}", render_index(&entries, &config.index.class))?;
        } else {
            if paths.len() > 1 {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}:", page.path)?;
            }
            write_entries(&mut out, &entries)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_page(root: &Path, file: &Path) -> Result<Page> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let path = corpus_path(root, file);
    parse_page(&path, &bytes).with_context(|| format!("failed to parse {path}"))
}

/// `#anchor  text`, anchors padded to a common width.
fn write_entries(out: &mut impl Write, entries: &[IndexEntry]) -> io::Result<()> {
    let width = entries
        .iter()
        .map(|e| e.anchor.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        writeln!(out, "#{:<width$}  {}", entry.anchor, entry.text)?;
    }
    Ok(())
}
