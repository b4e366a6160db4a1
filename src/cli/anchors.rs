//! `anchorlint anchors`: dump pages, titles and anchors as JSON.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use super::AnchorsArgs;
use super::common::{collect_paths, select_pages};
use crate::config::LintConfig;
use crate::corpus::Corpus;
use crate::log;
use crate::page::{LinkGraph, Page};
use crate::utils::plural_count;

/// One page in the dump.
#[derive(Debug, Serialize)]
pub struct PageDump<'a> {
    #[serde(flatten)]
    pub page: &'a Page,
    /// Corpus pages this page links to.
    pub links_to: Vec<String>,
    /// Corpus pages linking here.
    pub linked_by: Vec<String>,
}

/// Print the JSON dump for the selected pages.
pub fn dump_anchors(args: &AnchorsArgs, config: &LintConfig) -> Result<()> {
    let corpus = Corpus::load(&config.corpus)?;
    let paths = collect_paths(&args.pages)?;
    let pages = select_pages(&paths, &corpus)?;

    let dump = build_dump(&corpus, &pages);
    log!("anchors"; "dumping {}", plural_count(dump.len(), "page"));

    let mut out = io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &dump)?;
    } else {
        serde_json::to_writer(&mut out, &dump)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Pair each page with its backlinks. The graph covers the whole corpus so
/// `linked_by` is complete even for a partial selection.
fn build_dump<'a>(corpus: &Corpus, pages: &[&'a Page]) -> Vec<PageDump<'a>> {
    let graph = LinkGraph::build(&corpus.pages);
    pages
        .iter()
        .map(|&page| PageDump {
            page,
            links_to: graph.links_to(&page.path),
            linked_by: graph.linked_by(&page.path),
        })
        .collect()
}
