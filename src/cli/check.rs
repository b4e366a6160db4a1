//! `anchorlint check`: validate every cross-link and anchor.

use std::io::{self, Write};

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;

use super::common::{collect_paths, select_pages};
use super::{CheckArgs, OutputFormat};
use crate::address::{ResolveOptions, resolve};
use crate::config::{CheckConfig, LintConfig, ValidateLevel};
use crate::corpus::Corpus;
use crate::index::missing_from_declared;
use crate::page::Page;
use crate::report::{Defect, ValidationReport};
use crate::utils::{plural_count, plural_s};
use crate::{debug, log, logger};

/// Check the corpus and print the report.
pub fn check_site(args: &CheckArgs, config: &LintConfig) -> Result<()> {
    let corpus = Corpus::load(&config.corpus)?;
    if corpus.pages.is_empty() && corpus.failures.is_empty() {
        log!("check"; "no pages found under {}", corpus.root.display());
        return Ok(());
    }

    let paths = collect_paths(&args.paths)?;
    let scope = if paths.is_empty() {
        None
    } else {
        Some(select_pages(&paths, &corpus)?)
    };

    let report = check_corpus(&corpus, scope.as_deref(), &config.check);

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Text => report.write_text(&mut out, logger::is_verbose())?,
        OutputFormat::Json => report.write_json(&mut out, false)?,
    }
    out.flush()?;

    print_summary(&report, config.check.level)
}

/// Run every enabled check. `scope` restricts which pages are checked;
/// anchors are always registered from the whole corpus.
pub fn check_corpus(
    corpus: &Corpus,
    scope: Option<&[&Page]>,
    options: &CheckConfig,
) -> ValidationReport {
    let (registry, duplicates) = corpus.registry();
    log!(
        "check";
        "{}, {}, {}",
        plural_count(registry.page_count(), "page"),
        plural_count(registry.anchor_count(), "anchor"),
        plural_count(corpus.assets.len(), "asset")
    );

    let all: Vec<&Page>;
    let pages: &[&Page] = match scope {
        Some(pages) => pages,
        None => {
            all = corpus.pages.iter().collect();
            &all
        }
    };
    let in_scope: FxHashSet<&str> = pages.iter().map(|p| p.path.as_str()).collect();

    let mut report = resolve(
        pages.iter().flat_map(|p| &p.links),
        &registry,
        ResolveOptions {
            fragments: options.fragments,
        },
    );
    debug!(
        "check";
        "{} checked, {} external skipped",
        plural_count(report.links_checked, "link"),
        report.external.len()
    );

    if scope.is_none() {
        report.defects.extend(corpus.failures.iter().cloned());
    }

    for dup in duplicates {
        if in_scope.contains(dup.page.as_str()) {
            debug!(
                "check";
                "{}: \"{}\" first declared at line {}",
                dup.page,
                dup.id,
                dup.first_line
            );
            report.push(dup);
        }
    }

    if options.index {
        for page in pages {
            for entry in missing_from_declared(page) {
                report.push(Defect::IndexDrift {
                    page: page.path.clone(),
                    anchor: entry.anchor,
                });
            }
        }
    }

    report.sort();
    report
}

/// Log the outcome; defects fail the run unless the level is `warn`.
fn print_summary(report: &ValidationReport, level: ValidateLevel) -> Result<()> {
    if report.is_clean() {
        log!("check"; "{}", report);
        return Ok(());
    }

    let pages = report.page_count();
    let summary = format!(
        "{} in {} page{}",
        plural_count(report.defects.len(), "defect"),
        pages,
        plural_s(pages)
    );

    match level {
        ValidateLevel::Warn => {
            log!("warn"; "{}", summary);
            Ok(())
        }
        ValidateLevel::Error => bail!("found {}", summary),
    }
}
