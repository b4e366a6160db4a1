//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::corpus::Corpus;
use crate::debug;
use crate::page::Page;
use crate::utils::path::{normalize_path, resolve_path};

/// Expand CLI paths, reading them from stdin when `-` is the only argument.
pub fn collect_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()
    } else {
        Ok(paths.to_vec())
    }
}

/// Read file paths from stdin, one per line
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

/// Map CLI paths (files or directories) to parsed pages of the corpus.
///
/// No paths selects every page. Paths are tried relative to the current
/// directory first, then to the corpus root. Pages that failed to parse are
/// skipped: their defect is already in the report.
pub fn select_pages<'c>(paths: &[PathBuf], corpus: &'c Corpus) -> Result<Vec<&'c Page>> {
    if paths.is_empty() {
        return Ok(corpus.pages.iter().collect());
    }

    let mut selected: Vec<&Page> = Vec::new();
    for path in paths {
        let resolved = normalize_path(&resolve_path(path, &corpus.root));
        if !resolved.starts_with(&corpus.root) {
            bail!(
                "{} is outside the corpus root {}",
                path.display(),
                corpus.root.display()
            );
        }

        let rel = corpus.path_of(&resolved);
        if resolved.is_dir() {
            let prefix = format!("{rel}/");
            selected.extend(
                corpus
                    .pages
                    .iter()
                    .filter(|p| rel.is_empty() || p.path.starts_with(&prefix)),
            );
        } else if let Some(page) = corpus.page(&rel) {
            selected.push(page);
        } else if corpus.failures.iter().any(|d| d.page() == rel) {
            debug!("check"; "skipping unparsable {}", rel);
        } else if resolved.exists() {
            bail!("Not a page in the corpus: {}", path.display());
        } else {
            bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                corpus.root.join(path).display()
            );
        }
    }

    selected.sort_by(|a, b| a.path.cmp(&b.path));
    selected.dedup_by(|a, b| a.path == b.path);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusConfig;
    use std::fs;
    use std::path::Path;

    fn corpus(root: &Path) -> Corpus {
        for (path, html) in [
            ("tips.html", "<h1>Tips</h1>"),
            ("details/reflection.html", "<h1>Reflection</h1>"),
            ("details/panic.html", "<h1>Panic</h1>"),
            ("broken.html", "<div>"),
            ("gopher.png", ""),
        ] {
            let file = root.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, html).unwrap();
        }
        let config = CorpusConfig {
            root: normalize_path(root),
            ..CorpusConfig::default()
        };
        Corpus::load(&config).unwrap()
    }

    fn paths(pages: &[&Page]) -> Vec<String> {
        pages.iter().map(|p| p.path.clone()).collect()
    }

    #[test]
    fn test_select_all_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());
        assert_eq!(select_pages(&[], &corpus).unwrap().len(), 3);
    }

    #[test]
    fn test_select_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());

        let selected = select_pages(
            &[
                PathBuf::from("details"),
                corpus.root.join("tips.html"),
                PathBuf::from("details/panic.html"),
            ],
            &corpus,
        )
        .unwrap();
        assert_eq!(
            paths(&selected),
            vec!["details/panic.html", "details/reflection.html", "tips.html"]
        );
    }

    #[test]
    fn test_select_skips_unparsable_and_rejects_others() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());

        assert!(
            select_pages(&[PathBuf::from("broken.html")], &corpus)
                .unwrap()
                .is_empty()
        );
        assert!(select_pages(&[PathBuf::from("gopher.png")], &corpus).is_err());
        assert!(select_pages(&[PathBuf::from("nope.html")], &corpus).is_err());
    }
}
