//! `[corpus]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [corpus]
//! root = "site"                 # relative to the config file
//! extensions = ["html", "htm"]  # files parsed as pages
//! exclude = ["drafts", "tmp/"]  # corpus-relative path prefixes to skip
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus directory. Absolute after loading.
    pub root: PathBuf,

    /// File extensions (without dot, case-insensitive) parsed as pages.
    pub extensions: Vec<String>,

    /// Corpus-relative path prefixes skipped entirely.
    pub exclude: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["html".to_string(), "htm".to_string()],
            exclude: Vec::new(),
        }
    }
}

impl CorpusConfig {
    /// Whether `path` has one of the page extensions.
    pub fn is_page(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Whether a corpus-relative `/`-separated path is excluded.
    ///
    /// Prefixes match whole path segments: `drafts` excludes `drafts/a.html`
    /// but not `drafts-old.html`.
    pub fn is_excluded(&self, corpus_path: &str) -> bool {
        self.exclude.iter().any(|prefix| {
            let prefix = prefix.trim_matches('/');
            !prefix.is_empty()
                && corpus_path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    pub(in crate::config) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                "corpus.extensions",
                "no page extensions configured",
                "use extensions = [\"html\"]",
            );
        }
        if self.extensions.iter().any(|e| e.starts_with('.')) {
            diag.error_with_hint(
                "corpus.extensions",
                "extensions must not start with a dot",
                "write \"html\", not \".html\"",
            );
        }
        if !self.root.is_dir() {
            diag.error(
                "corpus.root",
                format!("`{}` is not a directory", self.root.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_corpus_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.corpus.root, PathBuf::from("."));
        assert!(config.corpus.is_page(Path::new("tips/defer.html")));
        assert!(config.corpus.is_page(Path::new("INDEX.HTM")));
        assert!(!config.corpus.is_page(Path::new("gopher.png")));
        assert!(!config.corpus.is_page(Path::new("Makefile")));
    }

    #[test]
    fn test_exclude_matches_segments() {
        let config = test_parse_config("[corpus]\nexclude = [\"drafts\", \"/tmp/\"]");
        assert!(config.corpus.is_excluded("drafts"));
        assert!(config.corpus.is_excluded("drafts/a.html"));
        assert!(config.corpus.is_excluded("tmp/b.html"));
        assert!(!config.corpus.is_excluded("drafts-old.html"));
        assert!(!config.corpus.is_excluded("docs/drafts/a.html"));
    }

    #[test]
    fn test_validate_extensions() {
        let mut config = test_parse_config("[corpus]\nextensions = [\".html\"]");
        config.corpus.root = std::env::temp_dir();
        let mut diag = ConfigDiagnostics::new();
        config.corpus.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
