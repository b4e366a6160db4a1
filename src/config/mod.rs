//! Checker configuration from `anchorlint.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/   # [corpus], [check], [index]
//! ├── error.rs   # ConfigError, ConfigDiagnostics
//! ├── util.rs    # find_config_file
//! └── mod.rs     # LintConfig (this file)
//! ```
//!
//! The config file is optional. It is searched upward from the working
//! directory; relative paths inside it are relative to the file itself.
//! CLI flags override file values.

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{CheckConfig, CorpusConfig, IndexConfig, ValidateLevel};

use util::find_config_file;

use crate::{
    cli::{CheckArgs, Cli, Commands},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched for when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "anchorlint.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing anchorlint.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

impl LintConfig {
    /// Load configuration for a CLI invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_in(cli, &cwd)
    }

    /// Load configuration as if started from `cwd`.
    fn load_in(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut config = match find_config_file(&cli.config, cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(normalize_path(&path));
                config
            }
            None if cli.config != Path::new(DEFAULT_CONFIG) => {
                bail!(ConfigError::NotFound(cli.config.clone()))
            }
            None => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG);
                Self::default()
            }
        };

        config.finalize(cli, cwd);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warn"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir<'a>(&'a self, cwd: &'a Path) -> &'a Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(cwd)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn finalize(&mut self, cli: &Cli, cwd: &Path) {
        // `-r` is relative to where the user is, not to the config file
        let root = match &cli.root {
            Some(root) => cwd.join(root),
            None => self.base_dir(cwd).join(&self.corpus.root),
        };
        self.corpus.root = normalize_path(&root);

        if let Commands::Check { args } = &cli.command {
            self.apply_check_args(args);
        }
    }

    fn apply_check_args(&mut self, args: &CheckArgs) {
        Self::update_option(&mut self.check.fragments, args.fragments.as_ref());
        Self::update_option(&mut self.check.index, args.index.as_ref());

        if args.warn_only {
            self.check.level = ValidateLevel::Warn;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.corpus.validate(&mut diag);
        self.index.validate(&mut diag);
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> LintConfig {
    let (parsed, ignored) = LintConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("anchorlint").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(LintConfig::from_str("[corpus\nroot = \"site\"").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[corpus]\nroot = \"site\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = LintConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.corpus.root, PathBuf::from("site"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));

        let (_, ignored) = LintConfig::parse_with_ignored("[check]\nfragment = true").unwrap();
        assert_eq!(ignored, vec!["check.fragment".to_string()]);
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LintConfig::load_in(&cli(&["check"]), dir.path()).unwrap();

        assert!(config.config_path.is_none());
        assert_eq!(config.corpus.root, normalize_path(dir.path()));
        assert!(config.check.fragments);
    }

    #[test]
    fn test_load_resolves_root_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("site/tips")).unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG),
            "[corpus]\nroot = \"site\"\n[check]\nindex = true",
        )
        .unwrap();

        let config = LintConfig::load_in(&cli(&["check"]), &dir.path().join("site/tips")).unwrap();
        assert_eq!(config.corpus.root, normalize_path(&dir.path().join("site")));
        assert!(config.check.index);
    }

    #[test]
    fn test_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("other")).unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG),
            "[check]\nfragments = true\nlevel = \"error\"",
        )
        .unwrap();

        let config = LintConfig::load_in(
            &cli(&["-r", "other", "check", "--fragments=false", "--index", "-w"]),
            dir.path(),
        )
        .unwrap();
        assert_eq!(config.corpus.root, normalize_path(&dir.path().join("other")));
        assert!(!config.check.fragments);
        assert!(config.check.index);
        assert_eq!(config.check.level, ValidateLevel::Warn);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LintConfig::load_in(&cli(&["-C", "custom.toml", "check"]), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_root_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let result = LintConfig::load_in(&cli(&["-r", "no/such/dir", "check"]), dir.path());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("corpus.root"));
    }
}
