//! `[check]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [check]
//! fragments = true   # validate #fragments against target anchors
//! index = false      # report anchors missing from a page's index block
//! level = "error"    # failure level: error | warn
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Validate `#fragment`s, not just target pages.
    pub fragments: bool,

    /// Report anchored sections missing from the declared index block.
    pub index: bool,

    /// How to treat defects: "error" or "warn".
    pub level: ValidateLevel,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fragments: true,
            index: false,
            level: ValidateLevel::default(),
        }
    }
}

/// Failure level for `anchorlint check`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateLevel {
    /// Defects fail the run (non-zero exit).
    #[default]
    Error,
    /// Defects are printed but the run succeeds.
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_check_config_defaults() {
        let config = test_parse_config("");
        assert!(config.check.fragments);
        assert!(!config.check.index);
        assert_eq!(config.check.level, ValidateLevel::Error);
    }

    #[test]
    fn test_check_config_custom() {
        let config = test_parse_config(
            r#"[check]
fragments = false
index = true
level = "warn""#,
        );
        assert!(!config.check.fragments);
        assert!(config.check.index);
        assert_eq!(config.check.level, ValidateLevel::Warn);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result: Result<CheckConfig, _> = toml::from_str("level = \"fatal\"");
        assert!(result.is_err());
    }
}
