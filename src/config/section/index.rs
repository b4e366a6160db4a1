//! `[index]` section configuration.

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Class of the rendered `<ul>`.
    pub class: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            class: "index".to_string(),
        }
    }
}

impl IndexConfig {
    pub(in crate::config) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.class.trim().is_empty() {
            diag.error("index.class", "class must not be empty");
        }
    }
}
