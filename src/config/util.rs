//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
///
/// # Example
/// ```text
/// /home/user/docs/tips/      ← start
/// /home/user/docs/anchorlint.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_file_upward() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("tips/defer");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("anchorlint.toml"), "").unwrap();

        let found = find_config_file(Path::new("anchorlint.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("anchorlint.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file(Path::new("no-such-config.toml"), dir.path()).is_none());
        assert!(find_config_file(&dir.path().join("absent.toml"), dir.path()).is_none());
    }
}
