//! Filesystem path normalization.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first, falling back to joining relative paths onto
/// the current directory.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a user-supplied path that may be relative to cwd or to `fallback_dir`.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to `fallback_dir`
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}

/// Corpus-relative, `/`-separated identifier for a file under `root`.
///
/// This is the key pages are registered under, so it must not depend on the
/// host path separator.
pub fn corpus_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.html"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_fallback() {
        let resolved = resolve_path(Path::new("nonexistent/page.html"), Path::new("/corpus"));
        assert_eq!(resolved, PathBuf::from("/corpus/nonexistent/page.html"));
    }

    #[test]
    fn test_corpus_path() {
        let root = Path::new("/site");
        assert_eq!(
            corpus_path(root, Path::new("/site/reflection.html")),
            "reflection.html"
        );
        assert_eq!(
            corpus_path(root, Path::new("/site/tips/panic.html")),
            "tips/panic.html"
        );
    }
}
