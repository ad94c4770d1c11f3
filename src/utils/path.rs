//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
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

/// Resolve a configured path against the project root.
///
/// Absolute paths are kept; relative ones are joined with `root`.
/// Missing files are fine (outputs usually don't exist yet).
#[inline]
pub fn resolve_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        normalize_path(&root.join(path))
    }
}

/// Display a path relative to `root` when it lives under it.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_in_keeps_absolute() {
        let p = resolve_in(Path::new("/root"), Path::new("/elsewhere/main.css"));
        assert_eq!(p, PathBuf::from("/elsewhere/main.css"));
    }

    #[test]
    fn test_resolve_in_joins_relative() {
        let dir = tempfile::TempDir::new().unwrap();
        let p = resolve_in(dir.path(), Path::new("src/_asset/main.css"));
        assert!(p.is_absolute());
        assert!(p.ends_with("src/_asset/main.css"));
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/site");
        assert_eq!(
            display_relative(Path::new("/site/src/_asset/app.min.js"), root),
            "src/_asset/app.min.js"
        );
        assert_eq!(display_relative(Path::new("/other/x.js"), root), "/other/x.js");
    }
}
