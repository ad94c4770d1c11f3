//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/src/_asset/  ← start
/// /home/user/app/relstamp.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Whether `value` of the `MINIFY` variable enables minify mode.
///
/// Only the exact string `true` counts; anything else disables.
pub fn env_flag_enabled(value: &str) -> bool {
    value == "true"
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_upward() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/bucket_list/_asset");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("relstamp.toml"), "").unwrap();

        let found = find_config_file(Path::new("relstamp.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("relstamp.toml"));
    }

    #[test]
    fn test_find_config_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(Path::new("relstamp-missing.toml"), dir.path()).is_none());
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file(&path, Path::new("/")).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }

    #[test]
    fn test_env_flag() {
        assert!(env_flag_enabled("true"));
        assert!(!env_flag_enabled("TRUE"));
        assert!(!env_flag_enabled("1"));
        assert!(!env_flag_enabled(""));
        assert!(!env_flag_enabled("false"));
    }
}
