//! `[assets]` section: JS/JSON minification.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! roots = ["src"]
//! dir = "_asset"        # only files directly inside `_asset/` directories
//! command = ["minify"]  # invoked as `minify -o <output> <input>`
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Asset minification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Run the minification stage.
    pub enable: bool,
    /// Directories scanned recursively for `.js` / `.json` files.
    pub roots: Vec<PathBuf>,
    /// Required name of a file's parent directory. Empty accepts any directory.
    pub dir: String,
    /// Minifier command.
    pub command: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            roots: vec!["src".into()],
            dir: "_asset".into(),
            command: vec!["minify".into()],
        }
    }
}

impl AssetsConfig {
    /// Parent directory name filter, if any.
    pub fn dir_filter(&self) -> Option<&str> {
        let dir = self.dir.trim();
        (!dir.is_empty()).then_some(dir)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.command.is_empty() {
            diag.error_with_hint(
                FieldPath::new("assets.command"),
                "command is empty",
                "set `command = [\"minify\"]` or disable with `enable = false`",
            );
        }
        if self.roots.is_empty() {
            diag.error(FieldPath::new("assets.roots"), "no asset roots configured");
        }
        if self.dir.contains(['/', '\\']) {
            diag.error(
                FieldPath::new("assets.dir"),
                format!("`{}` must be a single directory name", self.dir),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.assets.enable);
        assert_eq!(config.assets.dir_filter(), Some("_asset"));
        assert_eq!(config.assets.command, vec!["minify"]);
        assert!(config.assets.roots[0].ends_with("src"));
    }

    #[test]
    fn test_empty_dir_disables_filter() {
        let config = test_parse_config("[assets]\ndir = \"\"");
        assert_eq!(config.assets.dir_filter(), None);
    }

    #[test]
    fn test_validate() {
        let config = test_parse_config("[assets]\nroots = []\ncommand = []\ndir = \"a/b\"");
        let mut diag = ConfigDiagnostics::new();
        config.assets.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
