//! `[css]` section: stylesheet compilation.
//!
//! # Example
//!
//! ```toml
//! [css]
//! command = ["npx", "@tailwindcss/cli"]
//!
//! [[css.entries]]
//! input = "src/_asset/tailwind/main.css"
//! output = "src/_asset/main.css"
//!
//! [[css.entries]]
//! input = "src/admin/_asset/tailwind/admin.css"
//! output = "src/admin/_asset/admin.css"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One stylesheet entry point and where its compiled output goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssEntry {
    /// Source stylesheet passed to the compiler with `-i`.
    pub input: PathBuf,
    /// Destination passed with `-o` (before minified-variant rewriting).
    pub output: PathBuf,
}

/// CSS compiler configuration.
///
/// The compiler is invoked as `command... -i <input> -o <output> [--minify]`,
/// which is the Tailwind CLI contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Run the CSS stage.
    pub enable: bool,
    /// Compiler command (e.g., `["npx", "@tailwindcss/cli"]` or `["tailwindcss"]`).
    pub command: Vec<String>,
    /// Ordered entry points.
    pub entries: Vec<CssEntry>,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["npx".into(), "@tailwindcss/cli".into()],
            entries: vec![CssEntry {
                input: "src/_asset/tailwind/main.css".into(),
                output: "src/_asset/main.css".into(),
            }],
        }
    }
}

impl CssConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.command.is_empty() {
            diag.error_with_hint(
                FieldPath::new("css.command"),
                "command is empty",
                "set `command = [\"npx\", \"@tailwindcss/cli\"]` or disable with `enable = false`",
            );
        }

        for entry in &self.entries {
            if entry.input == entry.output {
                diag.error(
                    FieldPath::new("css.entries"),
                    format!("`{}` is both input and output", entry.input.display()),
                );
            }
            if entry.output.extension().is_none_or(|ext| ext != "css") {
                diag.error(
                    FieldPath::new("css.entries.output"),
                    format!("`{}` must end in `.css`", entry.output.display()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_default_entry() {
        let config = test_parse_config("");
        assert!(config.css.enable);
        assert_eq!(config.css.command, vec!["npx", "@tailwindcss/cli"]);
        assert_eq!(config.css.entries.len(), 1);
        assert!(config.css.entries[0].output.ends_with("main.css"));
    }

    #[test]
    fn test_entries_replace_default_in_order() {
        let config = test_parse_config(
            r#"
[css]
command = ["tailwindcss"]

[[css.entries]]
input = "a/in.css"
output = "a/out.css"

[[css.entries]]
input = "b/in.css"
output = "b/out.css"
"#,
        );
        assert_eq!(config.css.command, vec!["tailwindcss"]);
        assert_eq!(config.css.entries.len(), 2);
        assert!(config.css.entries[0].input.ends_with("a/in.css"));
        assert!(config.css.entries[1].input.ends_with("b/in.css"));
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        let mut config = test_parse_config(
            r#"
[[css.entries]]
input = "same.css"
output = "same.css"

[[css.entries]]
input = "main.css"
output = "main.scss"
"#,
        );
        config.css.command.clear();

        let mut diag = crate::config::ConfigDiagnostics::new();
        config.css.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_disabled_skips_validation() {
        let mut config = test_parse_config("[css]\nenable = false\ncommand = []");
        config.css.entries.clear();
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.css.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
