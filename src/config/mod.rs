//! Release configuration management for `relstamp.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/   # [css] [assets] [native] [stamp]
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── field      # FieldPath
//! ├── util       # config discovery, env flag parsing
//! └── mod.rs     # ReleaseConfig (this file)
//! ```
//!
//! The config file is optional. Without one, the defaults describe the
//! conventional layout: `src/_asset/tailwind/main.css` compiled to
//! `src/_asset/main.css`, JS/JSON minified inside every `src/**/_asset/`.
//!
//! # Minify resolution
//!
//! | Source                | Wins when                  |
//! |-----------------------|----------------------------|
//! | `--minify[=bool]`     | given                      |
//! | `MINIFY` env variable | set (`true` on, else off)  |
//! | `minify` in the file  | otherwise (default `false`)|
//!
//! The result is resolved once at load time and threaded through every
//! stage from here; nothing reads `MINIFY` afterwards.

mod error;
mod field;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use section::{AssetsConfig, CssConfig, CssEntry, NativeConfig, StampConfig};

use crate::{cli::Cli, log, utils::path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{env_flag_enabled, find_config_file};

/// Environment variable selecting minified outputs.
pub const MINIFY_ENV: &str = "MINIFY";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing relstamp.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory: config file's parent, else cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Select minified outputs
    pub minify: bool,

    /// Stylesheet compilation
    pub css: CssConfig,

    /// JS/JSON minification
    pub assets: AssetsConfig,

    /// Native release build
    pub native: NativeConfig,

    /// Release stamps
    pub stamp: StampConfig,
}

impl ReleaseConfig {
    /// Load configuration from CLI arguments and the process environment.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let env_minify = std::env::var(MINIFY_ENV).ok();

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(config_path) => {
                let mut config = Self::from_path(&config_path)?;
                config.config_path = Some(path::normalize_path(&config_path));
                config
            }
            None if cli.uses_default_config() => Self::default(),
            None => return Err(ConfigError::NotFound(cli.config.clone()).into()),
        };

        let root = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or(cwd, Path::to_path_buf);

        config.finalize(&root, env_minify.as_deref(), cli.minify);
        config.validate()?;
        Ok(config)
    }

    /// Resolve paths against `root` and settle the minify flag.
    pub fn finalize(&mut self, root: &Path, env_minify: Option<&str>, cli_minify: Option<bool>) {
        self.root = path::normalize_path(root);
        self.minify = resolve_minify(self.minify, env_minify, cli_minify);
        self.normalize_paths();
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

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root, for display
    pub fn root_relative(&self, path: impl AsRef<Path>) -> String {
        path::display_relative(path.as_ref(), &self.root)
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all configured paths relative to root directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();

        for entry in &mut self.css.entries {
            entry.input = path::resolve_in(&root, &entry.input);
            entry.output = path::resolve_in(&root, &entry.output);
        }

        self.assets.roots = self
            .assets
            .roots
            .iter()
            .map(|p| path::resolve_in(&root, p))
            .collect();
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.css.validate(&mut diag);
        self.assets.validate(&mut diag);
        self.native.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Settle the minify flag: CLI beats `MINIFY`, `MINIFY` beats the file.
pub fn resolve_minify(file: bool, env: Option<&str>, cli: Option<bool>) -> bool {
    match (cli, env) {
        (Some(flag), _) => flag,
        (None, Some(value)) => env_flag_enabled(value),
        (None, None) => file,
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ReleaseConfig {
    let (parsed, ignored) = ReleaseConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Default config rooted at `root` with a fixed minify flag.
///
/// Stage tests swap in `sh -c` commands so real processes run without the
/// actual toolchain being installed.
#[cfg(test)]
pub fn test_config_at(root: &Path, minify: bool) -> ReleaseConfig {
    let mut config = ReleaseConfig::default();
    config.finalize(root, None, Some(minify));
    config
}

// ============================================================================
// tests
// ============================================================================
