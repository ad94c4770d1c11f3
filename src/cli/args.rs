//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Asset and release pipeline for statically compiled web applications.
///
/// Without a subcommand, runs the full release: css -> minify -> native build.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Select minified outputs (overrides `MINIFY` and the config file)
    #[arg(short, long, global = true, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub minify: Option<bool>,

    /// Print every invocation without running anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Default config file name.
pub const DEFAULT_CONFIG: &str = "relstamp.toml";

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run every stage: css, minify, native build (default)
    #[command(visible_alias = "r")]
    Release,

    /// Compile stylesheets only
    #[command(visible_alias = "c")]
    Css,

    /// Minify JS/JSON assets only
    #[command(visible_alias = "m")]
    Minify,

    /// Generate and print release stamps
    #[command(visible_alias = "s")]
    Stamp {
        /// Output format
        #[arg(short, long, default_value = "env")]
        format: StampFormat,
    },
}

/// Output format of the `stamp` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampFormat {
    /// `KEY="value"` lines
    Env,
    /// JSON object
    Json,
}

impl Cli {
    /// The command to run, defaulting to a full release.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Release)
    }

    /// Whether `--config` was left at its default.
    pub fn uses_default_config(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_release() {
        let cli = Cli::try_parse_from(["relstamp"]).unwrap();
        assert_eq!(cli.command(), Commands::Release);
        assert_eq!(cli.minify, None);
        assert!(cli.uses_default_config());
    }

    #[test]
    fn test_minify_flag_forms() {
        let cli = Cli::try_parse_from(["relstamp", "--minify"]).unwrap();
        assert_eq!(cli.minify, Some(true));

        let cli = Cli::try_parse_from(["relstamp", "--minify=false"]).unwrap();
        assert_eq!(cli.minify, Some(false));

        // bare flag must not swallow the subcommand
        let cli = Cli::try_parse_from(["relstamp", "--minify", "css"]).unwrap();
        assert_eq!(cli.minify, Some(true));
        assert_eq!(cli.command(), Commands::Css);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["relstamp", "css", "-n", "-C", "other.toml"]).unwrap();
        assert_eq!(cli.command(), Commands::Css);
        assert!(cli.dry_run);
        assert!(!cli.uses_default_config());
    }

    #[test]
    fn test_stamp_format() {
        let cli = Cli::try_parse_from(["relstamp", "s", "--format", "json"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Stamp {
                format: StampFormat::Json
            }
        );
    }
}
