//! Pipeline stages.
//!
//! Each stage turns the pipeline context into an ordered list of
//! [`Invocation`]s, one per external tool run:
//!
//! | Stage    | Tool                  | Invocations           |
//! |----------|-----------------------|-----------------------|
//! | `css`    | Tailwind CLI          | one per entry point   |
//! | `minify` | `minify`              | one per raw JS/JSON   |
//! | `native` | `cargo build --release` | exactly one         |
//!
//! Planning has no side effects, so a dry run prints the same invocations a
//! real run executes.

pub mod css;
pub mod minify;
pub mod native;

use crate::config::ReleaseConfig;
use crate::pipeline::PipelineContext;
use crate::utils::exec::{Cmd, ExecResult, FilterRule};
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A pipeline stage. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageKind {
    Css,
    Minify,
    Native,
}

impl StageKind {
    /// Every stage, in the fixed execution order.
    pub const ALL: [Self; 3] = [Self::Css, Self::Minify, Self::Native];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Minify => "minify",
            Self::Native => "native",
        }
    }

    /// Noun used when counting this stage's invocations.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Css => "stylesheet",
            Self::Minify => "file",
            Self::Native => "build",
        }
    }

    pub fn is_enabled(self, config: &ReleaseConfig) -> bool {
        match self {
            Self::Css => config.css.enable,
            Self::Minify => config.assets.enable,
            Self::Native => config.native.enable,
        }
    }

    /// Build this stage's invocations.
    pub fn plan(self, ctx: &PipelineContext<'_>) -> Vec<Invocation> {
        match self {
            Self::Css => css::plan(ctx),
            Self::Minify => minify::plan(ctx),
            Self::Native => native::plan(ctx),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a tool's output reaches the terminal.
#[derive(Clone, Copy)]
pub enum OutputMode {
    /// Captured; stderr logged through the filter, shown in full on failure.
    Captured(&'static FilterRule),
    /// Streamed directly.
    Inherit,
    /// Run in a pseudo-terminal.
    Pty,
}

/// One external tool run: command vector plus environment overlay.
pub struct Invocation {
    pub stage: StageKind,
    pub argv: Vec<String>,
    pub env: FxHashMap<String, String>,
    pub output: OutputMode,
    /// Directory that must exist before the tool writes its output.
    pub ensure_dir: Option<PathBuf>,
    /// Logged after the tool succeeds (e.g. the produced file).
    pub label: String,
}

impl Invocation {
    pub fn new(stage: StageKind, argv: Vec<String>, env: FxHashMap<String, String>) -> Self {
        Self {
            stage,
            argv,
            env,
            output: OutputMode::Inherit,
            ensure_dir: None,
            label: String::new(),
        }
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    pub fn ensure_dir(mut self, dir: Option<&Path>) -> Self {
        self.ensure_dir = dir.map(Path::to_path_buf);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Run the tool from `cwd`, blocking until it exits.
    pub fn run(&self, cwd: &Path) -> ExecResult<()> {
        let cmd = Cmd::from_slice(self.argv.as_slice()).cwd(cwd).envs(&self.env);
        let cmd = match self.output {
            OutputMode::Captured(filter) => cmd.filter(filter),
            OutputMode::Inherit => cmd.inherit(true),
            OutputMode::Pty => cmd.pty(true),
        };
        cmd.run()?;
        Ok(())
    }

    /// Overlay entries sorted by key.
    pub fn sorted_env(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .env
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Shell-like rendering used by dry runs: `KEY=value ... program args...`
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self
            .sorted_env()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", quote(v)))
            .chain(self.argv.iter().map(|a| quote(a)));

        for (i, word) in words.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&word)?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains([' ', '\'', '"', ',', '$']) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
