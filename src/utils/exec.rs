//! External command execution utilities.
//!
//! Provides a Builder-based API for running build tools with an
//! environment overlay, proper output handling and PTY support.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Captured output, stderr logged through a filter
//! Cmd::from_slice(&["minify", "-o", "app.min.js", "app.js"])
//!     .cwd(root)
//!     .envs(&overlay)
//!     .run()?;
//!
//! // Streamed straight to the terminal
//! Cmd::from_slice(&["cargo", "build", "--release"])
//!     .cwd(root)
//!     .inherit(true)
//!     .run()?;
//! ```

use crate::log;
use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Output},
    sync::OnceLock,
};
use thiserror::Error;

/// Exit code reported when a tool cannot be spawned at all.
pub const SPAWN_EXIT_CODE: i32 = 127;

// ============================================================================
// Errors
// ============================================================================

/// Failure of a single external tool invocation.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to execute `{program}`{hint}")]
    Spawn {
        program: String,
        hint: String,
        #[source]
        source: io::Error,
    },

    #[error("command `{program}` failed with exit code {code}{}", with_detail(.detail))]
    Failed {
        program: String,
        code: i32,
        detail: String,
    },

    #[error("command `{program}` was terminated by a signal{}", with_detail(.detail))]
    Signaled { program: String, detail: String },

    #[error("pty error while running `{program}`: {message}")]
    Pty { program: String, message: String },
}

impl ExecError {
    /// Process exit code this failure should propagate as.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Spawn { .. } => SPAWN_EXIT_CODE,
            Self::Failed { code, .. } => *code,
            Self::Signaled { .. } | Self::Pty { .. } => 1,
        }
    }
}

fn with_detail(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!("\n{detail}")
    }
}

pub type ExecResult<T> = Result<T, ExecError>;

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
///
/// The child inherits the ambient environment; `envs` only overlays it.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    use_pty: bool,
    inherit: bool,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create from a command array (e.g., `["minify"]` or `["npx", "@tailwindcss/cli"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter.map(|s| s.as_ref().to_owned()).collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Overlay environment variables for the subprocess.
    pub fn envs<K, V, I>(mut self, vars: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in vars {
            self.envs.push((k.as_ref().to_owned(), v.as_ref().to_owned()));
        }
        self
    }

    /// Enable PTY (pseudo-terminal) mode.
    ///
    /// PTY allows commands to behave as if running in a real terminal,
    /// enabling colored output, progress bars, etc.
    pub fn pty(mut self, enable: bool) -> Self {
        self.use_pty = enable;
        self
    }

    /// Stream stdout/stderr to the terminal instead of capturing them.
    pub fn inherit(mut self, enable: bool) -> Self {
        self.inherit = enable;
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Execute the command, blocking until it exits.
    pub fn run(self) -> ExecResult<Output> {
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);

        if self.use_pty {
            self.run_with_pty(filter)
        } else if self.inherit {
            self.run_inherited()
        } else {
            self.run_simple(filter)
        }
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(self.envs.iter().cloned());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Captured execution: stderr is logged through the filter on success.
    fn run_simple(self, filter: &'static FilterRule) -> ExecResult<Output> {
        let name = self.program_name();
        let output = self
            .command()
            .output()
            .map_err(|source| spawn_error(&name, source))?;

        log_output(&name, &output, filter)?;
        Ok(output)
    }

    /// Execution with stdio inherited from this process.
    fn run_inherited(self) -> ExecResult<Output> {
        let name = self.program_name();
        let status = self
            .command()
            .status()
            .map_err(|source| spawn_error(&name, source))?;

        check_status(&name, status, String::new())?;
        Ok(Output {
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    /// Execution with PTY support.
    fn run_with_pty(self, filter: &'static FilterRule) -> ExecResult<Output> {
        let name = self.program_name();
        let pty_error = |e: &dyn std::fmt::Display| ExecError::Pty {
            program: name.clone(),
            message: e.to_string(),
        };

        let mut cmd_builder = CommandBuilder::new(&self.program);
        cmd_builder.args(&self.args);

        for (k, v) in &self.envs {
            cmd_builder.env(k, v);
        }

        if let Some(dir) = &self.cwd {
            cmd_builder.cwd(dir);
        }

        let pty_system = NativePtySystem::default();
        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| pty_error(&e))?;

        let mut child = pair
            .slave
            .spawn_command(cmd_builder)
            .map_err(|e| pty_error(&e))?;
        drop(pair.slave);

        // PTY blocks until EOF, so read on a separate thread
        let mut reader = pair.master.try_clone_reader().map_err(|e| pty_error(&e))?;
        let output_handle = std::thread::spawn(move || {
            let mut output = String::new();
            let _ = reader.read_to_string(&mut output);
            output
        });

        let status = child.wait().map_err(|e| pty_error(&e))?;
        drop(pair.master);

        let output_str = output_handle
            .join()
            .map_err(|_| pty_error(&"failed to join output reader thread"))?;

        if !status.success() {
            #[allow(clippy::cast_possible_wrap)]
            let code = match status.exit_code() as i32 {
                0 => 1,
                code => code,
            };
            return Err(ExecError::Failed {
                program: name,
                code,
                detail: strip_ansi(output_str.trim()).into_owned(),
            });
        }

        filter.log(&name, &output_str);

        // Convert to std::process::Output
        #[cfg(unix)]
        #[allow(clippy::cast_possible_wrap)]
        let std_status = {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw((status.exit_code() as i32) << 8)
        };
        #[cfg(windows)]
        let std_status = {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(status.exit_code())
        };

        Ok(Output {
            status: std_status,
            stdout: output_str.into_bytes(),
            stderr: Vec::new(),
        })
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known banners or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines = self.keep_lines(output);
        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }

    fn keep_lines<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect()
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

/// Tailwind CLI banner and timing lines.
pub const TAILWIND_FILTER: FilterRule = FilterRule::new(&["≈ tailwindcss", "Done in"]);

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").unwrap());
    re.replace_all(s, "")
}

fn spawn_error(name: &str, source: io::Error) -> ExecError {
    let hint = if which::which(name).is_err() {
        " (not found in PATH)".to_string()
    } else {
        String::new()
    };
    ExecError::Spawn {
        program: name.to_string(),
        hint,
        source,
    }
}

/// Map an exit status to an error if the command did not succeed.
fn check_status(name: &str, status: ExitStatus, detail: String) -> ExecResult<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecError::Failed {
            program: name.to_string(),
            code,
            detail,
        }),
        None => Err(ExecError::Signaled {
            program: name.to_string(),
            detail,
        }),
    }
}

/// Log command output, returning error on failure.
fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> ExecResult<()> {
    check_status(name, output.status, format_detail(output, filter))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

/// Collect the useful part of a failed command's output.
fn format_detail(output: &Output, filter: &'static FilterRule) -> String {
    if output.status.success() {
        return String::new();
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut detail = filter
        .skip_prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .fold(stderr.trim(), |s, p| s.trim_start_matches(p).trim_start())
        .to_string();

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() {
        if !detail.is_empty() {
            detail.push('\n');
        }
        detail.push_str(stdout_trimmed);
    }
    strip_ansi(&detail).into_owned()
}

// ============================================================================
// Tests
// ============================================================================
