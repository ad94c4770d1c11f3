//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output shown only with `--verbose`
//! - `status_*` functions for the per-stage result line
//!
//! # Example
//!
//! ```ignore
//! log!("minify"; "{}", output.display());
//!
//! status_success("css (1 stylesheet)");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "release" => prefix.bright_blue().bold().to_string(),
        "stamp" => prefix.bright_magenta().bold().to_string(),
        "native" => prefix.bright_cyan().bold().to_string(),
        "dry-run" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Stage Status
// ============================================================================

/// Current local time formatted as HH:MM:SS
fn now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Stage result: success (✓ prefix, green).
pub fn status_success(message: &str) {
    print_status(&format!("{}", "✓".green()), message);
}

/// Stage result: skipped (dimmed, no symbol).
pub fn status_skipped(message: &str) {
    print_status("", &format!("{}", message.dimmed()));
}

/// Stage result: error (✗ prefix, red) with optional detail.
pub fn status_error(summary: &str, detail: &str) {
    let message = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    print_status(&format!("{}", "✗".red()), &message);
}

fn print_status(symbol: &str, message: &str) {
    let timestamp = format!("[{}]", now()).dimmed().to_string();
    let line = format_status(&timestamp, symbol, message);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

/// Join timestamp, symbol and message into one status block.
///
/// ```text
/// [14:02:11] ✓ css (1 stylesheet)
/// [14:02:12] ✗ minify
/// command `minify` failed with exit code 1
/// ```
fn format_status(timestamp: &str, symbol: &str, message: &str) -> String {
    if symbol.is_empty() {
        format!("{timestamp} {message}")
    } else {
        format!("{timestamp} {symbol} {message}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_with_symbol() {
        let line = format_status("[10:00:00]", "✓", "css (1 stylesheet)");
        assert_eq!(line, "[10:00:00] ✓ css (1 stylesheet)");
    }

    #[test]
    fn test_format_status_without_symbol() {
        let line = format_status("[10:00:00]", "", "native skipped");
        assert_eq!(line, "[10:00:00] native skipped");
    }

    #[test]
    fn test_format_status_keeps_detail_lines() {
        let line = format_status("[t]", "✗", "css\nCommand `npx` failed");
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_prefix_contains_module() {
        let prefix = colorize_prefix("css", "css");
        assert!(prefix.contains("[css]"));
    }

    #[test]
    fn test_now_is_clock_formatted() {
        let t = now();
        assert_eq!(t.len(), 8);
        assert_eq!(t.matches(':').count(), 2);
    }
}
