//! `[native]` section: the release build of the application itself.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Native build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Run the native build stage.
    pub enable: bool,
    /// Release build command.
    pub command: Vec<String>,
    /// Run inside a pseudo-terminal (keeps cargo's colors and progress bar
    /// when output is captured).
    pub pty: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["cargo".into(), "build".into(), "--release".into()],
            pty: false,
        }
    }
}

impl NativeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.command.is_empty() {
            diag.error_with_hint(
                FieldPath::new("native.command"),
                "command is empty",
                "set `command = [\"cargo\", \"build\", \"--release\"]`",
            );
        }
    }
}
