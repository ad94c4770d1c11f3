//! Utility modules.
//!
//! - [`exec`]: external command execution (`Cmd`, `ExecError`)
//! - [`path`]: path normalization against the project root
//! - [`plural`]: count formatting for log lines

pub mod exec;
pub mod path;
mod plural;

pub use plural::plural_count;
