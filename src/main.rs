//! relstamp - asset and release pipeline for statically compiled web apps.

mod asset;
mod cli;
mod config;
mod logger;
mod pipeline;
mod stage;
mod stamp;
mod utils;

use clap::{ColorChoice, Parser};
use cli::Cli;
use config::{ConfigError, ReleaseConfig};
use pipeline::StageFailure;
use utils::exec::ExecError;

/// Exit code for configuration problems.
const CONFIG_EXIT_CODE: i32 = 2;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let result = ReleaseConfig::load(&cli).and_then(|config| cli::run(&cli, &config));

    if let Err(err) = result {
        // stage failures were already reported with the tool's output
        if err.downcast_ref::<StageFailure>().is_some() {
            log!("error"; "{err}");
        } else {
            log!("error"; "{err:#}");
        }
        std::process::exit(exit_code(&err));
    }
}

/// Map a failed run to the process exit code.
///
/// A failing tool's own code is propagated unchanged.
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(failure) = cause.downcast_ref::<StageFailure>() {
            return failure.exit_code();
        }
        if let Some(exec) = cause.downcast_ref::<ExecError>() {
            return exec.exit_code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_EXIT_CODE;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageKind;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_propagates_tool_code() {
        let err: anyhow::Error = StageFailure {
            stage: StageKind::Native,
            source: ExecError::Failed {
                program: "cargo".into(),
                code: 101,
                detail: String::new(),
            },
        }
        .into();
        assert_eq!(exit_code(&err), 101);
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = Err::<(), _>(ExecError::Signaled {
            program: "minify".into(),
            detail: String::new(),
        })
        .context("minify stage")
        .unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_exit_code_config_and_other() {
        let err: anyhow::Error = ConfigError::NotFound(PathBuf::from("x.toml")).into();
        assert_eq!(exit_code(&err), CONFIG_EXIT_CODE);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
