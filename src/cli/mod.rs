//! Command-line interface module.

mod args;
mod stamp;

pub use args::Cli;
use args::Commands;

use anyhow::Result;

use crate::config::ReleaseConfig;
use crate::log;
use crate::pipeline::{self, PipelineReport};
use crate::stage::StageKind;
use crate::utils::plural_count;

/// Dispatch the parsed command.
pub fn run(cli: &Cli, config: &ReleaseConfig) -> Result<()> {
    let stages: &[StageKind] = match cli.command() {
        Commands::Release => &StageKind::ALL,
        Commands::Css => &[StageKind::Css],
        Commands::Minify => &[StageKind::Minify],
        Commands::Stamp { format } => return stamp::print_stamp(config, format),
    };

    let report = pipeline::run(config, stages, cli.dry_run)?;
    log_summary(&report, cli.dry_run);
    Ok(())
}

fn log_summary(report: &PipelineReport, dry_run: bool) {
    let count = plural_count(report.invocations(), "invocation");
    if dry_run {
        log!("dry-run"; "{count} planned, nothing executed");
    } else if report.stamp.is_empty() {
        log!("release"; "done, {count}");
    } else {
        log!("release"; "done, {count}, stamped build");
    }
}
