//! Sequential, fail-fast release pipeline.
//!
//! ```text
//! stamp ──► css ──► minify ──► native
//!            │        │          │
//!            └────────┴──────────┴──► first failure stops the run
//! ```
//!
//! Stages run strictly one after another in [`StageKind::ALL`] order, and
//! invocations inside a stage run in plan order. The first tool that fails
//! aborts the run; its exit code becomes the process exit code.

use std::fs;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::{MINIFY_ENV, ReleaseConfig};
use crate::logger::{status_error, status_skipped, status_success};
use crate::stage::{Invocation, StageKind};
use crate::stamp::ReleaseStamp;
use crate::utils::exec::ExecError;
use crate::utils::plural_count;
use crate::{debug, log};

/// Run-wide state shared by every stage.
pub struct PipelineContext<'a> {
    pub config: &'a ReleaseConfig,
    /// Resolved once at config load.
    pub minify: bool,
    pub stamp: ReleaseStamp,
}

impl<'a> PipelineContext<'a> {
    pub fn new(config: &'a ReleaseConfig, stamp: ReleaseStamp) -> Self {
        Self {
            config,
            minify: config.minify,
            stamp,
        }
    }

    /// Environment overlay every tool receives.
    pub fn overlay(&self) -> FxHashMap<String, String> {
        let mut env = FxHashMap::default();
        env.insert(MINIFY_ENV.to_string(), self.minify.to_string());
        env
    }
}

/// A stage aborted because one of its tools failed.
#[derive(Debug, Error)]
#[error("{stage} stage failed")]
pub struct StageFailure {
    pub stage: StageKind,
    #[source]
    pub source: ExecError,
}

impl StageFailure {
    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }
}

/// What a completed run did.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Stages that ran, with their invocation counts.
    pub stages: Vec<(StageKind, usize)>,
    pub stamp: ReleaseStamp,
}

impl PipelineReport {
    pub fn invocations(&self) -> usize {
        self.stages.iter().map(|(_, n)| n).sum()
    }
}

/// Run the `selected` stages, in pipeline order.
///
/// Disabled stages are reported and skipped. With `dry_run`, every
/// invocation is printed instead of executed.
pub fn run(config: &ReleaseConfig, selected: &[StageKind], dry_run: bool) -> Result<PipelineReport> {
    let stages: Vec<StageKind> = StageKind::ALL
        .into_iter()
        .filter(|stage| selected.contains(stage))
        .collect();

    let stamp = if stages
        .iter()
        .any(|s| *s == StageKind::Native && s.is_enabled(config))
    {
        let stamp = ReleaseStamp::generate(&config.stamp);
        if let Some(date) = stamp.last_modified() {
            log!("stamp"; "last-modified {date}");
        }
        if let Some(etag) = stamp.etag() {
            log!("stamp"; "etag {etag}");
        }
        if stamp.is_empty() {
            debug!("stamp"; "all stamps disabled");
        }
        stamp
    } else {
        ReleaseStamp::default()
    };

    let ctx = PipelineContext::new(config, stamp);
    debug!("release"; "minify={} root={}", ctx.minify, config.get_root().display());

    let mut report = PipelineReport::default();
    for stage in stages {
        if !stage.is_enabled(config) {
            status_skipped(&format!("{stage} (disabled)"));
            continue;
        }

        let plan = stage.plan(&ctx);
        if plan.is_empty() {
            status_skipped(&format!("{stage} (nothing to do)"));
            report.stages.push((stage, 0));
            continue;
        }

        for inv in &plan {
            if dry_run {
                log!("dry-run"; "{inv}");
            } else {
                run_invocation(&ctx, inv)?;
            }
        }

        status_success(&format!("{stage} ({})", plural_count(plan.len(), stage.unit())));
        report.stages.push((stage, plan.len()));
    }

    report.stamp = ctx.stamp;
    Ok(report)
}

fn run_invocation(ctx: &PipelineContext<'_>, inv: &Invocation) -> Result<()> {
    if let Some(dir) = &inv.ensure_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    debug!(inv.stage.name(); "{inv}");
    if let Err(source) = inv.run(ctx.config.get_root()) {
        status_error(&format!("{} failed", inv.stage), &source.to_string());
        return Err(StageFailure {
            stage: inv.stage,
            source,
        }
        .into());
    }

    if !inv.label.is_empty() {
        log!(inv.stage.name(); "{}", inv.label);
    }
    Ok(())
}
