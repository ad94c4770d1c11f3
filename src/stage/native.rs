//! Native release build.
//!
//! Runs `cargo build --release` once, with the `MINIFY` flag and the release
//! stamps added to the inherited environment so the build can embed them.

use super::{Invocation, OutputMode, StageKind};
use crate::pipeline::PipelineContext;

pub fn plan(ctx: &PipelineContext<'_>) -> Vec<Invocation> {
    let native = &ctx.config.native;

    let mut env = ctx.overlay();
    for (key, value) in ctx.stamp.env_pairs() {
        env.insert(key.to_string(), value.to_string());
    }

    let output = if native.pty {
        OutputMode::Pty
    } else {
        OutputMode::Inherit
    };

    let inv = Invocation::new(StageKind::Native, native.command.clone(), env)
        .output(output)
        .label(native.command.join(" "));
    vec![inv]
}
