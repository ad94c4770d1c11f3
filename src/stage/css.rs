//! Stylesheet compilation through the Tailwind CLI.
//!
//! One invocation per configured entry:
//!
//! ```text
//! npx @tailwindcss/cli -i <input> -o <output> [--minify]
//! ```
//!
//! With minify on, the output lands at the minified variant of the
//! configured path (`main.css` -> `main.min.css`).

use std::path::{Path, PathBuf};

use super::{Invocation, OutputMode, StageKind};
use crate::asset::minified_variant;
use crate::config::CssEntry;
use crate::pipeline::PipelineContext;
use crate::utils::exec::TAILWIND_FILTER;

/// Output path for `entry` under the resolved minify flag.
pub fn resolve_output(entry: &CssEntry, minify: bool) -> PathBuf {
    if minify {
        minified_variant(&entry.output)
    } else {
        entry.output.clone()
    }
}

pub fn plan(ctx: &PipelineContext<'_>) -> Vec<Invocation> {
    let config = ctx.config;
    config
        .css
        .entries
        .iter()
        .map(|entry| {
            let output = resolve_output(entry, ctx.minify);
            let argv = build_argv(&config.css.command, &entry.input, &output, ctx.minify);
            let label = format!(
                "{} -> {}",
                config.root_relative(&entry.input),
                config.root_relative(&output)
            );
            Invocation::new(StageKind::Css, argv, ctx.overlay())
                .output(OutputMode::Captured(&TAILWIND_FILTER))
                .ensure_dir(output.parent())
                .label(label)
        })
        .collect()
}

fn build_argv(command: &[String], input: &Path, output: &Path, minify: bool) -> Vec<String> {
    let mut argv = command.to_vec();
    argv.extend([
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-o".to_string(),
        output.to_string_lossy().into_owned(),
    ]);
    if minify {
        argv.push("--minify".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::stamp::ReleaseStamp;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_output() {
        let entry = CssEntry {
            input: PathBuf::from("src/_asset/tailwind/main.css"),
            output: PathBuf::from("src/_asset/main.css"),
        };
        assert_eq!(resolve_output(&entry, false), PathBuf::from("src/_asset/main.css"));
        assert_eq!(resolve_output(&entry, true), PathBuf::from("src/_asset/main.min.css"));
    }

    #[test]
    fn test_plan_default_entry() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), false);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());

        let plan = plan(&ctx);
        assert_eq!(plan.len(), 1);

        let inv = &plan[0];
        assert_eq!(inv.stage, StageKind::Css);
        assert_eq!(&inv.argv[..2], &["npx", "@tailwindcss/cli"]);
        assert_eq!(inv.argv[2], "-i");
        assert!(inv.argv[3].ends_with("src/_asset/tailwind/main.css"));
        assert_eq!(inv.argv[4], "-o");
        assert!(inv.argv[5].ends_with("src/_asset/main.css"));
        assert!(!inv.argv.contains(&"--minify".to_string()));
        assert_eq!(inv.label, "src/_asset/tailwind/main.css -> src/_asset/main.css");
        assert_eq!(inv.env.get("MINIFY").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_plan_minified() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), true);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());

        let inv = &plan(&ctx)[0];
        assert_eq!(inv.argv.last().map(String::as_str), Some("--minify"));
        assert!(inv.argv[5].ends_with("src/_asset/main.min.css"));
        assert_eq!(
            inv.ensure_dir.as_deref(),
            Some(config.root.join("src/_asset").as_path())
        );
        assert_eq!(inv.env.get("MINIFY").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_plan_keeps_entry_order() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config_at(dir.path(), false);
        let root = config.root.clone();
        config.css.entries = vec![
            CssEntry {
                input: root.join("b.css"),
                output: root.join("out/b.css"),
            },
            CssEntry {
                input: root.join("a.css"),
                output: root.join("out/a.css"),
            },
        ];
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());

        let labels: Vec<_> = plan(&ctx).into_iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["b.css -> out/b.css", "a.css -> out/a.css"]);
    }
}
