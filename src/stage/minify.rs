//! JS/JSON minification.
//!
//! Every raw asset found under the configured roots gets a co-located
//! minified sibling:
//!
//! ```text
//! minify -o src/_asset/app.min.js src/_asset/app.js
//! ```
//!
//! Files already carrying the `.min` marker are never inputs, so a second
//! run regenerates the same outputs instead of producing `app.min.min.js`.

use super::{Invocation, OutputMode, StageKind};
use crate::asset::{AssetFile, scan_assets};
use crate::debug;
use crate::pipeline::PipelineContext;
use crate::utils::exec::EMPTY_FILTER;

pub fn plan(ctx: &PipelineContext<'_>) -> Vec<Invocation> {
    let config = ctx.config;
    let assets = &config.assets;

    scan_assets(&assets.roots, assets.dir_filter())
        .into_iter()
        .filter(|file| {
            if !file.is_raw() {
                debug!("minify"; "skip {}", config.root_relative(&file.path));
            }
            file.is_raw()
        })
        .map(|file| {
            let output = file.minified_path();
            Invocation::new(StageKind::Minify, build_argv(&assets.command, &file), ctx.overlay())
                .output(OutputMode::Captured(&EMPTY_FILTER))
                .label(config.root_relative(&output))
        })
        .collect()
}

fn build_argv(command: &[String], file: &AssetFile) -> Vec<String> {
    let mut argv = command.to_vec();
    argv.extend([
        "-o".to_string(),
        file.minified_path().to_string_lossy().into_owned(),
        file.path.to_string_lossy().into_owned(),
    ]);
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::stamp::ReleaseStamp;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_plan_only_raw_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/_asset/app.js");
        touch(dir.path(), "src/_asset/vendor.min.js");
        touch(dir.path(), "src/_asset/importmap.json");
        touch(dir.path(), "src/_asset/main.css");

        let config = test_config_at(dir.path(), false);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());

        let labels: Vec<_> = plan(&ctx).into_iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec!["src/_asset/app.min.js", "src/_asset/importmap.min.json"]
        );
    }

    #[test]
    fn test_argv_shape() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/page/_asset/page.js");

        let config = test_config_at(dir.path(), false);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());

        let plan = plan(&ctx);
        assert_eq!(plan.len(), 1);
        let argv = &plan[0].argv;
        assert_eq!(argv[0], "minify");
        assert_eq!(argv[1], "-o");
        assert!(argv[2].ends_with("src/page/_asset/page.min.js"));
        assert!(argv[3].ends_with("src/page/_asset/page.js"));
    }

    #[test]
    fn test_plan_respects_dir_filter() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/_asset/app.js");
        touch(dir.path(), "src/tools/build.js");

        let mut config = test_config_at(dir.path(), false);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());
        assert_eq!(plan(&ctx).len(), 1);

        config.assets.dir.clear();
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());
        assert_eq!(plan(&ctx).len(), 2);
    }

    #[test]
    fn test_empty_tree_plans_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path(), false);
        let ctx = PipelineContext::new(&config, ReleaseStamp::default());
        assert!(plan(&ctx).is_empty());
    }
}
