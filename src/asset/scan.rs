//! Asset discovery (pure, reads the filesystem only).

use std::path::Path;

use jwalk::WalkDir;

use super::AssetFile;

/// Discover JS/JSON files under every root.
///
/// With `dir_filter`, only files whose immediate parent directory has that
/// name qualify (`src/**/_asset/*.js`). Missing roots are skipped.
/// Hidden files and directories are included; symlinks to files qualify,
/// symlinked directories are not descended into.
/// The result is sorted by path and contains both classes; callers pick
/// [`AssetFile::is_raw`] entries as minifier input.
pub fn scan_assets<P: AsRef<Path>>(roots: &[P], dir_filter: Option<&str>) -> Vec<AssetFile> {
    let mut files: Vec<AssetFile> = roots
        .iter()
        .map(AsRef::as_ref)
        .filter(|root| root.is_dir())
        .flat_map(|root| {
            WalkDir::new(root)
                .skip_hidden(false)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| {
                    let ty = e.file_type();
                    ty.is_file() || (ty.is_symlink() && e.path().is_file())
                })
                .map(|e| e.path())
        })
        .filter(|path| dir_filter.is_none_or(|dir| in_dir_named(path, dir)))
        .filter_map(AssetFile::classify)
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    files
}

fn in_dir_named(path: &Path, dir: &str) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name == dir)
}
