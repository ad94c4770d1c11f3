//! Asset classification.
//!
//! Every discovered file gets its class assigned once, at
//! discovery time. Later stages match on [`AssetClass`] instead of looking at
//! file names again.

use std::path::{Path, PathBuf};

/// Infix marking a size-reduced, production-ready variant (`app.min.js`).
pub const MIN_MARKER: &str = "min";

/// Extensions handled by the minification stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetExt {
    Js,
    Json,
}

impl AssetExt {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "js" => Some(Self::Js),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Whether a file is a source asset or an already-minified variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    /// Source asset; gets a minified sibling.
    Raw,
    /// Carries the minified marker; never used as minifier input.
    Minified,
}

impl AssetClass {
    /// Classify by the last infix of the file stem (`app.min.js` -> `Minified`).
    pub fn of(path: &Path) -> Self {
        let is_min = path
            .file_stem()
            .map(Path::new)
            .and_then(Path::extension)
            .is_some_and(|infix| infix == MIN_MARKER);
        if is_min { Self::Minified } else { Self::Raw }
    }
}

/// A JS/JSON file found under an asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub path: PathBuf,
    pub class: AssetClass,
}

impl AssetFile {
    /// Classify `path`, returning `None` for files of other types.
    pub fn classify(path: PathBuf) -> Option<Self> {
        AssetExt::from_path(&path)?;
        let class = AssetClass::of(&path);
        Some(Self { path, class })
    }

    /// Whether this file is a minifier input.
    pub fn is_raw(&self) -> bool {
        self.class == AssetClass::Raw
    }

    /// Co-located minified output: `dir/app.js` -> `dir/app.min.js`.
    pub fn minified_path(&self) -> PathBuf {
        minified_variant(&self.path)
    }
}

/// Insert the minified marker before the extension.
///
/// `main.css` -> `main.min.css`, `data.json` -> `data.min.json`.
/// Paths that already carry the marker are returned unchanged, so the
/// result always classifies as [`AssetClass::Minified`].
pub fn minified_variant(path: &Path) -> PathBuf {
    if AssetClass::of(path) == AssetClass::Minified {
        return path.to_path_buf();
    }

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.{MIN_MARKER}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{MIN_MARKER}"),
    };
    path.with_file_name(name)
}
