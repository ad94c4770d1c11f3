//! Front-end asset discovery and naming.
//!
//! - `kind`: typed classification (`AssetClass`) and the
//!   minified-variant naming rule
//! - `scan`: recursive discovery under asset roots

mod kind;
mod scan;

pub use kind::{AssetFile, minified_variant};
pub use scan::scan_assets;
