//! Configuration section definitions.
//!
//! Each module corresponds to a section in `relstamp.toml`:
//!
//! | Module   | TOML Section | Purpose                                  |
//! |----------|--------------|------------------------------------------|
//! | `css`    | `[css]`      | Stylesheet entry points and compiler     |
//! | `assets` | `[assets]`   | JS/JSON asset roots and minifier         |
//! | `native` | `[native]`   | Release build command                    |
//! | `stamp`  | `[stamp]`    | Which release stamps to generate         |

mod assets;
mod css;
mod native;
mod stamp;

pub use assets::AssetsConfig;
pub use css::{CssConfig, CssEntry};
pub use native::NativeConfig;
pub use stamp::StampConfig;
