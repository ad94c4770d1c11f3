//! `stamp` command: print release stamps for use outside the pipeline.
//!
//! ```sh
//! eval "$(relstamp stamp | sed 's/^/export /')"
//! cargo build --release
//! ```

use std::io::{self, Write};

use anyhow::Result;

use super::args::StampFormat;
use crate::config::ReleaseConfig;
use crate::stamp::ReleaseStamp;

pub fn print_stamp(config: &ReleaseConfig, format: StampFormat) -> Result<()> {
    let stamp = ReleaseStamp::generate(&config.stamp);
    let mut out = io::stdout().lock();
    out.write_all(render(&stamp, format)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn render(stamp: &ReleaseStamp, format: StampFormat) -> Result<String> {
    Ok(match format {
        StampFormat::Env => stamp
            .env_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}=\"{value}\"\n"))
            .collect(),
        StampFormat::Json => serde_json::to_string_pretty(stamp)? + "\n",
    })
}
