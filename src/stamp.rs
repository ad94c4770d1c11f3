//! Release stamps embedded into the native build.
//!
//! Two independent stamps, either or both may be present:
//!
//! | Key                   | Value                                  |
//! |-----------------------|----------------------------------------|
//! | `LAST_MODIFIED_STAMP` | `Sat, 15 Jun 2024 14:30:45 GMT`        |
//! | `ETAG`                | `67e55044-10b1-426f-9247-bb680e5fe0c8` |
//!
//! The compiled binary reads them with `option_env!` and answers
//! `If-Modified-Since` / `If-None-Match` requests.

use crate::config::StampConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Build-time key for the Last-Modified stamp.
pub const LAST_MODIFIED_KEY: &str = "LAST_MODIFIED_STAMP";

/// Build-time key for the ETag stamp.
pub const ETAG_KEY: &str = "ETAG";

/// HTTP-date (IMF-fixdate) format.
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Stamp values for one pipeline run.
///
/// Generated once before the first stage and never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseStamp {
    #[serde(rename = "LAST_MODIFIED_STAMP", skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(rename = "ETAG", skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

impl ReleaseStamp {
    /// Generate the stamps enabled in `config` from the current clock and entropy source.
    pub fn generate(config: &StampConfig) -> Self {
        Self::generate_at(config, Utc::now())
    }

    /// Generate with a fixed clock reading.
    pub fn generate_at(config: &StampConfig, now: DateTime<Utc>) -> Self {
        Self {
            last_modified: config.last_modified.then(|| http_date(now)),
            etag: config.etag.then(new_etag),
        }
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.last_modified.is_none() && self.etag.is_none()
    }

    /// Populated stamps as build-time `(key, value)` pairs.
    pub fn env_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(v) = &self.last_modified {
            pairs.push((LAST_MODIFIED_KEY, v.as_str()));
        }
        if let Some(v) = &self.etag {
            pairs.push((ETAG_KEY, v.as_str()));
        }
        pairs
    }
}

/// Format a UTC instant as an HTTP-date.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Random 128-bit identifier in canonical hyphenated form.
fn new_etag() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
