//! `[stamp]` section.
//!
//! Both stamps are independently optional; a deployment may rely on either
//! `Last-Modified` or `ETag` validation, or both.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Generate `LAST_MODIFIED_STAMP`.
    pub last_modified: bool,
    /// Generate `ETAG`.
    pub etag: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            last_modified: true,
            etag: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_both_enabled_by_default() {
        let config = test_parse_config("");
        assert!(config.stamp.last_modified);
        assert!(config.stamp.etag);
    }

    #[test]
    fn test_disable_one() {
        let config = test_parse_config("[stamp]\netag = false");
        assert!(config.stamp.last_modified);
        assert!(!config.stamp.etag);
    }
}
