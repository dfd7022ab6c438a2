//! Runtime configuration

use serde::{Deserialize, Serialize};

/// Tunable parameters of the storefront runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Reserved path that deep-links into the admin view
    pub admin_path: String,
    /// Path pushed for every non-admin view
    pub root_path: String,
    /// Fixed header height subtracted from anchor scroll destinations
    pub header_offset: f64,
    /// Delay before a cross-view anchor scroll fires, so the target
    /// anchor exists in the newly mounted view
    pub anchor_delay_ms: u32,
    /// Smoothing rate of the scroll animation (per second)
    pub scroll_smoothing: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            admin_path: "/admin".to_string(),
            root_path: "/".to_string(),
            header_offset: 100.0,
            anchor_delay_ms: 300,
            scroll_smoothing: 8.0,
        }
    }
}

impl RuntimeConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("config parse error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.admin_path, "/admin");
        assert_eq!(cfg.root_path, "/");
        assert_eq!(cfg.header_offset, 100.0);
        assert_eq!(cfg.anchor_delay_ms, 300);
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = RuntimeConfig::from_json(r#"{"header_offset":80.0}"#).unwrap();
        assert_eq!(cfg.header_offset, 80.0);
        assert_eq!(cfg.admin_path, "/admin");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(RuntimeConfig::from_json("not json").is_err());
    }
}
