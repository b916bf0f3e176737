use std::env;

use serde::{Deserialize, Serialize};

fn default_inline_window_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Record anonymized usage events
    pub enabled: bool,
    /// Append events as JSON lines here, otherwise they go to the log
    pub log_path: Option<String>,
    /// Inline queries from one user inside this window update a single record
    #[serde(default = "default_inline_window_seconds")]
    pub inline_window_seconds: u64,
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        let enabled = env::var("KOSHA_ANALYTICS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let log_path = env::var("KOSHA_ANALYTICS_PATH").ok();

        Self {
            enabled,
            log_path,
            inline_window_seconds: default_inline_window_seconds(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: None,
            inline_window_seconds: default_inline_window_seconds(),
        }
    }
}
