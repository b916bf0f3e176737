use std::env;

use serde::{Deserialize, Serialize};

use self::analytics::AnalyticsConfig;
use self::upstream::UpstreamConfig;

pub mod analytics;
pub mod upstream;

pub use self::upstream::PageFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub analytics: AnalyticsConfig,

    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
    /// Filter directive used when RUST_LOG is not set
    pub log_filter: String,
}

impl Config {
    pub fn new() -> Self {
        let log_json = env::var("KOSHA_LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let log_filter = env::var("KOSHA_LOG").unwrap_or_else(|_| "info".to_string());

        Config {
            upstream: UpstreamConfig::new(),
            analytics: AnalyticsConfig::new(),

            log_json,
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
