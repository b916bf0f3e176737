use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://kosha.sanskrit.today";

/// Upstream rejects requests without a browser-like agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Shape of the aggregator's responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// `/word/{word}` returns a full HTML page of cards
    #[default]
    Html,
    /// `/api/search` resolves the word, the result page embeds a JSON payload
    Json,
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(PageFormat::Html),
            "json" => Ok(PageFormat::Json),
            other => Err(format!("unknown page format: {other}")),
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFormat::Html => f.write_str("html"),
            PageFormat::Json => f.write_str("json"),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    3
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub format: PageFormat,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl UpstreamConfig {
    pub fn new() -> Self {
        let base_url = env::var("KOSHA_BASE_URL").unwrap_or_else(|_| default_base_url());

        let format = env::var("KOSHA_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let timeout_seconds = env::var("KOSHA_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        let user_agent = env::var("KOSHA_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Self {
            base_url,
            format,
            timeout_seconds,
            user_agent,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Results page for an already percent-encoded word
    pub fn word_url(&self, encoded_word: &str) -> String {
        format!("{}/word/{}", self.base(), encoded_word)
    }

    /// Search endpoint for an already percent-encoded word
    pub fn search_url(&self, encoded_word: &str) -> String {
        format!("{}/api/search?q={}", self.base(), encoded_word)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            format: PageFormat::default(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}
