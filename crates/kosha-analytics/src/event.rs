use std::fmt::Display;

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Where a query came from, as reported by the front end
#[derive(Debug, Clone, Default)]
pub struct Origin {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub chat_id: Option<i64>,
    pub chat_title: Option<String>,
    /// "private", "group", "channel", "cli", ...
    pub chat_type: Option<String>,
}

impl Origin {
    pub fn user_hash(&self) -> Option<String> {
        let id = self.user_id?;
        Some(anonymize(id, self.user_name.as_deref().unwrap_or_default()))
    }

    pub fn chat_hash(&self) -> Option<String> {
        let id = self.chat_id?;
        Some(anonymize(id, self.chat_title.as_deref().unwrap_or_default()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageEvent {
    /// Record key; repeated inline queries reuse it to update one record
    pub key: Uuid,
    pub query: String,
    pub preference: Option<String>,
    pub available_sources: Vec<String>,
    pub provided_from: Option<String>,
    pub inline: bool,
    pub user_hash: Option<String>,
    pub chat_hash: Option<String>,
    pub chat_type: Option<String>,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// Irreversible 16 hex digit code for an id and a name
pub fn anonymize(id: impl Display, name: &str) -> String {
    let digest = Sha256::digest(format!("{id}{name}").as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}
