use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use kosha_config::analytics::AnalyticsConfig;
use uuid::Uuid;

use crate::event::{Origin, UsageEvent};
use crate::sink::{JsonLinesSink, LogSink, UsageSink};

/// Remembers each user's last inline record for a short window.
///
/// Inline queries arrive on every keystroke; within the window they update
/// one record instead of creating a new one per prefix typed.
pub struct InlineDedupe {
    window: Duration,
    last: Mutex<HashMap<String, (Instant, Uuid)>>,
}

impl InlineDedupe {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Record key for `user_hash` at `now`
    pub fn key_for(&self, user_hash: &str, now: Instant) -> Uuid {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());

        last.retain(|_, (at, _)| now.saturating_duration_since(*at) < self.window);

        let key = last
            .get(user_hash)
            .map(|(_, key)| *key)
            .unwrap_or_else(Uuid::new_v4);
        last.insert(user_hash.to_string(), (now, key));

        key
    }
}

/// Fire-and-forget usage tracking. Never fails and never blocks a lookup on storage errors.
pub struct Tracker {
    sink: Option<Arc<dyn UsageSink>>,
    dedupe: InlineDedupe,
}

impl Tracker {
    pub fn new(sink: Arc<dyn UsageSink>, inline_window: Duration) -> Self {
        Self {
            sink: Some(sink),
            dedupe: InlineDedupe::new(inline_window),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            dedupe: InlineDedupe::new(Duration::ZERO),
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        let sink: Arc<dyn UsageSink> = match &config.log_path {
            Some(path) => {
                tracing::info!("Recording usage to {}", path);
                Arc::new(JsonLinesSink::new(path))
            }
            None => Arc::new(LogSink),
        };

        Self::new(sink, Duration::from_secs(config.inline_window_seconds))
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn track(
        &self,
        origin: &Origin,
        query: &str,
        preference: Option<&str>,
        available_sources: &[String],
        chosen_source: Option<&str>,
        inline: bool,
    ) {
        let Some(sink) = &self.sink else {
            return;
        };

        let user_hash = origin.user_hash();
        let key = match (&user_hash, inline) {
            (Some(user), true) => self.dedupe.key_for(user, Instant::now()),
            _ => Uuid::new_v4(),
        };

        let event = UsageEvent {
            key,
            query: query.to_string(),
            preference: preference.map(str::to_string),
            available_sources: available_sources.to_vec(),
            provided_from: chosen_source.map(str::to_string),
            inline,
            user_hash,
            // inline queries carry no chat
            chat_hash: if inline { None } else { origin.chat_hash() },
            chat_type: origin.chat_type.clone(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };

        if let Err(e) = sink.record(&event) {
            tracing::warn!("Failed to record usage: {e:#}");
        }
    }
}
