use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::event::UsageEvent;

/// Destination for usage events
pub trait UsageSink: Send + Sync {
    /// Store `event`, replacing any earlier record with the same key
    fn record(&self, event: &UsageEvent) -> Result<()>;
}

/// Emits each event as a structured log line
pub struct LogSink;

impl UsageSink for LogSink {
    fn record(&self, event: &UsageEvent) -> Result<()> {
        tracing::info!(
            target: "kosha::usage",
            key = %event.key,
            query = %event.query,
            preference = event.preference.as_deref(),
            available = ?event.available_sources,
            provided_from = event.provided_from.as_deref(),
            inline = event.inline,
            user = event.user_hash.as_deref(),
            chat = event.chat_hash.as_deref(),
            chat_type = event.chat_type.as_deref(),
            "usage"
        );
        Ok(())
    }
}

/// Appends events to a file, one JSON object per line.
///
/// Updates are appended too; readers keep the last line per `key`.
pub struct JsonLinesSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

impl UsageSink for JsonLinesSink {
    fn record(&self, event: &UsageEvent) -> Result<()> {
        let line = serde_json::to_string(event).context("Failed to serialize usage event")?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("usage log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        writeln!(file, "{line}").context("Failed to write usage event")
    }
}

/// Keeps events in memory, keyed updates replace earlier records
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<UsageEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UsageEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl UsageSink for MemorySink {
    fn record(&self, event: &UsageEvent) -> Result<()> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| anyhow!("usage store lock poisoned"))?;

        match events.iter_mut().find(|e| e.key == event.key) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        Ok(())
    }
}
