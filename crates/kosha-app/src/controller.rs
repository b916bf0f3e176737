use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kosha_core::types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watch_stdin;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input: kanal::bounded_async(64), // typed or piped lines
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        tracing::info!(
            upstream = %self.state.config.upstream.base_url,
            analytics = self.state.tracker.is_enabled(),
            "Starting session"
        );

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input.1.clone(),
            self.cancel_token.clone(),
        ));

        // Stdin watcher
        tasks.spawn(watch_stdin(
            self.cancel_token.child_token(),
            self.channels.input.0.clone(),
        ));

        tasks
    }

    /// Resolves once the session has ended on its own
    pub async fn finished(&self) {
        self.cancel_token.cancelled().await;
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
