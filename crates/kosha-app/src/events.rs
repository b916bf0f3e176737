use std::io::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use kosha_core::types::AppEvent;
use kosha_core::{LookupError, SelectionResult};
use tokio_util::sync::CancellationToken;

use crate::commands::Command;
use crate::render;
use crate::state::AppState;

/// Session loop: answer each line until input ends or the session is cancelled
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        prompt();
    }

    loop {
        let event = tokio::select! {
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::debug!("Event loop cancelled");
                break;
            }
        };

        match event {
            AppEvent::TextInput { text } => {
                tracing::debug!(chars = text.chars().count(), "Line received");

                if let Some(reply) = handle_line(&state, &text).await {
                    println!("{reply}\n");
                }
                if interactive {
                    prompt();
                }
            }
            AppEvent::EndOfInput => {
                tracing::info!("Input closed, ending session");
                cancel.cancel();
                break;
            }
        }
    }

    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Reply to one line of input, `None` when there is nothing to say
pub async fn handle_line(state: &AppState, line: &str) -> Option<String> {
    let command = Command::parse(line, state.kosha.registry());
    tracing::debug!(?command, "Parsed input");

    let reply = match command {
        Command::Empty => return None,
        Command::Help => render::help_text(),
        Command::ListSources => render::render_sources(state.kosha.registry()),
        Command::MissingWord => render::MISSING_WORD.to_string(),
        Command::Unknown(command) => {
            tracing::warn!("Unknown command /{command}");
            render::UNKNOWN_COMMAND.to_string()
        }
        Command::Lookup { word, preference } => {
            match lookup(state, &word, preference.as_deref(), false, false).await {
                Ok(result) => render::render_selection(&result),
                Err(e) => render::render_error(&e).to_string(),
            }
        }
        Command::Inline { query } => match lookup(state, &query, None, true, true).await {
            Ok(result) => render::render_inline(&render::inline_items(&result)),
            Err(e) => render::render_error(&e).to_string(),
        },
    };

    Some(reply)
}

/// Run a lookup and record its usage
pub async fn lookup(
    state: &AppState,
    word: &str,
    preference: Option<&str>,
    exhaustive: bool,
    inline: bool,
) -> Result<SelectionResult, LookupError> {
    let result = state.kosha.assemble(word, preference, exhaustive).await;

    match &result {
        Ok(selection) => state.tracker.track(
            &state.origin,
            word,
            preference,
            &selection.available_sources(),
            selection.chosen_source(),
            inline,
        ),
        Err(e) if e.is_user_input() => tracing::debug!("Nothing to look up in {word:?}"),
        Err(e) => tracing::error!(
            retriable = e.is_retriable(),
            status = e.upstream_status(),
            "Lookup of {word:?} failed: {e}"
        ),
    }

    result
}
