use std::sync::Arc;
use std::time::Duration;

use kosha_core::types::AppEvent;
use tokio::io::BufReader;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::events::{event_loop, handle_line};
use crate::io::watch_lines;
use crate::render;

#[tokio::test]
async fn test_bare_word_renders_highest_priority_source() {
    let (state, sink) = test_state(kriti_fetcher());

    let reply = handle_line(&state, "कृति").await.unwrap();

    assert_eq!(reply, "* kRti\n* f.\n* composition\n\n📖 Spoken Sanskrit");

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].query, "कृति");
    assert_eq!(events[0].provided_from.as_deref(), Some("Spoken Sanskrit"));
    assert_eq!(
        events[0].available_sources,
        vec!["Spoken Sanskrit", "Hindi", "Shabda Sagara"]
    );
    assert_eq!(events[0].chat_type.as_deref(), Some("cli"));
    assert!(!events[0].inline);
}

#[tokio::test]
async fn test_code_command_prefers_that_source() {
    let (state, sink) = test_state(kriti_fetcher());

    let reply = handle_line(&state, "/hindi कृति").await.unwrap();

    assert!(reply.starts_with("* कृति\n"));
    assert!(reply.ends_with("📖 Hindi Dictionary"));
    assert_eq!(sink.events()[0].preference.as_deref(), Some("Hindi"));
}

#[tokio::test]
async fn test_unavailable_preference_falls_back() {
    let (state, _sink) = test_state(kriti_fetcher());

    let reply = handle_line(&state, "/apte कृति").await.unwrap();

    assert!(reply.ends_with("📖 Spoken Sanskrit"));
}

#[tokio::test]
async fn test_inline_lists_every_source() {
    let (state, sink) = test_state(kriti_fetcher());

    let reply = handle_line(&state, "@ कृति").await.unwrap();

    let lines: Vec<_> = reply.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("1. Hindi"));
    assert!(lines[1].starts_with("2. Spoken Sanskrit"));
    assert!(lines[2].starts_with("3. Shabda Sagara"));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].inline);
    assert!(events[0].provided_from.is_none());
}

#[tokio::test]
async fn test_missing_page_is_a_failure_not_a_miss() {
    let fetcher = Arc::new(StubFetcher::default());
    let (state, sink) = test_state(fetcher.clone());

    let reply = handle_line(&state, "कृति").await.unwrap();

    assert_eq!(reply, render::SEARCH_FAILED);
    assert_eq!(fetcher.calls(), 1);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_page_without_cards_is_not_found() {
    let fetcher = Arc::new(StubFetcher::default().with_word("क्ष्व", "<html><body></body></html>"));
    let (state, sink) = test_state(fetcher);

    let reply = handle_line(&state, "क्ष्व").await.unwrap();

    assert_eq!(reply, render::NOT_FOUND);
    assert!(sink.events()[0].available_sources.is_empty());
}

#[tokio::test]
async fn test_commands_without_lookup_never_fetch() {
    let fetcher = Arc::new(StubFetcher::default());
    let (state, _sink) = test_state(fetcher.clone());

    assert_eq!(handle_line(&state, "/sh").await.unwrap(), render::MISSING_WORD);
    assert_eq!(
        handle_line(&state, "/nope कृति").await.unwrap(),
        render::UNKNOWN_COMMAND
    );
    assert!(handle_line(&state, "/kosha").await.unwrap().contains("1. sp - Spoken Sanskrit"));
    assert!(handle_line(&state, "  ").await.is_none());
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_watcher_sends_lines_then_end_of_input() {
    let (tx, rx) = kanal::bounded_async(8);
    let input = BufReader::new("कृति\n/help\n".as_bytes());

    watch_lines(input, CancellationToken::new(), tx).await.unwrap();

    match rx.recv().await.unwrap() {
        AppEvent::TextInput { text } => assert_eq!(text, "कृति"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(rx.recv().await.unwrap(), AppEvent::TextInput { .. }));
    assert!(matches!(rx.recv().await.unwrap(), AppEvent::EndOfInput));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let (state, sink) = test_state(kriti_fetcher());
    let (tx, rx) = kanal::bounded_async(8);
    let cancel = CancellationToken::new();

    let session = tokio::spawn(event_loop(Arc::new(state), rx, cancel.clone()));

    tx.send(AppEvent::TextInput {
        text: "कृति".to_string(),
    })
    .await
    .unwrap();
    tx.send(AppEvent::EndOfInput).await.unwrap();

    let result = timeout(Duration::from_secs(2), session)
        .await
        .expect("session should end on end of input");
    assert!(result.unwrap().is_ok());
    assert!(cancel.is_cancelled());
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_cancel_stops_watcher() {
    let (tx, _rx) = kanal::bounded_async::<AppEvent>(8);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let (_writer, reader) = tokio::io::duplex(64);
    let result = timeout(
        Duration::from_secs(2),
        watch_lines(BufReader::new(reader), cancel, tx),
    )
    .await
    .expect("watcher should stop once cancelled");
    assert!(result.is_ok());
}
