use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kosha_analytics::{MemorySink, Tracker};
use kosha_config::Config;
use kosha_config::upstream::UpstreamConfig;
use kosha_core::Word;
use kosha_fetch::{FetchError, PageFetcher};

use crate::state::AppState;

mod session_tests;

const BASE_URL: &str = "http://kosha.test";
const KRITI_HTML: &str = include_str!("../../../../languages/sanskrit/testdata/kriti.html");

/// Serves canned pages by URL and counts every request
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    fn with_word(mut self, word: &str, body: &str) -> Self {
        let url = upstream().word_url(Word::new(word).encoded());
        self.pages.insert(url, body.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Http {
            status: 404,
            url: url.to_string(),
        })
    }
}

fn upstream() -> UpstreamConfig {
    UpstreamConfig {
        base_url: BASE_URL.to_string(),
        ..UpstreamConfig::default()
    }
}

/// App state over canned pages, recording usage in memory
fn test_state(fetcher: Arc<StubFetcher>) -> (AppState, Arc<MemorySink>) {
    let config = Config {
        upstream: upstream(),
        ..Config::default()
    };
    let kosha = kosha_lang_sanskrit::kosha_with_fetcher(&config.upstream, fetcher);
    let sink = Arc::new(MemorySink::new());
    let tracker = Tracker::new(sink.clone(), Duration::from_secs(10));

    (AppState::with_parts(config, kosha, tracker), sink)
}

fn kriti_fetcher() -> Arc<StubFetcher> {
    Arc::new(StubFetcher::default().with_word("कृति", KRITI_HTML))
}
