use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use kosha_fetch::{FetchError, PageFetcher};


pub(crate) const KRITI_HTML: &str = include_str!("../../testdata/kriti.html");
pub(crate) const SEARCH_KRITI: &str = include_str!("../../testdata/search_kriti.json");
pub(crate) const RESULT_KRITI: &str = include_str!("../../testdata/result_kriti.html");
pub(crate) const SEARCH_EMPTY: &str = include_str!("../../testdata/search_empty.json");
pub(crate) const RESULT_EMPTY: &str = include_str!("../../testdata/result_empty.html");

/// Serves canned pages by URL and counts every request
#[derive(Default)]
pub(crate) struct FixtureFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FixtureFetcher {
    pub(crate) fn with_page(mut self, url: impl Into<String>, body: &str) -> Self {
        self.pages.insert(url.into(), body.to_string());
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Http {
            status: 404,
            url: url.to_string(),
        })
    }
}
