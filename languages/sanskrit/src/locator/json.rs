use std::sync::LazyLock;

use async_trait::async_trait;
use indexmap::IndexMap;
use kosha_config::upstream::UpstreamConfig;
use kosha_core::error::LookupError;
use kosha_core::lookup::BlockLocator;
use kosha_core::types::{ContentBlock, Word};
use kosha_fetch::PageFetcher;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::extractor::selector;

static NEXT_DATA: LazyLock<Selector> = LazyLock::new(|| selector("script#__NEXT_DATA__"));
static JSON_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/json"]"#));

#[derive(Debug, Deserialize)]
struct SearchHit {
    string: String,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Hits(Vec<SearchHit>),
    Wrapped { results: Vec<SearchHit> },
}

impl SearchResponse {
    fn into_hits(self) -> Vec<SearchHit> {
        match self {
            SearchResponse::Hits(hits) => hits,
            SearchResponse::Wrapped { results } => results,
        }
    }
}

/// Source identifier to card markup, in payload order
type Results = IndexMap<String, CardValue>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CardValue {
    Html(String),
    Parts(Vec<String>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    props: Option<Props>,
    #[serde(default)]
    results: Option<Results>,
}

#[derive(Debug, Deserialize)]
struct Props {
    #[serde(rename = "pageProps", default)]
    page_props: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    results: Option<Results>,
}

impl Payload {
    fn into_results(self) -> Option<Results> {
        self.props
            .and_then(|props| props.page_props)
            .and_then(|page| page.results)
            .or(self.results)
    }
}

/// Resolves the word through `/api/search`, then reads cards from the
/// JSON payload embedded in the result page
pub struct JsonApiLocator {
    config: UpstreamConfig,
}

impl JsonApiLocator {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BlockLocator for JsonApiLocator {
    async fn locate(
        &self,
        fetcher: &dyn PageFetcher,
        word: &Word,
    ) -> Result<Vec<ContentBlock>, LookupError> {
        let search = fetcher.fetch(&self.config.search_url(word.encoded())).await?;

        let Some(target) = resolve_hit(&search, word.normalized(), &self.config.base_url)? else {
            tracing::debug!(word = word.normalized(), "no exact search hit");
            return Ok(Vec::new());
        };

        tracing::debug!(url = %target, "resolved result page");
        let page = fetcher.fetch(target.as_str()).await?;
        parse_blocks(&page)
    }
}

/// Absolute URL of the hit whose `string` equals `word` exactly
pub fn resolve_hit(search: &str, word: &str, base_url: &str) -> Result<Option<Url>, LookupError> {
    let response: SearchResponse = serde_json::from_str(search)
        .map_err(|_| LookupError::extraction("search index", "list of search hits"))?;

    let Some(hit) = response.into_hits().into_iter().find(|hit| hit.string == word) else {
        return Ok(None);
    };

    Url::parse(base_url)
        .and_then(|base| base.join(&hit.url))
        .map(Some)
        .map_err(|_| LookupError::extraction("search index", "resolvable result URL"))
}

/// Cards from the page's embedded payload, one per `results` entry
pub fn parse_blocks(page: &str) -> Result<Vec<ContentBlock>, LookupError> {
    let document = Html::parse_document(page);

    let script = document
        .select(&NEXT_DATA)
        .next()
        .or_else(|| document.select(&JSON_SCRIPT).next())
        .map(|script| script.text().collect::<String>())
        .ok_or_else(|| LookupError::extraction("page payload", "embedded JSON script"))?;

    let payload: Payload = serde_json::from_str(&script)
        .map_err(|_| LookupError::extraction("page payload", "valid JSON"))?;

    let results = payload
        .into_results()
        .ok_or_else(|| LookupError::extraction("page payload", "results mapping"))?;

    Ok(results
        .into_iter()
        .filter_map(|(id, value)| match value {
            CardValue::Html(html) => Some(ContentBlock::new(id, html)),
            CardValue::Parts(parts) => Some(ContentBlock::new(id, parts.concat())),
            CardValue::Other(_) => {
                tracing::debug!(id = %id, "skipping card with unreadable payload");
                None
            }
        })
        .collect())
}
