use std::sync::LazyLock;

use async_trait::async_trait;
use kosha_config::upstream::UpstreamConfig;
use kosha_core::error::LookupError;
use kosha_core::lookup::BlockLocator;
use kosha_core::types::{ContentBlock, Word};
use kosha_fetch::PageFetcher;
use scraper::{ElementRef, Html, Selector};

use crate::extractor::selector;
use crate::markup::element_text;

static CARD_HEADER: LazyLock<Selector> =
    LazyLock::new(|| selector("section#word div.card-header"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h5"));

/// Reads cards from the `/word/{word}` results page
pub struct HtmlPageLocator {
    config: UpstreamConfig,
}

impl HtmlPageLocator {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BlockLocator for HtmlPageLocator {
    async fn locate(
        &self,
        fetcher: &dyn PageFetcher,
        word: &Word,
    ) -> Result<Vec<ContentBlock>, LookupError> {
        let page = fetcher.fetch(&self.config.word_url(word.encoded())).await?;
        Ok(parse_blocks(&page))
    }
}

/// Each card header's heading paired with the card bodies beside it
pub fn parse_blocks(page: &str) -> Vec<ContentBlock> {
    let document = Html::parse_document(page);
    let mut blocks = Vec::new();

    for header in document.select(&CARD_HEADER) {
        let label = header
            .select(&HEADING)
            .next()
            .map(element_text)
            .unwrap_or_else(|| element_text(header));

        if label.is_empty() {
            tracing::debug!("skipping card without a heading");
            continue;
        }

        blocks.push(ContentBlock::new(label, card_bodies(header)));
    }

    blocks
}

fn card_bodies(header: ElementRef<'_>) -> String {
    let Some(parent) = header.parent() else {
        return String::new();
    };

    parent
        .children()
        .filter(|node| node.id() != header.id())
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().classes().any(|class| class == "card-body"))
        .map(|element| element.html())
        .collect()
}
