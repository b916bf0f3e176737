use std::sync::Arc;

use kosha_config::upstream::UpstreamConfig;
use kosha_core::Kosha;
use kosha_fetch::{FetchError, HttpFetcher, PageFetcher};

pub mod catalog;
pub mod extractor;
pub mod locator;
pub mod markup;
pub mod processor;

#[cfg(test)]
mod tests;

pub use catalog::catalog;
pub use extractor::ExtractionRule;
pub use locator::{HtmlPageLocator, JsonApiLocator};
pub use processor::SanskritProcessor;

/// Lookup pipeline against the live aggregator
pub fn kosha(config: &UpstreamConfig) -> Result<Kosha, FetchError> {
    let fetcher = HttpFetcher::from_config(config)?;
    Ok(kosha_with_fetcher(config, Arc::new(fetcher)))
}

/// Lookup pipeline over a caller supplied fetcher
pub fn kosha_with_fetcher(config: &UpstreamConfig, fetcher: Arc<dyn PageFetcher>) -> Kosha {
    tracing::info!(
        base_url = %config.base_url,
        format = %config.format,
        "using upstream aggregator"
    );

    Kosha::new(
        Arc::new(SanskritProcessor::new()),
        locator::locator_for(config),
        fetcher,
        catalog(),
    )
}
