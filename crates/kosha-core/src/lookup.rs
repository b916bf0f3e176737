use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use kosha_fetch::PageFetcher;

use crate::dictionary::SourceRegistry;
use crate::error::LookupError;
use crate::language::LanguageProcessor;
use crate::types::{Answer, ContentBlock, ResultMapping, SelectionResult, Word};

/// Finds dictionary cards for a word in whatever format upstream currently serves
#[async_trait]
pub trait BlockLocator: Send + Sync {
    /// Cards in first-seen page order. An empty list means upstream has no entry.
    async fn locate(
        &self,
        fetcher: &dyn PageFetcher,
        word: &Word,
    ) -> Result<Vec<ContentBlock>, LookupError>;
}

/// Lookup pipeline: normalize, locate cards, extract, select
#[derive(Clone)]
pub struct Kosha {
    processor: Arc<dyn LanguageProcessor>,
    locator: Arc<dyn BlockLocator>,
    fetcher: Arc<dyn PageFetcher>,
    registry: Arc<SourceRegistry>,
}

impl Kosha {
    pub fn new(
        processor: Arc<dyn LanguageProcessor>,
        locator: Arc<dyn BlockLocator>,
        fetcher: Arc<dyn PageFetcher>,
        registry: Arc<SourceRegistry>,
    ) -> Self {
        Self {
            processor,
            locator,
            fetcher,
            registry,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Every recognized source's answer for `word`
    pub async fn collect(&self, word: &Word) -> Result<ResultMapping, LookupError> {
        let blocks = self.locator.locate(self.fetcher.as_ref(), word).await?;
        tracing::debug!(word = word.normalized(), blocks = blocks.len(), "located cards");

        Ok(build_mapping(&self.registry, word.normalized(), &blocks))
    }

    /// Look up `word` and pick an answer.
    ///
    /// The full mapping is always built first, so a `Chosen` result already
    /// lists its alternates and callers never need a second round trip.
    pub async fn assemble(
        &self,
        word: &str,
        preference: Option<&str>,
        exhaustive: bool,
    ) -> Result<SelectionResult, LookupError> {
        let word = self.processor.prepare(word)?;
        let mapping = self.collect(&word).await?;
        let result = select(&self.registry, mapping, preference, exhaustive);

        tracing::info!(
            word = word.normalized(),
            preference,
            exhaustive,
            chosen = result.chosen_source(),
            available = result.available_sources().len(),
            "lookup finished"
        );

        Ok(result)
    }
}

/// Run each recognized card through its source's extractor.
///
/// Unknown labels, duplicate cards and cards whose markup no longer matches
/// are left out; they never fail the lookup as a whole.
pub fn build_mapping(
    registry: &SourceRegistry,
    word: &str,
    blocks: &[ContentBlock],
) -> ResultMapping {
    let mut mapping = ResultMapping::new();
    let mut seen = HashSet::new();

    for block in blocks {
        let Some(source) = registry.resolve_label(&block.label) else {
            tracing::debug!(label = %block.label, "skipping unsupported source");
            continue;
        };

        // first card per source decides, even when it fails to extract
        if !seen.insert(source.name) {
            tracing::debug!(source = source.name, "skipping duplicate card");
            continue;
        }

        match source.extractor.extract(word, block) {
            Ok(lines) if lines.is_empty() => {
                tracing::debug!(source = source.name, "card had no usable lines");
            }
            Ok(lines) => {
                mapping.insert(
                    source.name.to_string(),
                    Answer {
                        label: source.label.to_string(),
                        lines,
                    },
                );
            }
            Err(e) => {
                tracing::warn!(source = source.name, "extraction failed: {e}");
            }
        }
    }

    mapping
}

/// Selection policy over an already built mapping
pub fn select(
    registry: &SourceRegistry,
    mut mapping: ResultMapping,
    preference: Option<&str>,
    exhaustive: bool,
) -> SelectionResult {
    if mapping.is_empty() {
        return SelectionResult::NotFound;
    }

    if exhaustive {
        return SelectionResult::All { mapping };
    }

    let preferred = preference
        .and_then(|p| registry.resolve_preference(p))
        .map(|source| source.name)
        .filter(|name| mapping.contains_key(*name));

    if preference.is_some() && preferred.is_none() {
        tracing::debug!(preference, "preferred source unavailable, using priority order");
    }

    // Labels outside the registry never reach the mapping, so the fallback
    // only misses if a caller built the mapping by hand
    let Some(name) = preferred.or_else(|| registry.first_available(&mapping).map(|s| s.name))
    else {
        return SelectionResult::NotFound;
    };

    let Some(answer) = mapping.shift_remove(name) else {
        return SelectionResult::NotFound;
    };

    SelectionResult::Chosen {
        source: name.to_string(),
        answer,
        alternates: mapping.into_keys().collect(),
    }
}
