use std::fmt;
use std::sync::Arc;

use crate::error::LookupError;
use crate::types::{ContentBlock, ResultMapping};

/// Turns one dictionary's card into plain-text lines
pub trait SourceExtractor: Send + Sync {
    /// Lines in source order, none of them blank
    fn extract(&self, word: &str, block: &ContentBlock) -> Result<Vec<String>, LookupError>;
}

/// Catalog entry for one upstream dictionary
#[derive(Clone)]
pub struct SourceDescriptor {
    /// Canonical name, also the heading upstream prints on its card
    pub name: &'static str,
    /// Human readable label shown under an answer
    pub label: &'static str,
    /// Short code for explicit selection. `None` hides the source from listings
    pub code: Option<&'static str>,
    /// Identifiers used by the JSON payload
    pub aliases: &'static [&'static str],
    pub extractor: Arc<dyn SourceExtractor>,
}

impl SourceDescriptor {
    fn answers_to(&self, label: &str) -> bool {
        self.name.eq_ignore_ascii_case(label)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(label))
    }
}

impl fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("code", &self.code)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// Fixed catalog of sources. Declaration order is priority order.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceDescriptor>) -> Self {
        Self { sources }
    }

    /// All sources in priority order
    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    /// Sources selectable by code, in priority order
    pub fn listed(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter().filter(|source| source.code.is_some())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn resolve_by_code(&self, code: &str) -> Option<&SourceDescriptor> {
        let code = code.trim();
        self.sources
            .iter()
            .find(|source| source.code.is_some_and(|c| c.eq_ignore_ascii_case(code)))
    }

    pub fn resolve_by_name(&self, name: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|source| source.name == name)
    }

    /// Match a card heading or payload key against names and aliases
    pub fn resolve_label(&self, label: &str) -> Option<&SourceDescriptor> {
        let label = label.trim();
        self.resolve_by_name(label)
            .or_else(|| self.sources.iter().find(|source| source.answers_to(label)))
    }

    /// Caller preference may be a canonical name or a short code
    pub fn resolve_preference(&self, preference: &str) -> Option<&SourceDescriptor> {
        self.resolve_by_name(preference.trim())
            .or_else(|| self.resolve_by_code(preference))
    }

    /// Highest priority source that has an answer in `mapping`
    pub fn first_available(&self, mapping: &ResultMapping) -> Option<&SourceDescriptor> {
        self.sources
            .iter()
            .find(|source| mapping.contains_key(source.name))
    }
}
