use indexmap::IndexMap;
use serde::Serialize;

/// Query word in upstream's canonical form plus its transport encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    normalized: String,
    encoded: String,
}

impl Word {
    pub fn new(normalized: impl Into<String>) -> Self {
        let normalized = normalized.into();
        let encoded = urlencoding::encode(&normalized).into_owned();
        Self {
            normalized,
            encoded,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Percent-encoded form for URLs
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

/// One dictionary card located on a results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Heading text or payload key naming the dictionary
    pub label: String,
    /// Markup of the card's body
    pub html: String,
}

impl ContentBlock {
    pub fn new(label: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            html: html.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Display label of the dictionary the lines came from
    pub label: String,
    pub lines: Vec<String>,
}

impl Answer {
    /// Second and third lines, used as a short preview
    pub fn preview(&self) -> String {
        self.lines
            .iter()
            .skip(1)
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Canonical source name to answer, in page order
pub type ResultMapping = IndexMap<String, Answer>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionResult {
    Chosen {
        source: String,
        answer: Answer,
        /// Other sources that answered, in page order
        alternates: Vec<String>,
    },
    All {
        mapping: ResultMapping,
    },
    NotFound,
}

impl SelectionResult {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SelectionResult::NotFound)
    }

    /// Sources that answered, in page order
    pub fn available_sources(&self) -> Vec<String> {
        match self {
            SelectionResult::Chosen {
                source, alternates, ..
            } => {
                let mut sources = vec![source.clone()];
                sources.extend(alternates.iter().cloned());
                sources
            }
            SelectionResult::All { mapping } => mapping.keys().cloned().collect(),
            SelectionResult::NotFound => Vec::new(),
        }
    }

    pub fn chosen_source(&self) -> Option<&str> {
        match self {
            SelectionResult::Chosen { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput { text: String },
    EndOfInput,
}
