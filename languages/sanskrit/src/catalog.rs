use std::sync::{Arc, LazyLock};

use kosha_core::dictionary::{SourceDescriptor, SourceRegistry};

use crate::extractor::{ANSWER_BUDGET, ExtractionRule, MAX_BREAK_LINES};

static CATALOG: LazyLock<Arc<SourceRegistry>> = LazyLock::new(|| Arc::new(build()));

/// Dictionaries served by the aggregator, highest priority first
pub fn catalog() -> Arc<SourceRegistry> {
    Arc::clone(&CATALOG)
}

fn source(
    code: &'static str,
    name: &'static str,
    label: &'static str,
    aliases: &'static [&'static str],
    rule: ExtractionRule,
) -> SourceDescriptor {
    SourceDescriptor {
        name,
        label,
        code: Some(code),
        aliases,
        extractor: Arc::new(rule),
    }
}

fn build() -> SourceRegistry {
    let breaks = ExtractionRule::BreakSeparated {
        max_lines: MAX_BREAK_LINES,
    };
    let paragraphs = ExtractionRule::Paragraphs {
        budget: ANSWER_BUDGET,
    };

    SourceRegistry::new(vec![
        source(
            "sp",
            "Spoken Sanskrit",
            "Spoken Sanskrit",
            &["spoken_sanskrit", "spokensanskrit"],
            ExtractionRule::TableRow,
        ),
        source(
            "sh",
            "Shabda Sagara",
            "Shabda Sagara",
            &["shabda_sagara", "shabdasagara"],
            breaks,
        ),
        source(
            "mw",
            "Monier Williams Cologne",
            "Monier Williams Dictionary",
            &["monier_williams", "mw"],
            paragraphs,
        ),
        source(
            "hindi",
            "Hindi",
            "Hindi Dictionary",
            &["hindi", "hindi_dictionary"],
            ExtractionRule::HeadwordAndGloss,
        ),
        source("apte", "Apte", "Apte Dictionary", &["apte"], paragraphs),
        source("wilson", "Wilson", "Wilson Dictionary", &["wilson"], breaks),
        source("yates", "Yates", "Yates Dictionary", &["yates"], breaks),
    ])
}
