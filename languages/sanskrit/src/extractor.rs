use std::sync::LazyLock;

use kosha_core::dictionary::SourceExtractor;
use kosha_core::error::LookupError;
use kosha_core::types::ContentBlock;
use scraper::{Html, Selector};

use crate::markup::{bullet, element_text, fragment_text, split_on_breaks};

/// Line cap for break-separated cards
pub const MAX_BREAK_LINES: usize = 6;

/// Character budget for multi-paragraph cards
pub const ANSWER_BUDGET: usize = 4000;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static CARD_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("p.card-text"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Markup shape of one dictionary's card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// One line per cell of the first row of the first table
    TableRow,
    /// `p.card-text` paragraphs split on `<br>`
    BreakSeparated { max_lines: usize },
    /// One line per paragraph until the character budget runs out
    Paragraphs { budget: usize },
    /// The query word followed by the card's first paragraph
    HeadwordAndGloss,
}

impl SourceExtractor for ExtractionRule {
    fn extract(&self, word: &str, block: &ContentBlock) -> Result<Vec<String>, LookupError> {
        let fragment = Html::parse_fragment(&block.html);

        let lines = match *self {
            ExtractionRule::TableRow => table_row(&fragment),
            ExtractionRule::BreakSeparated { max_lines } => break_separated(&fragment, max_lines),
            ExtractionRule::Paragraphs { budget } => paragraphs(&fragment, budget),
            ExtractionRule::HeadwordAndGloss => headword_and_gloss(&fragment, word),
        };

        lines.map_err(|expected| LookupError::extraction(&block.label, expected))
    }
}

fn table_row(fragment: &Html) -> Result<Vec<String>, &'static str> {
    let table = fragment.select(&TABLE).next().ok_or("table")?;
    let row = table.select(&ROW).next().ok_or("table row")?;

    Ok(row
        .select(&CELL)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .map(|text| bullet(&text))
        .collect())
}

/// Every numbered sub-section is read, in order, before the line cap applies
fn break_separated(fragment: &Html, max_lines: usize) -> Result<Vec<String>, &'static str> {
    let paragraphs: Vec<_> = fragment.select(&CARD_TEXT).collect();
    if paragraphs.is_empty() {
        return Err("card text paragraph");
    }

    Ok(paragraphs
        .iter()
        .flat_map(|paragraph| {
            split_on_breaks(&paragraph.inner_html())
                .into_iter()
                .map(fragment_text)
                .collect::<Vec<_>>()
        })
        .filter(|text| !text.is_empty())
        .map(|text| bullet(&text))
        .take(max_lines)
        .collect())
}

/// Stops at the first line that would overflow `budget`, so the result is
/// always a prefix of the full paragraph list.
///
/// A first paragraph that alone exceeds `budget` is cut to fit instead of
/// leaving the dictionary without an answer.
fn paragraphs(fragment: &Html, budget: usize) -> Result<Vec<String>, &'static str> {
    let mut found = false;
    let mut used = 0;
    let mut lines = Vec::new();

    for paragraph in fragment.select(&PARAGRAPH) {
        found = true;

        let text = element_text(paragraph);
        if text.is_empty() {
            continue;
        }

        let line = bullet(&text);
        let len = line.chars().count();
        if used + len > budget {
            if lines.is_empty() {
                tracing::debug!(len, budget, "cutting oversized first paragraph");
                lines.push(line.chars().take(budget).collect());
            } else {
                tracing::debug!(used, budget, "answer budget reached");
            }
            break;
        }

        used += len;
        lines.push(line);
    }

    if !found {
        return Err("paragraph");
    }

    Ok(lines)
}

fn headword_and_gloss(fragment: &Html, word: &str) -> Result<Vec<String>, &'static str> {
    let gloss = fragment
        .select(&CARD_TEXT)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .ok_or("card text paragraph")?;

    Ok(vec![bullet(word), bullet(&gloss)])
}
