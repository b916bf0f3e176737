use kosha_core::language::LanguageProcessor;
use kosha_core::preprocess::{DefaultPreprocessor, Preprocessor};

const ANUSVARA: char = '\u{0902}';
const VIRAMA: char = '\u{094D}';

/// Query normalizer for the Sanskrit/Hindi aggregator
pub struct SanskritProcessor;

impl SanskritProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SanskritProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProcessor for SanskritProcessor {
    fn language_code(&self) -> &str {
        "sa"
    }

    fn normalize(&self, text: &str) -> String {
        let word = DefaultPreprocessor.process(text).to_lowercase();

        if is_devanagari(&word) {
            fix_lazy_anusvara(&word)
        } else {
            word
        }
    }
}

/// Whether the first letter of `text` is from the Devanagari block
pub fn is_devanagari(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Nasal consonant of the stop group `next` belongs to
fn pancham_varna(next: char) -> Option<char> {
    match next {
        'क' | 'ख' | 'ग' | 'घ' => Some('ङ'),
        'च' | 'छ' | 'ज' | 'झ' => Some('ञ'),
        'ट' | 'ठ' | 'ड' | 'ढ' => Some('ण'),
        'त' | 'थ' | 'द' | 'ध' | 'न' => Some('न'),
        'प' | 'फ' | 'ब' | 'भ' => Some('म'),
        _ => None,
    }
}

/// Rewrite an anusvara before a stop as that stop's nasal with virama.
///
/// Upstream keys its index by the written nasal (शङ्कर, not शंकर). Anusvara
/// before semivowels, sibilants and ह is kept, and so is a word-initial सं.
pub fn fix_lazy_anusvara(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == ANUSVARA && !is_sam_prefix(&chars, i) {
            if let Some(nasal) = chars.get(i + 1).copied().and_then(pancham_varna) {
                out.push(nasal);
                out.push(VIRAMA);
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// `i` is the anusvara of a सं that starts a word
fn is_sam_prefix(chars: &[char], i: usize) -> bool {
    if i == 0 || chars[i - 1] != 'स' {
        return false;
    }

    i == 1 || !chars[i - 2].is_alphabetic()
}
