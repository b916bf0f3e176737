use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query preprocessor
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC)
        text = text.nfkc().collect();

        // Queries are single words or short phrases, keep one space between parts
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
