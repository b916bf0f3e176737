use crate::error::LookupError;
use crate::types::Word;

/// Query canonicalization for one language's upstream index
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "sa", "hi", etc.)
    fn language_code(&self) -> &str;

    /// Rewrite text into the form upstream keys its entries by
    fn normalize(&self, text: &str) -> String;

    /// Validate and normalize a raw query, producing its transport form
    fn prepare(&self, text: &str) -> Result<Word, LookupError> {
        if text.trim().is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let normalized = self.normalize(text);
        if normalized.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        Ok(Word::new(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lowercase;

    impl LanguageProcessor for Lowercase {
        fn language_code(&self) -> &str {
            "en"
        }

        fn normalize(&self, text: &str) -> String {
            text.trim().to_lowercase()
        }
    }

    #[test]
    fn test_prepare_rejects_blank() {
        assert!(matches!(Lowercase.prepare(""), Err(LookupError::EmptyInput)));
        assert!(matches!(Lowercase.prepare(" \t\n"), Err(LookupError::EmptyInput)));
    }

    #[test]
    fn test_prepare_encodes_normalized_word() {
        let word = Lowercase.prepare(" Yoga Sutra ").unwrap();
        assert_eq!(word.normalized(), "yoga sutra");
        assert_eq!(word.encoded(), "yoga%20sutra");
    }
}
