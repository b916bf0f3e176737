use kosha_fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("No word provided")]
    EmptyInput,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Markup for one dictionary (or the page itself) no longer has the expected shape
    #[error("Unexpected markup for {dictionary}: missing {expected}")]
    Extraction {
        dictionary: String,
        expected: &'static str,
    },
}

impl LookupError {
    pub fn extraction(dictionary: impl Into<String>, expected: &'static str) -> Self {
        LookupError::Extraction {
            dictionary: dictionary.into(),
            expected,
        }
    }

    /// Caller supplied nothing to look up
    pub fn is_user_input(&self) -> bool {
        matches!(self, LookupError::EmptyInput)
    }

    /// Failures that a later attempt might not hit
    pub fn is_retriable(&self) -> bool {
        matches!(self, LookupError::Fetch(_) | LookupError::Extraction { .. })
    }

    /// HTTP status upstream answered with, if it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            LookupError::Fetch(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_only_for_http_failures() {
        let http = LookupError::from(FetchError::Http {
            status: 503,
            url: "http://kosha.test/word/x".to_string(),
        });
        assert_eq!(http.upstream_status(), Some(503));
        assert!(http.is_retriable());

        assert_eq!(LookupError::EmptyInput.upstream_status(), None);
        assert!(!LookupError::EmptyInput.is_retriable());
        assert_eq!(
            LookupError::extraction("Apte", "paragraph").upstream_status(),
            None
        );
    }
}
