use kosha_core::{Answer, LookupError, SelectionResult, SourceRegistry};

pub const NOT_FOUND: &str = "कोई बेहतर अर्थ नहीं पाया।";
pub const SEARCH_FAILED: &str = "खोज पूरी नहीं हो सकी, कृपया थोड़ी देर बाद पुनः प्रयास करें।";
pub const MISSING_WORD: &str = "कृपया, मुझे कोई शब्द प्रदान करें।";
pub const UNKNOWN_COMMAND: &str = "माफ़ कीजिये ! आपकी मांग मुझे समझ नहीं आई।";

/// Answer lines followed by the dictionary they came from
pub fn render_answer(answer: &Answer) -> String {
    format!("{}\n\n📖 {}", answer.lines.join("\n"), answer.label)
}

pub fn render_selection(result: &SelectionResult) -> String {
    match result {
        SelectionResult::Chosen { answer, .. } => render_answer(answer),
        SelectionResult::All { mapping } => mapping
            .values()
            .map(render_answer)
            .collect::<Vec<_>>()
            .join("\n\n"),
        SelectionResult::NotFound => NOT_FOUND.to_string(),
    }
}

pub fn render_error(error: &LookupError) -> &'static str {
    if error.is_user_input() {
        MISSING_WORD
    } else {
        SEARCH_FAILED
    }
}

/// One pickable result of an inline query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

pub fn inline_items(result: &SelectionResult) -> Vec<InlineItem> {
    match result {
        SelectionResult::All { mapping } => mapping
            .iter()
            .map(|(source, answer)| InlineItem {
                id: source.clone(),
                title: source.clone(),
                description: answer.preview(),
                content: render_answer(answer),
            })
            .collect(),
        SelectionResult::Chosen { source, answer, .. } => vec![InlineItem {
            id: source.clone(),
            title: source.clone(),
            description: answer.preview(),
            content: render_answer(answer),
        }],
        SelectionResult::NotFound => vec![InlineItem {
            id: "none".to_string(),
            title: NOT_FOUND.to_string(),
            description: String::new(),
            content: NOT_FOUND.to_string(),
        }],
    }
}

pub fn render_inline(items: &[InlineItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if item.description.is_empty() {
                format!("{}. {}", i + 1, item.title)
            } else {
                format!("{}. {}: {}", i + 1, item.title, item.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_sources(registry: &SourceRegistry) -> String {
    let mut message = String::from("शब्दकोशों की सूचि:\n");
    for (count, source) in registry.listed().enumerate() {
        if let Some(code) = source.code {
            message.push_str(&format!("\n{}. {} - {}", count + 1, code, source.name));
        }
    }
    message
}

pub fn help_text() -> String {
    [
        "नमस्कार 🙏",
        "संस्कृत शब्द का मतलब जानने के लिए केवल अपना शब्द लिखें या \"/arth <शब्द>\" का उपयोग करें।",
        "",
        "शब्दकोष को उपलब्धि और उपयोगिता के आधार पर चुना जाता है। अपने पसंदीदा शब्दकोष से अर्थ जानने के लिए \"/<कोड> <शब्द>\" लिखें।",
        "उदाहरण : \"/sh कृति\"",
        "सभी शब्दकोशों की सूचि के लिए /kosha का प्रयोग करें।",
        "",
        "सभी शब्दकोशों के अर्थ एक साथ देखने के लिए \"@ <शब्द>\" लिखें।",
        "सहायता संदेश को पढ़ने के लिए /help का इस्तेमाल करें।",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(label: &str, lines: &[&str]) -> Answer {
        Answer {
            label: label.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_answer_appends_label() {
        let rendered = render_answer(&answer("Hindi Dictionary", &["* कृति", "* रचना"]));
        assert_eq!(rendered, "* कृति\n* रचना\n\n📖 Hindi Dictionary");
    }

    #[test]
    fn test_not_found_and_failure_messages_differ() {
        assert_eq!(render_selection(&SelectionResult::NotFound), NOT_FOUND);
        assert_eq!(render_error(&LookupError::EmptyInput), MISSING_WORD);
        assert_eq!(
            render_error(&LookupError::extraction("page payload", "valid JSON")),
            SEARCH_FAILED
        );
        assert_ne!(NOT_FOUND, SEARCH_FAILED);
    }

    #[test]
    fn test_inline_items_preview_second_and_third_lines() {
        let mapping = [(
            "Hindi".to_string(),
            answer("Hindi Dictionary", &["* कृति", "* रचना", "* कार्य", "* extra"]),
        )]
        .into_iter()
        .collect();

        let items = inline_items(&SelectionResult::All { mapping });

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "Hindi");
        assert_eq!(items[0].description, "* रचना * कार्य");
        assert!(items[0].content.ends_with("📖 Hindi Dictionary"));
    }

    #[test]
    fn test_inline_not_found_is_single_item() {
        let items = inline_items(&SelectionResult::NotFound);
        assert_eq!(items[0].id, "none");
        assert_eq!(render_inline(&items), format!("1. {NOT_FOUND}"));
    }
}
