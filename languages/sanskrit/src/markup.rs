use scraper::{ElementRef, Html};

/// Bullet every answer line starts with
pub const BULLET: &str = "* ";

pub fn bullet(text: &str) -> String {
    format!("{BULLET}{text}")
}

/// Visible text of an element, entities decoded and whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Visible text of a markup fragment
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    element_text(fragment.root_element())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split serialized markup on `<br>` tags (any spelling: `<br>`, `<br/>`, `<br class="x">`)
pub fn split_on_breaks(html: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = html;

    while let Some(start) = find_break(rest) {
        segments.push(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = "";
                break;
            }
        }
    }
    segments.push(rest);

    segments
}

fn find_break(html: &str) -> Option<usize> {
    html.match_indices("<br").map(|(i, _)| i).find(|&i| {
        matches!(
            html[i + 3..].chars().next(),
            Some('>' | '/' | ' ' | '\t' | '\n' | '\r')
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_text_strips_tags_and_entities() {
        assert_eq!(
            fragment_text("<b>kṛti</b> &amp; <i>act</i>,\n  deed&nbsp;"),
            "kṛti & act, deed"
        );
    }

    #[test]
    fn test_split_on_breaks_handles_variants() {
        let segments = split_on_breaks("one<br>two<br/>three<br class=\"x\">four");
        assert_eq!(segments, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_split_ignores_other_b_tags() {
        assert_eq!(split_on_breaks("<b>bold</b><bdi>x</bdi>"), vec!["<b>bold</b><bdi>x</bdi>"]);
    }

    #[test]
    fn test_bullet_prefix() {
        assert_eq!(bullet("deed"), "* deed");
    }
}
