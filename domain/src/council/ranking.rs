//! Ranking text parsing.
//!
//! Extracts the ordered list of anonymized labels from a model's free-form
//! ranking text. Producers are asked to end with a `FINAL RANKING:` section
//! of numbered lines, but models do not always comply, so a whole-text scan
//! is kept as a fallback.

/// Marker introducing the structured ranking section.
const FINAL_RANKING_MARKER: &str = "FINAL RANKING:";

/// Anonymized labels are `Response <letter>` with a single uppercase letter.
const LABEL_PREFIX: &str = "Response ";

/// Extract the ordered anonymized labels ("Response A") from ranking text.
///
/// Numbered lines under a `FINAL RANKING:` heading are preferred, one label
/// per line. When the heading is missing (or yields nothing) the whole text
/// is scanned for label mentions in order of appearance. Matching is
/// case-sensitive; duplicates keep their first position; no labels means an
/// empty list.
pub fn parse_ranking_from_text(text: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();

    if let Some(idx) = text.find(FINAL_RANKING_MARKER) {
        let section = &text[idx + FINAL_RANKING_MARKER.len()..];
        for line in section.lines() {
            let line = line.trim();
            if !is_numbered_item(line) {
                continue;
            }
            if let Some(label) = scan_labels(line).into_iter().next() {
                push_unique(&mut labels, label);
            }
        }
    }

    if labels.is_empty() {
        for label in scan_labels(text) {
            push_unique(&mut labels, label);
        }
    }

    labels
}

/// `1. Response A`, `2.Response B`, ...: digits followed by a dot.
fn is_numbered_item(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with('.')
}

/// Find every single-letter `Response <letter>` token, in order of appearance.
fn scan_labels(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(LABEL_PREFIX) {
        let letter_idx = start + pos + LABEL_PREFIX.len();
        match bytes.get(letter_idx) {
            Some(c) if c.is_ascii_uppercase() => {
                // Single-letter label: the next char must not extend the word.
                let bounded = bytes
                    .get(letter_idx + 1)
                    .is_none_or(|next| !next.is_ascii_alphanumeric());
                if bounded {
                    found.push(format!("{}{}", LABEL_PREFIX, *c as char));
                }
                start = letter_idx + 1;
            }
            _ => start = letter_idx,
        }
    }

    found
}

fn push_unique(labels: &mut Vec<String>, label: String) {
    if !labels.contains(&label) {
        labels.push(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_final_ranking_section() {
        let text = "Some preamble text.\n\nFINAL RANKING:\n1. Response B\n2. Response A\n3. Response C\n";
        assert_eq!(
            parse_ranking_from_text(text),
            vec!["Response B", "Response A", "Response C"]
        );
    }

    #[test]
    fn parses_without_spaces_after_numbers() {
        let text = "FINAL RANKING:\n1.Response A\n2.Response B";
        let result = parse_ranking_from_text(text);
        assert_eq!(result, vec!["Response A", "Response B"]);
    }

    #[test]
    fn parses_lines_with_trailing_commentary() {
        let text = "FINAL RANKING:\n1. Response C is best\n2. Response A comes next\n3. Response B is last";
        assert_eq!(
            parse_ranking_from_text(text),
            vec!["Response C", "Response A", "Response B"]
        );
    }

    #[test]
    fn falls_back_to_inline_mentions() {
        let text = "Response A is good. Response B is better.";
        assert_eq!(
            parse_ranking_from_text(text),
            vec!["Response A", "Response B"]
        );
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_ranking_from_text("").is_empty());
    }

    #[test]
    fn numbered_lines_without_labels_yield_nothing() {
        let text = "FINAL RANKING:\n1. First place\n2. Second place";
        assert!(parse_ranking_from_text(text).is_empty());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let text = "Response A Response A FINAL RANKING:\n1. Response A";
        assert_eq!(parse_ranking_from_text(text), vec!["Response A"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let text = "FINAL RANKING:\n1. response A\n2. Response B";
        assert_eq!(parse_ranking_from_text(text), vec!["Response B"]);
    }

    #[test]
    fn label_must_be_a_single_letter() {
        let text = "FINAL RANKING:\n1. Response ABC\n2. Response B";
        assert_eq!(parse_ranking_from_text(text), vec!["Response B"]);
    }
}
