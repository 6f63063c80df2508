//! Ranking de-anonymization.
//!
//! Stage 2 rankings refer to council answers by anonymized labels
//! ("Response A") so models cannot favor their own authorship. Once the
//! `label_to_model` mapping arrives with `stage2_complete`, these pure
//! functions rewrite labels into recognizable model names for display.

use std::collections::HashMap;

/// Short display form of a model identifier: the part after the last
/// path-style separator, or the whole identifier if there is none.
///
/// E.g., "openai/gpt-4" -> "gpt-4".
pub fn short_model_name(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

/// Replace every occurrence of each known anonymized label in `text` with
/// the short name of the model it maps to.
///
/// Unknown labels are left untouched and an empty mapping is a no-op.
/// Longer labels are replaced first, so a label that contains another as a
/// prefix ("Response AB" vs "Response A") is never corrupted by a shorter
/// match.
pub fn deanonymize_text(text: &str, label_to_model: &HashMap<String, String>) -> String {
    if label_to_model.is_empty() {
        return text.to_string();
    }

    // Longest label first; ties broken lexicographically so the result does
    // not depend on map iteration order.
    let mut entries: Vec<(&str, &str)> = label_to_model
        .iter()
        .map(|(label, model)| (label.as_str(), model.as_str()))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut result = text.to_string();
    for (label, model) in entries {
        result = result.replace(label, short_model_name(model));
    }
    result
}

/// De-anonymize an ordered label list (a parsed ranking) into short model
/// names. Labels without a mapping are kept as-is.
pub fn deanonymize_labels(
    labels: &[String],
    label_to_model: &HashMap<String, String>,
) -> Vec<String> {
    labels
        .iter()
        .map(|label| {
            label_to_model
                .get(label)
                .map(|model| short_model_name(model).to_string())
                .unwrap_or_else(|| label.clone())
        })
        .collect()
}

/// Format an average rank with exactly two fractional digits.
pub fn format_average_rank(average_rank: f64) -> String {
    format!("{:.2}", average_rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(label, model)| (label.to_string(), model.to_string()))
            .collect()
    }

    #[test]
    fn replaces_label_with_short_model_name() {
        let map = mapping(&[("Response A", "openai/gpt-4")]);
        let result = deanonymize_text("Response A is best", &map);
        assert_eq!(result, "gpt-4 is best");
        assert!(!result.contains("Response A"));
    }

    #[test]
    fn replaces_every_occurrence() {
        let map = mapping(&[("Response A", "openai/gpt-4")]);
        let result = deanonymize_text("Response A beats Response A", &map);
        assert_eq!(result, "gpt-4 beats gpt-4");
    }

    #[test]
    fn longer_labels_replaced_first() {
        let map = mapping(&[
            ("Response A", "openai/gpt-4"),
            ("Response AB", "google/gemini-pro"),
        ]);
        let result = deanonymize_text("Response AB then Response A", &map);
        assert_eq!(result, "gemini-pro then gpt-4");
    }

    #[test]
    fn empty_mapping_is_noop() {
        let result = deanonymize_text("Response A is best", &HashMap::new());
        assert_eq!(result, "Response A is best");
    }

    #[test]
    fn unknown_labels_untouched() {
        let map = mapping(&[("Response A", "openai/gpt-4")]);
        let result = deanonymize_text("Response A over Response Z", &map);
        assert_eq!(result, "gpt-4 over Response Z");
    }

    #[test]
    fn labels_list_mapped_to_short_names() {
        let map = mapping(&[
            ("Response A", "openai/gpt-4"),
            ("Response B", "anthropic/claude-sonnet"),
        ]);
        let labels = vec![
            "Response B".to_string(),
            "Response A".to_string(),
            "Response C".to_string(),
        ];
        assert_eq!(
            deanonymize_labels(&labels, &map),
            vec!["claude-sonnet", "gpt-4", "Response C"]
        );
    }

    #[test]
    fn short_name_without_separator_is_identity() {
        assert_eq!(short_model_name("gpt-4"), "gpt-4");
        assert_eq!(short_model_name("openai/gpt-4"), "gpt-4");
        assert_eq!(short_model_name("a/b/c"), "c");
    }

    #[test]
    fn average_rank_uses_two_fractional_digits() {
        assert_eq!(format_average_rank(1.567), "1.57");
        assert_eq!(format_average_rank(1.5), "1.50");
        assert_eq!(format_average_rank(2.0), "2.00");
    }
}
