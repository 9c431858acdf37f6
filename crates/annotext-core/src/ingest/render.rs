use std::borrow::Cow;

use super::finder::ExtractedEntities;
use crate::span::{drop_overlapping, Span};
use crate::tokenize::{tokenize_pos, TokenOffset};

/// Rebuild `text` with each surviving entity span replaced by
/// `[surface](Type_surface)`.
///
/// Spans from every result are pooled and overlaps dropped. Tokens come
/// from the first result; all results must stem from `text`. Spacing
/// between output units follows the original text: a space is written
/// only where the source had a gap between two tokens.
#[must_use]
pub fn create_annotated_text<'a>(text: &'a str, extracted: &[ExtractedEntities]) -> Cow<'a, str> {
    let Some(first) = extracted.first() else {
        return Cow::Borrowed(text);
    };

    let pooled: Vec<Span> = extracted
        .iter()
        .flat_map(|e| e.spans().iter().filter(|s| !s.is_empty()).cloned())
        .collect();
    let spans = drop_overlapping(&pooled);

    if spans.is_empty() {
        return Cow::Borrowed(text);
    }

    let offsets = tokenize_pos(text);
    let tokens = first.tokens();

    let mut builder = String::with_capacity(text.len() * 2);
    let mut kept = spans.iter().peekable();
    let mut i = 0;

    while i < tokens.len() {
        // Kept spans are ordered by start and never overlap, so the next
        // one never starts before `i`.
        let last = match kept.next_if(|s| s.start == i) {
            Some(span) => {
                let surface = span.surface(tokens);
                builder.push('[');
                builder.push_str(&surface);
                builder.push_str("](");
                builder.push_str(&capitalize(&span.entity_type));
                builder.push('_');
                builder.push_str(&surface);
                builder.push(')');
                span.end - 1
            }
            None => {
                builder.push_str(&tokens[i]);
                i
            }
        };

        if last + 1 < tokens.len() && has_gap(&offsets, last) {
            builder.push(' ');
        }

        i = last + 1;
    }

    Cow::Owned(builder)
}

fn has_gap(offsets: &[TokenOffset], idx: usize) -> bool {
    match (offsets.get(idx), offsets.get(idx + 1)) {
        (Some(current), Some(next)) => current.end != next.start,
        _ => false,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn extracted(text: &str, spans: Vec<Span>) -> ExtractedEntities {
        ExtractedEntities::new(tokenize(text), spans)
    }

    #[test]
    fn test_annotates_person_and_location() {
        let text = "John Smith lives in Berlin.";
        let all = vec![
            extracted(text, vec![Span::new(0, 2, "person")]),
            extracted(text, vec![Span::new(4, 5, "location")]),
        ];

        assert_eq!(
            create_annotated_text(text, &all),
            "[John Smith](Person_John Smith) lives in [Berlin](Location_Berlin)."
        );
    }

    #[test]
    fn test_no_spans_returns_original_text() {
        let text = "nothing  to\tsee here ,really";
        let all = vec![extracted(text, Vec::new())];

        let rendered = create_annotated_text(text, &all);
        assert!(matches!(rendered, Cow::Borrowed(_)));
        assert_eq!(rendered, text);
    }

    #[test]
    fn test_no_results_returns_original_text() {
        assert_eq!(create_annotated_text("Berlin", &[]), "Berlin");
    }

    #[test]
    fn test_overlap_keeps_longer_span() {
        let text = "The Bank of Berlin opened.";
        let all = vec![
            extracted(text, vec![Span::new(3, 4, "location")]),
            extracted(text, vec![Span::new(1, 4, "organization")]),
        ];

        let rendered = create_annotated_text(text, &all);
        assert_eq!(
            rendered,
            "The [Bank of Berlin](Organization_Bank of Berlin) opened."
        );
        assert!(!rendered.contains("Location"));
    }

    #[test]
    fn test_overlap_tie_keeps_first_pooled() {
        let text = "Paris Hilton";
        let all = vec![
            extracted(text, vec![Span::new(0, 1, "location")]),
            extracted(text, vec![Span::new(0, 1, "person")]),
        ];

        assert_eq!(
            create_annotated_text(text, &all),
            "[Paris](Location_Paris) Hilton"
        );
    }

    #[test]
    fn test_spacing_follows_source_offsets() {
        let text = "(Berlin)-based";
        let all = vec![extracted(text, vec![Span::new(1, 2, "location")])];

        assert_eq!(
            create_annotated_text(text, &all),
            "([Berlin](Location_Berlin))-based"
        );
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        let text = "met   Jane \n today";
        let all = vec![extracted(text, vec![Span::new(1, 2, "person")])];

        assert_eq!(
            create_annotated_text(text, &all),
            "met [Jane](Person_Jane) today"
        );
    }

    #[test]
    fn test_span_at_end_has_no_trailing_space() {
        let text = "ask Jane Doe";
        let all = vec![extracted(text, vec![Span::new(1, 3, "person")])];

        assert_eq!(
            create_annotated_text(text, &all),
            "ask [Jane Doe](Person_Jane Doe)"
        );
    }

    #[test]
    fn test_zero_length_spans_are_ignored() {
        let text = "ask Jane Doe";
        let empty = Span {
            start: 1,
            end: 1,
            entity_type: "person".into(),
        };
        let all = vec![
            extracted(text, vec![empty.clone()]),
            extracted(text, vec![empty, Span::new(2, 3, "person")]),
        ];

        assert_eq!(create_annotated_text(text, &all), "ask Jane [Doe](Person_Doe)");
        assert_eq!(create_annotated_text(text, &all[..1]), text);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("person"), "Person");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("iOS"), "IOS");
        assert_eq!(capitalize(""), "");
    }
}
