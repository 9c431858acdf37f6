use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ModelRegistry;
use crate::span::Span;
use crate::tokenize::tokenize;

/// Result of running one model over one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    tokens: Vec<String>,
    spans: Vec<Span>,
}

impl ExtractedEntities {
    /// Every span must lie within `tokens`.
    #[must_use]
    pub fn new(tokens: Vec<String>, spans: Vec<Span>) -> Self {
        debug_assert!(spans.iter().all(|s| s.start <= s.end && s.end <= tokens.len()));
        Self { tokens, spans }
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Distinct surface strings of the spans.
    #[must_use]
    pub fn entity_values(&self) -> BTreeSet<String> {
        self.spans.iter().map(|s| s.surface(&self.tokens)).collect()
    }
}

/// Runs a named model from the registry over a text.
#[derive(Debug, Clone)]
pub struct EntityFinder {
    registry: Arc<ModelRegistry>,
}

impl EntityFinder {
    #[must_use]
    pub const fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    #[must_use]
    pub fn known_model_names(&self) -> BTreeSet<String> {
        self.registry.known_model_names()
    }

    pub fn find(&self, text: &str, model_name: &str) -> Result<ExtractedEntities> {
        let model = self.registry.get(model_name)?;

        let tokens = tokenize(text);
        // The finder is scoped to this call and dropped on return.
        let mut spans = model.finder().find(&tokens);
        spans.retain(|s| !s.is_empty() && s.end <= tokens.len());

        tracing::debug!(
            model = model_name,
            tokens = tokens.len(),
            spans = spans.len(),
            "Found entities"
        );

        Ok(ExtractedEntities::new(tokens, spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GazetteerModel, GazetteerSource, NameModel, SpanFinder};
    use crate::Error;

    /// Emits a zero-length span, an out-of-range span and one valid span.
    struct Sloppy;

    impl NameModel for Sloppy {
        fn entity_type(&self) -> &str {
            "person"
        }

        fn finder(&self) -> Box<dyn SpanFinder + '_> {
            Box::new(Sloppy)
        }
    }

    impl SpanFinder for Sloppy {
        fn find(&mut self, tokens: &[String]) -> Vec<Span> {
            vec![
                Span {
                    start: 0,
                    end: 0,
                    entity_type: "person".into(),
                },
                Span::new(0, tokens.len() + 1, "person"),
                Span::new(0, 1, "person"),
            ]
        }
    }

    fn finder() -> EntityFinder {
        let person = GazetteerModel::from_source(GazetteerSource {
            entity_type: "person".into(),
            entries: vec!["John Smith".into(), "Jane".into()],
            patterns: Vec::new(),
        })
        .unwrap();

        EntityFinder::new(Arc::new(
            ModelRegistry::new().with_model("person", Arc::new(person)),
        ))
    }

    #[test]
    fn test_find_returns_tokens_and_spans() {
        let result = finder().find("John Smith met Jane.", "person").unwrap();

        assert_eq!(result.tokens(), ["John", "Smith", "met", "Jane", "."]);
        assert_eq!(
            result.spans(),
            [Span::new(0, 2, "person"), Span::new(3, 4, "person")]
        );
    }

    #[test]
    fn test_entity_values_are_distinct() {
        let result = finder().find("Jane, Jane and Jane", "person").unwrap();

        assert_eq!(result.spans().len(), 3);
        assert_eq!(result.entity_values(), BTreeSet::from(["Jane".to_string()]));
    }

    #[test]
    fn test_unknown_model() {
        let err = finder().find("John Smith", "drug").unwrap_err();

        assert!(matches!(err, Error::UnknownModel { ref name, .. } if name == "drug"));
        assert!(err.to_string().contains("[person]"));
    }

    #[test]
    fn test_degenerate_spans_are_dropped() {
        let finder = EntityFinder::new(Arc::new(
            ModelRegistry::new().with_model("person", Arc::new(Sloppy)),
        ));

        let result = finder.find("Jane left", "person").unwrap();

        assert_eq!(result.spans(), [Span::new(0, 1, "person")]);
        assert_eq!(result.entity_values(), BTreeSet::from(["Jane".to_string()]));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let result = finder().find("", "person").unwrap();

        assert!(result.tokens().is_empty());
        assert!(result.entity_values().is_empty());
    }
}
