use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub const DEFAULT_TARGET_FIELD: &str = "entities";

fn default_target_field() -> String {
    DEFAULT_TARGET_FIELD.to_string()
}

/// Options accepted by the entity processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Field holding the text to analyze.
    pub field: String,
    /// Field receiving the model name to entity list mapping.
    #[serde(default = "default_target_field")]
    pub target_field: String,
    /// Field receiving the annotated rendering of the text, if wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_text_field: Option<String>,
    /// Models to run. Omitted or empty means every loaded model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProcessorConfig {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target_field: default_target_field(),
            annotated_text_field: None,
            fields: None,
            tag: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_target_field(mut self, target_field: impl Into<String>) -> Self {
        self.target_field = target_field.into();
        self
    }

    #[must_use]
    pub fn with_annotated_text_field(mut self, field: impl Into<String>) -> Self {
        self.annotated_text_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(models.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Parse processor options from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(Error::Config("[field] must not be empty".into()));
        }
        if self.target_field.is_empty() {
            return Err(Error::Config("[target_field] must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::from_value(json!({"field": "text"})).unwrap();

        assert_eq!(config, ProcessorConfig::new("text"));
        assert_eq!(config.target_field, "entities");
        assert!(config.annotated_text_field.is_none());
        assert!(config.fields.is_none());
    }

    #[test]
    fn test_all_options() {
        let config = ProcessorConfig::from_value(json!({
            "field": "body",
            "target_field": "ner",
            "annotated_text_field": "body_annotated",
            "fields": ["person", "location"],
            "tag": "ner-1",
        }))
        .unwrap();

        assert_eq!(
            config,
            ProcessorConfig::new("body")
                .with_target_field("ner")
                .with_annotated_text_field("body_annotated")
                .with_models(["person", "location"])
                .with_tag("ner-1")
        );
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let err = ProcessorConfig::from_value(json!({"target_field": "x"})).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("field")));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = ProcessorConfig::from_value(json!({"field": "text", "model": "person"}));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_wrong_option_type_is_rejected() {
        let result = ProcessorConfig::from_value(json!({"field": "text", "fields": "person"}));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let result = ProcessorConfig::from_value(json!({"field": ""}));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
