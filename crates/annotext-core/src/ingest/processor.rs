use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use super::config::ProcessorConfig;
use super::document::{kind, Document};
use super::finder::{EntityFinder, ExtractedEntities};
use super::render::create_annotated_text;
use crate::error::{Error, Result};

/// Model name to distinct entity strings.
pub type EntityMap = BTreeMap<String, BTreeSet<String>>;

/// Union `values` into the entry for `key`. Empty results leave the map untouched.
pub fn merge(map: &mut EntityMap, key: &str, values: BTreeSet<String>) {
    if values.is_empty() {
        return;
    }

    match map.get_mut(key) {
        Some(existing) => existing.extend(values),
        None => {
            map.insert(key.to_string(), values);
        }
    }
}

/// Union every entry of `other` into `map`.
pub fn merge_all(map: &mut EntityMap, other: EntityMap) {
    for (key, values) in other {
        merge(map, &key, values);
    }
}

/// Ingest processor that runs models over a text field, merges the found
/// entities into a target field and optionally writes an annotated copy of
/// the text.
#[derive(Debug, Clone)]
pub struct EntityProcessor {
    finder: EntityFinder,
    tag: Option<String>,
    source_field: String,
    target_field: String,
    annotated_text_field: Option<String>,
    models: BTreeSet<String>,
}

impl EntityProcessor {
    pub const TYPE: &'static str = "annotext";

    /// Build a processor. An omitted or empty model list selects every
    /// configured model, so a model that failed to load surfaces as
    /// [`Error::UnknownModel`] on first use.
    pub fn new(finder: EntityFinder, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;

        let models: BTreeSet<String> = match config.fields {
            Some(fields) if !fields.is_empty() => fields.into_iter().collect(),
            _ => finder.registry().configured_model_names(),
        };

        Ok(Self {
            finder,
            tag: config.tag,
            source_field: config.field,
            target_field: config.target_field,
            annotated_text_field: config.annotated_text_field.filter(|f| !f.is_empty()),
            models,
        })
    }

    #[must_use]
    pub fn models(&self) -> &BTreeSet<String> {
        &self.models
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Process one document in place.
    ///
    /// A missing, null or empty source field leaves the document untouched.
    pub fn execute(&self, document: &mut Document) -> Result<()> {
        let content = match document.get_str(&self.source_field)? {
            Some(content) if !content.is_empty() => content.to_string(),
            _ => return Ok(()),
        };

        let mut entities = match read_entities(document, &self.target_field)? {
            Some(existing) => existing,
            None => {
                document.set_field(&self.target_field, Value::Object(Map::new()))?;
                EntityMap::new()
            }
        };

        let mut extracted: Vec<ExtractedEntities> = Vec::with_capacity(self.models.len());
        for model in &self.models {
            let data = self.finder.find(&content, model)?;
            merge(&mut entities, model, data.entity_values());
            extracted.push(data);
        }

        document.set_field(&self.target_field, entities_to_value(entities))?;

        if let Some(field) = &self.annotated_text_field {
            if !extracted.is_empty() {
                let annotated = create_annotated_text(&content, &extracted);
                document.set_field(field, annotated.into_owned())?;
            }
        }

        tracing::debug!(
            tag = self.tag.as_deref().unwrap_or_default(),
            models = extracted.len(),
            "Processed document"
        );

        Ok(())
    }

    /// Owned convenience over [`execute`](Self::execute).
    pub fn process(&self, mut document: Document) -> Result<Document> {
        self.execute(&mut document)?;
        Ok(document)
    }
}

/// Read an existing entity mapping from `field`, if present.
pub fn read_entities(document: &Document, field: &str) -> Result<Option<EntityMap>> {
    let Some(value) = document.get_field(field) else {
        return Ok(None);
    };

    let Value::Object(map) = value else {
        return Err(Error::field_access(
            field,
            format!("must be an object, found {}", kind(value)),
        ));
    };

    let mut entities = EntityMap::new();
    for (key, values) in map {
        let Value::Array(values) = values else {
            return Err(Error::field_access(
                field,
                format!("entry [{key}] must be an array, found {}", kind(values)),
            ));
        };

        let mut set = BTreeSet::new();
        for v in values {
            match v {
                Value::String(s) => {
                    set.insert(s.clone());
                }
                other => {
                    return Err(Error::field_access(
                        field,
                        format!("entry [{key}] must hold strings, found {}", kind(other)),
                    ))
                }
            }
        }
        entities.insert(key.clone(), set);
    }

    Ok(Some(entities))
}

/// Sets become sorted lists so the mapping serializes as plain JSON arrays.
#[must_use]
pub fn entities_to_value(entities: EntityMap) -> Value {
    Value::Object(
        entities
            .into_iter()
            .map(|(key, values)| {
                (
                    key,
                    Value::Array(values.into_iter().map(Value::String).collect()),
                )
            })
            .collect(),
    )
}
