use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A JSON document addressed by dotted field paths (`a.b.c`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    source: Map<String, Value>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_map(source: Map<String, Value>) -> Self {
        Self { source }
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(source) => Ok(Self { source }),
            other => Err(Error::field_access(
                "_source",
                format!("must be an object, found {}", kind(&other)),
            )),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.source)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.source
    }

    #[must_use]
    pub fn has_field(&self, path: &str) -> bool {
        self.get_field(path).is_some()
    }

    /// Value at `path`, or `None` if any segment is missing or not an object.
    #[must_use]
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.source.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// String value at `path`. Absent and null fields are `None`; any other
    /// non-string value is an error.
    pub fn get_str(&self, path: &str) -> Result<Option<&str>> {
        match self.get_field(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(Error::field_access(
                path,
                format!("must be a string, found {}", kind(other)),
            )),
        }
    }

    /// Set `path` to `value`, creating intermediate objects as needed.
    pub fn set_field(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };
        if leaf.is_empty() {
            return Err(Error::field_access(path, "is not a valid field path"));
        }

        let mut current = &mut self.source;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                let slot = current
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                current = match slot {
                    Value::Object(map) => map,
                    other => {
                        return Err(Error::field_access(
                            path,
                            format!("cannot be set, [{segment}] is {}", kind(other)),
                        ))
                    }
                };
            }
        }

        current.insert(leaf.to_string(), value.into());
        Ok(())
    }
}

impl From<Map<String, Value>> for Document {
    fn from(source: Map<String, Value>) -> Self {
        Self::from_map(source)
    }
}

pub(crate) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
