use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{NameModel, SpanFinder};
use crate::error::Result;
use crate::span::Span;
use crate::tokenize::tokenize;

/// On-disk form of a gazetteer model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GazetteerSource {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub entries: Vec<String>,
    /// Regexes matched against single tokens. Anchored on load.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Dictionary model matching known names as exact token sequences, with
/// optional single-token patterns as a fallback.
#[derive(Debug)]
pub struct GazetteerModel {
    entity_type: String,
    /// Entry token sequences keyed by their first token, longest first.
    entries: HashMap<String, Vec<Vec<String>>>,
    patterns: Vec<Regex>,
}

impl GazetteerModel {
    pub fn from_source(source: GazetteerSource) -> Result<Self> {
        let mut entries: HashMap<String, Vec<Vec<String>>> = HashMap::new();
        for entry in &source.entries {
            let tokens = tokenize(entry);
            if let Some(first) = tokens.first() {
                entries.entry(first.clone()).or_default().push(tokens);
            }
        }
        for candidates in entries.values_mut() {
            candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            candidates.dedup();
        }

        let patterns = source
            .patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{p})$")))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            entity_type: source.entity_type,
            entries,
            patterns,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let source: GazetteerSource = serde_json::from_str(&raw)?;
        Self::from_source(source)
    }

    /// Length of the longest match starting at `pos`, if any.
    fn match_at(&self, tokens: &[String], pos: usize) -> Option<usize> {
        let rest = &tokens[pos..];

        let entry_match = self.entries.get(&rest[0]).and_then(|candidates| {
            candidates
                .iter()
                .find(|candidate| rest.starts_with(candidate.as_slice()))
                .map(Vec::len)
        });

        entry_match.or_else(|| {
            self.patterns
                .iter()
                .any(|p| p.is_match(&rest[0]))
                .then_some(1)
        })
    }
}

impl NameModel for GazetteerModel {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn finder(&self) -> Box<dyn SpanFinder + '_> {
        Box::new(GazetteerFinder::new(self))
    }
}

pub struct GazetteerFinder<'m> {
    model: &'m GazetteerModel,
}

impl<'m> GazetteerFinder<'m> {
    #[must_use]
    pub const fn new(model: &'m GazetteerModel) -> Self {
        Self { model }
    }
}

impl SpanFinder for GazetteerFinder<'_> {
    fn find(&mut self, tokens: &[String]) -> Vec<Span> {
        let mut found = Vec::new();

        let mut pos = 0;
        while pos < tokens.len() {
            match self.model.match_at(tokens, pos) {
                Some(len) => {
                    found.push(Span::new(pos, pos + len, self.model.entity_type.clone()));
                    pos += len;
                }
                None => pos += 1,
            }
        }

        found
    }
}
