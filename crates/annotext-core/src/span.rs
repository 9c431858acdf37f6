use serde::{Deserialize, Serialize};

/// Half-open range `[start, end)` over token indices, tagged with an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize, entity_type: impl Into<String>) -> Self {
        debug_assert!(start < end, "span must cover at least one token");
        Self {
            start,
            end,
            entity_type: entity_type.into(),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Space-joined tokens covered by this span.
    ///
    /// Callers pass the token sequence the span was found in.
    #[must_use]
    pub fn surface(&self, tokens: &[String]) -> String {
        tokens[self.start..self.end].join(" ")
    }
}

/// Resolve overlaps in a pooled span list.
///
/// Longer spans are considered first, earlier starts break length ties and
/// pool order breaks the remaining ties. A span survives only if it does not
/// overlap a span that already survived. The result is ordered by start.
#[must_use]
pub fn drop_overlapping(spans: &[Span]) -> Vec<Span> {
    let mut candidates: Vec<&Span> = spans.iter().collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

    let mut kept: Vec<Span> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|k| !k.overlaps(candidate)) {
            kept.push(candidate.clone());
        }
    }

    kept.sort_by_key(|s| s.start);
    kept
}
