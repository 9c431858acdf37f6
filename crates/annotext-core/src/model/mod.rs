mod gazetteer;
mod registry;

pub use gazetteer::{GazetteerFinder, GazetteerModel, GazetteerSource};
pub use registry::{load_model, ModelRegistry, RegistryConfig, SETTINGS_PREFIX};

use crate::span::Span;

/// A loaded, immutable name-finding model.
///
/// Handles are shared across threads. Finding is done through a
/// [`SpanFinder`] built for each call, never through the handle itself.
pub trait NameModel: Send + Sync {
    /// Entity type label attached to spans this model produces.
    fn entity_type(&self) -> &str;

    fn finder(&self) -> Box<dyn SpanFinder + '_>;
}

/// Per-call span finder. Holds mutable state, so it cannot be shared.
pub trait SpanFinder {
    /// Locate non-overlapping entity spans over `tokens`.
    fn find(&mut self, tokens: &[String]) -> Vec<Span>;
}
