#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod ingest;
pub mod model;
pub mod span;
pub mod tokenize;

pub use error::{Error, Result};
pub use ingest::{
    create_annotated_text, Document, EntityFinder, EntityMap, EntityProcessor,
    ExtractedEntities, ProcessorConfig,
};
pub use model::{GazetteerModel, ModelRegistry, NameModel, RegistryConfig, SpanFinder};
pub use span::{drop_overlapping, Span};
pub use tokenize::{tokenize, tokenize_pos, TokenOffset};
