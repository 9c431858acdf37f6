mod config;
mod document;
mod finder;
mod processor;
mod render;

pub use config::{ProcessorConfig, DEFAULT_TARGET_FIELD};
pub use document::Document;
pub use finder::{EntityFinder, ExtractedEntities};
pub use processor::{
    entities_to_value, merge, merge_all, read_entities, EntityMap, EntityProcessor,
};
pub use render::create_annotated_text;
