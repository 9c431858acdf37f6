use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use annotext_core::{Document, EntityFinder, EntityProcessor, ProcessorConfig};

use super::load_registry;

pub struct ProcessParams {
    pub field: String,
    pub target_field: String,
    pub annotated_text_field: Option<String>,
    pub models: Vec<String>,
    pub lines: bool,
    pub pretty: bool,
    pub input: Option<PathBuf>,
}

pub fn run(config: Option<&Path>, params: ProcessParams) -> Result<()> {
    let registry = load_registry(config)?;

    let mut processor_config = ProcessorConfig::new(params.field)
        .with_target_field(params.target_field)
        .with_models(params.models);
    if let Some(field) = params.annotated_text_field {
        processor_config = processor_config.with_annotated_text_field(field);
    }

    let processor = EntityProcessor::new(EntityFinder::new(Arc::new(registry)), processor_config)?;
    tracing::debug!(models = ?processor.models(), "Processor ready");

    let reader: Box<dyn Read> = match &params.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    if params.lines {
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let document = process_one(&processor, &line)
                .with_context(|| format!("document on line {}", idx + 1))?;
            serde_json::to_writer(&mut out, &document)?;
            writeln!(out)?;
        }
    } else {
        let mut raw = String::new();
        BufReader::new(reader).read_to_string(&mut raw)?;
        let document = process_one(&processor, &raw)?;
        if params.pretty {
            serde_json::to_writer_pretty(&mut out, &document)?;
        } else {
            serde_json::to_writer(&mut out, &document)?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

fn process_one(processor: &EntityProcessor, raw: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(raw).context("invalid JSON document")?;
    let document = processor.process(Document::from_value(value)?)?;
    Ok(document)
}
