use std::path::Path;

use anyhow::Result;

use super::load_registry;

pub fn run(config: Option<&Path>) -> Result<()> {
    let registry = load_registry(config)?;

    if registry.is_empty() {
        eprintln!("No models loaded");
        return Ok(());
    }

    for name in registry.known_model_names() {
        println!("{name}");
    }

    Ok(())
}
