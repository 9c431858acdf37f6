use anyhow::Result;
use clap::Parser;

use annotext::cli::process::ProcessParams;
use annotext::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Process {
            field,
            target_field,
            annotated_text_field,
            models,
            lines,
            pretty,
            input,
        } => annotext::cli::process::run(
            config,
            ProcessParams {
                field,
                target_field,
                annotated_text_field,
                models,
                lines,
                pretty,
                input,
            },
        ),
        Commands::Models => annotext::cli::models::run(config),
    }
}
