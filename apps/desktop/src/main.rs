use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, load_settings_from},
    DefinitionSource,
};
use shared::{
    domain::SearchTerm,
    error::{failure_message, LookupError},
};
use tracing_subscriber::EnvFilter;

/// Looks up a financial term and prints the generated explanation.
#[derive(Parser, Debug)]
struct Args {
    /// Path to a glossary.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured model identifier.
    #[arg(long)]
    model: Option<String>,
    /// The term to look up; several words are joined with spaces.
    #[arg(required = true)]
    term: Vec<String>,
}

impl Args {
    fn search_term(&self) -> Result<SearchTerm, LookupError> {
        SearchTerm::parse(&self.term.join(" ")).ok_or(LookupError::EmptyInput)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    match run(args).await {
        Ok(definition) => {
            print!("{definition}");
            if !definition.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.chain().any(|cause| cause.is::<LookupError>()) {
                tracing::debug!(error = ?err, "lookup failed");
            } else {
                tracing::error!("lookup failed: {err:#}");
            }
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String> {
    let term = args.search_term()?;

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |name| std::env::var(name).ok())?,
        None => load_settings(),
    };
    if let Some(model) = args.model {
        settings.model = model;
    }

    let fetcher =
        client_core::connect(&settings).context("failed to initialize generation client")?;
    fetcher.fetch(term.as_str()).await
}
