//! Client side of the glossary: settings, prompt construction, the Gemini
//! generation client and the definition fetcher built on top of it.

use anyhow::Result;

pub mod config;
pub mod fetcher;
pub mod gemini;
pub mod prompt;

pub use config::{load_settings, Settings};
pub use fetcher::{DefinitionFetcher, DefinitionSource};
pub use gemini::{GeminiClient, TextGenerator};
pub use prompt::build_prompt;

/// Builds the production fetcher once at startup. Fails when the API key is
/// not configured so that no lookup can run against a broken client.
pub fn connect(settings: &Settings) -> Result<DefinitionFetcher<GeminiClient>> {
    let client = GeminiClient::new(settings)?;
    Ok(DefinitionFetcher::new(client))
}
