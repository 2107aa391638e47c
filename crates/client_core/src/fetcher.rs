use anyhow::Result;
use async_trait::async_trait;
use shared::error::LookupError;
use tracing::{error, info};

use crate::{gemini::TextGenerator, prompt::build_prompt};

/// Turns a term into its definition text.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn fetch(&self, term: &str) -> Result<String>;
}

pub struct DefinitionFetcher<G> {
    generator: G,
}

impl<G: TextGenerator> DefinitionFetcher<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[async_trait]
impl<G: TextGenerator> DefinitionSource for DefinitionFetcher<G> {
    async fn fetch(&self, term: &str) -> Result<String> {
        if term.trim().is_empty() {
            return Err(LookupError::EmptyInput.into());
        }

        let prompt = build_prompt(term);
        match self.generator.generate(&prompt).await {
            Ok(text) => {
                info!(term, chars = text.chars().count(), "definition generated");
                Ok(text)
            }
            Err(err) => {
                // The cause stays in the log; callers only see the safe message.
                error!(term, error = ?err, "generation call failed");
                Err(LookupError::GenerationFailure.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
