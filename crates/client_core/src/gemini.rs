use std::fmt;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ModelId,
    protocol::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse},
};
use tracing::debug;
use url::Url;

use crate::config::Settings;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The outbound generation capability: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: ModelId,
    endpoint: Url,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Fails with [`shared::error::LookupError::ConfigurationMissing`] when no
    /// API key is configured.
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let model = settings.model_id();
        let endpoint = generate_endpoint(&settings.api_base_url, &model)?;
        Ok(Self {
            http: Client::new(),
            api_key,
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }
}

fn generate_endpoint(api_base_url: &str, model: &ModelId) -> Result<Url> {
    let mut endpoint = Url::parse(api_base_url)
        .with_context(|| format!("invalid generation api base url '{api_base_url}'"))?;
    let model = model.as_str();
    let model = model.strip_prefix("models/").unwrap_or(model);
    let action = format!("{model}:generateContent");
    endpoint
        .path_segments_mut()
        .map_err(|()| anyhow!("generation api base url '{api_base_url}' cannot carry a path"))?
        .pop_if_empty()
        .extend(["v1beta", "models", action.as_str()]);
    Ok(endpoint)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "requesting completion");
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .context("failed to reach generation service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => {
                    let error = parsed.error;
                    debug!(
                        code = ?error.code,
                        status = ?error.status,
                        "generation service error body"
                    );
                    match error.status {
                        Some(api_status) => format!("{} [{api_status}]", error.message),
                        None => error.message,
                    }
                }
                Err(_) => body,
            };
            bail!("generation service returned {status}: {detail}");
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("malformed generation service response")?;

        body.text().ok_or_else(|| {
            let block_reason = body
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
                .unwrap_or("none");
            anyhow!("generation service returned no text (block reason: {block_reason})")
        })
    }
}

#[cfg(test)]
#[path = "tests/gemini_tests.rs"]
mod tests;
