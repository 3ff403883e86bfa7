//! Ollama translation provider (default).

use crate::clean::clean_response;
use crate::error::{Result, TranslateError};
use crate::providers::Translator;
use async_trait::async_trait;
use milon_core::config::TranslatorConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub struct OllamaTranslator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslateError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn prompt(term: &str) -> String {
        format!(
            "You are an expert translator. You will get an English word and \
             must respond with its Hebrew translation, and only the \
             translation.\n\
             # example:\n\
             input: teacher\n\
             output: מורה\n\n\
             Translate this: {}",
            term
        )
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let body = json!({
            "model": self.model,
            "prompt": Self::prompt(trimmed),
            "stream": false,
        });

        let url = format!("{}/api/generate", self.base_url);
        debug!("Translating '{}' via ollama model {}", trimmed, self.model);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: String = text.chars().take(200).collect();
            return Err(TranslateError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(format!("Not JSON: {}", e)))?;

        let answer = payload
            .get("response")
            .and_then(|r| r.as_str())
            .ok_or_else(|| {
                TranslateError::InvalidResponse("Missing response field".to_string())
            })?;

        clean_response(answer).ok_or(TranslateError::EmptyTranslation)
    }
}
