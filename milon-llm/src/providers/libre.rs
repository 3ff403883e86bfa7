//! LibreTranslate provider.

use crate::clean::clean_response;
use crate::error::{Result, TranslateError};
use crate::providers::Translator;
use async_trait::async_trait;
use milon_core::config::TranslatorConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub struct LibreTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslateError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let mut body = json!({
            "q": trimmed,
            "source": "en",
            "target": "he",
            "format": "text",
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }

        debug!("Translating '{}' via libretranslate", trimmed);
        let response = self
            .client
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await?;

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
            .get("translatedText")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                TranslateError::InvalidResponse("Missing translatedText field".to_string())
            })?;

        clean_response(answer).ok_or(TranslateError::EmptyTranslation)
    }
}
