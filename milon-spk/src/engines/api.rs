//! OpenAI-style API TTS engine.

use crate::accent::VoiceAccent;
use crate::engines::SpeechEngine;
use crate::error::{Result, SpeechError};
use async_trait::async_trait;
use bytes::Bytes;
use milon_core::config::SpeechConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub struct ApiTtsEngine {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ApiTtsEngine {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| SpeechError::Config("API engine needs an endpoint".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var("OPENAI_API_KEY")
            .map_err(|_| SpeechError::Engine("API key not provided".to_string()))
    }
}

#[async_trait]
impl SpeechEngine for ApiTtsEngine {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn synthesize(&self, text: &str, accent: VoiceAccent) -> Result<Bytes> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SpeechError::EmptyInput);
        }
        let api_key = self.api_key()?;

        let body = json!({
            "model": "tts-1",
            "input": trimmed,
            "voice": "alloy",
            "response_format": "mp3",
        });

        let url = format!("{}/v1/audio/speech", self.endpoint);
        debug!("Synthesizing '{}' via API engine ({})", trimmed, accent);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: String = text.chars().take(200).collect();
            return Err(SpeechError::Engine(format!("HTTP {}: {}", status, body)));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::Engine("API returned no audio".to_string()));
        }
        Ok(audio)
    }
}
