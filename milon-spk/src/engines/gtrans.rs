//! Google Translate TTS engine (default).
//!
//! The unauthenticated endpoint behind the common gTTS tooling. The accent
//! picks the regional host variant, which is what actually changes the
//! pronunciation.

use crate::accent::VoiceAccent;
use crate::engines::SpeechEngine;
use crate::error::{Result, SpeechError};
use async_trait::async_trait;
use bytes::Bytes;
use milon_core::config::SpeechConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct GtransEngine {
    client: Client,
    /// Host override for tests; `None` means the accent-derived host.
    endpoint: Option<String>,
}

impl GtransEngine {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    fn endpoint_for(&self, accent: VoiceAccent) -> Result<Url> {
        let base = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://translate.google.{}/translate_tts", accent.tld()),
        };
        Url::parse(&base).map_err(|e| SpeechError::Config(format!("Bad TTS endpoint: {}", e)))
    }
}

#[async_trait]
impl SpeechEngine for GtransEngine {
    fn name(&self) -> &'static str {
        "gtrans"
    }

    async fn synthesize(&self, text: &str, accent: VoiceAccent) -> Result<Bytes> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SpeechError::EmptyInput);
        }

        let mut url = self.endpoint_for(accent)?;
        let textlen = trimmed.chars().count().to_string();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", trimmed)
            .append_pair("tl", accent.language())
            .append_pair("client", "tw-ob")
            .append_pair("total", "1")
            .append_pair("idx", "0")
            .append_pair("textlen", &textlen);

        debug!("Synthesizing '{}' with {} accent", trimmed, accent);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Engine(format!(
                "TTS endpoint returned HTTP {}",
                status
            )));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::Engine("TTS endpoint returned no audio".to_string()));
        }
        Ok(audio)
    }
}
