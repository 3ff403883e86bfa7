pub mod api;
pub mod gtrans;

use crate::accent::VoiceAccent;
use crate::error::{Result, SpeechError};
use async_trait::async_trait;
use bytes::Bytes;
use milon_core::config::SpeechConfig;

pub use api::ApiTtsEngine;
pub use gtrans::GtransEngine;

/// Narrow capability interface for speech synthesis.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Synthesize `text` with the given accent and return encoded audio
    /// bytes (MP3). Empty input after trimming and an unavailable engine are
    /// errors; no automatic retry.
    async fn synthesize(&self, text: &str, accent: VoiceAccent) -> Result<Bytes>;
}

/// Build the configured synthesis engine.
pub fn build_engine(config: &SpeechConfig) -> Result<Box<dyn SpeechEngine>> {
    match config.engine.as_str() {
        "gtrans" => Ok(Box::new(GtransEngine::new(config)?)),
        "api" => Ok(Box::new(ApiTtsEngine::new(config)?)),
        other => Err(SpeechError::Config(format!(
            "Unknown speech engine: '{}'",
            other
        ))),
    }
}
