pub mod libre;
pub mod ollama;

use crate::error::{Result, TranslateError};
use async_trait::async_trait;
use milon_core::config::TranslatorConfig;

pub use libre::LibreTranslator;
pub use ollama::OllamaTranslator;

/// Narrow capability interface for translation.
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Translate English text to Hebrew. Empty input, network failure, a
    /// malformed payload, and an answer that is empty after cleanup are all
    /// errors; the caller decides whether to re-offer the action.
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Build the configured translation provider.
pub fn build_translator(config: &TranslatorConfig) -> Result<Box<dyn Translator>> {
    match config.provider.as_str() {
        "ollama" => Ok(Box::new(OllamaTranslator::new(config)?)),
        "libretranslate" => Ok(Box::new(LibreTranslator::new(config)?)),
        other => Err(TranslateError::Config(format!(
            "Unknown translation provider: '{}'",
            other
        ))),
    }
}
