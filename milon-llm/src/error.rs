//! Error types for milon-llm

use milon_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Nothing to translate: input is empty")]
    EmptyInput,

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    #[error("Translation empty after cleanup")]
    EmptyTranslation,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

impl From<TranslateError> for CoreError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::EmptyInput => CoreError::Input("Nothing to translate".to_string()),
            other => CoreError::Provider(format!("Translation failed: {}", other)),
        }
    }
}
