//! Error types for milon-spk

use milon_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Nothing to synthesize: input is empty")]
    EmptyInput,

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpeechError>;

impl From<SpeechError> for CoreError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::EmptyInput => {
                CoreError::Input("Provide pronunciation text before generating audio".to_string())
            }
            other => CoreError::Provider(format!("Audio generation failed: {}", other)),
        }
    }
}
