//! Error types for milon-img

use milon_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Decode error: the bytes are not a recognizable image")]
    Decode(#[source] image::ImageError),

    #[error("Encode error: {0}")]
    Encode(image::ImageError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ImagingError> for CoreError {
    fn from(err: ImagingError) -> Self {
        match err {
            ImagingError::Decode(e) => CoreError::Decode(format!("Image decode failed: {}", e)),
            ImagingError::Io(e) => CoreError::Persistence(format!("Image write failed: {}", e)),
            other => CoreError::Provider(format!("Image error: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_maps_to_core_decode() {
        let err = ImagingError::Decode(image::ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::GenericFeature("test".to_string()),
            ),
        ));
        match CoreError::from(err) {
            CoreError::Decode(msg) => assert!(msg.contains("decode")),
            _ => panic!("Expected Decode error"),
        }
    }

    #[test]
    fn test_search_maps_to_core_provider() {
        let err = ImagingError::Search("boom".to_string());
        match CoreError::from(err) {
            CoreError::Provider(msg) => assert!(msg.contains("boom")),
            _ => panic!("Expected Provider error"),
        }
    }
}
