//! Configuration for the import workflow.
//!
//! One config surface for the whole tool: file paths, image pipeline sizes,
//! and the provider endpoints. Sections are plain data so adapter crates can
//! consume them without depending on each other.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level importer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub paths: PathsConfig,
    pub image: ImageConfig,
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
}

/// Where the store, assets, and source feed live. All paths are relative to
/// the operator's working directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Persisted word collection (`{"words": [...]}`).
    pub words_file: PathBuf,

    /// Destination directory for `{id}.png` assets.
    pub images_dir: PathBuf,

    /// Destination directory for `{id}.mp3` assets.
    pub audio_dir: PathBuf,

    /// Source row feed. Missing file means manual entry only.
    pub import_feed: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            words_file: PathBuf::from("data/words.json"),
            images_dir: PathBuf::from("assets/images"),
            audio_dir: PathBuf::from("assets/audio"),
            import_feed: PathBuf::from("data/import.csv"),
        }
    }
}

/// Image search and normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Search endpoint URL.
    pub endpoint: String,

    /// Search API key; can also come from `PIXABAY_API_KEY`.
    pub api_key: Option<String>,

    /// Candidates requested per search.
    pub result_count: usize,

    /// Edge length of the committed square asset, in pixels.
    pub canonical_size: u32,

    /// Edge length of candidate previews, in pixels.
    pub preview_size: u32,

    /// Timeout for search requests, in seconds.
    pub search_timeout_secs: u64,

    /// Timeout for fetching image bytes, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://pixabay.com/api/".to_string(),
            api_key: None,
            result_count: 9,
            canonical_size: 512,
            preview_size: 300,
            search_timeout_secs: 15,
            fetch_timeout_secs: 30,
        }
    }
}

/// Translation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Provider name: "ollama" or "libretranslate".
    pub provider: String,

    /// Provider base URL.
    pub endpoint: String,

    /// Model name (Ollama only).
    pub model: String,

    /// API key if the provider needs one.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Engine name: "gtrans" or "api".
    pub engine: String,

    /// Voice accent label, one of the fixed set ("us", "uk", "au", "ca").
    pub accent: String,

    /// Endpoint override for API engines.
    pub endpoint: Option<String>,

    /// API key; can also come from `OPENAI_API_KEY` for the API engine.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: "gtrans".to_string(),
            accent: "us".to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            image: ImageConfig::default(),
            translator: TranslatorConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl PathsConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (label, path) in [
            ("words_file", &self.words_file),
            ("images_dir", &self.images_dir),
            ("audio_dir", &self.audio_dir),
            ("import_feed", &self.import_feed),
        ] {
            if path.as_os_str().is_empty() {
                return Err(format!("{} path cannot be empty", label));
            }
        }
        Ok(())
    }
}

impl ImageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("Image search endpoint cannot be empty".to_string());
        }
        if self.result_count == 0 || self.result_count > 200 {
            return Err("Image result count must be between 1 and 200".to_string());
        }
        if self.canonical_size == 0 || self.canonical_size > 4096 {
            return Err("Canonical image size must be between 1 and 4096".to_string());
        }
        if self.preview_size == 0 || self.preview_size > self.canonical_size {
            return Err("Preview size must be between 1 and the canonical size".to_string());
        }
        if self.search_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            return Err("Image timeouts must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl TranslatorConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.provider.as_str() {
            "ollama" | "libretranslate" => {}
            other => return Err(format!("Unknown translation provider: '{}'", other)),
        }
        if self.endpoint.is_empty() {
            return Err("Translator endpoint cannot be empty".to_string());
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err("Translator timeout must be between 1 and 300 seconds".to_string());
        }
        Ok(())
    }
}

impl SpeechConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.engine.as_str() {
            "gtrans" | "api" => {}
            other => return Err(format!("Unknown speech engine: '{}'", other)),
        }
        if self.accent.is_empty() {
            return Err("Voice accent cannot be empty".to_string());
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err("Speech timeout must be between 1 and 300 seconds".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if endpoint.is_empty() {
                return Err("Speech endpoint cannot be empty if provided".to_string());
            }
        }
        Ok(())
    }
}

impl ImporterConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), String> {
        self.paths.validate()?;
        self.image.validate()?;
        self.translator.validate()?;
        self.speech.validate()?;
        Ok(())
    }

    /// Load configuration from a file, accepting JSON or TOML.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration content: JSON first, TOML as fallback.
    pub fn from_str(content: &str) -> crate::Result<Self> {
        if let Ok(config) = serde_json::from_str::<ImporterConfig>(content) {
            return Ok(config);
        }
        if let Ok(config) = toml::from_str::<ImporterConfig>(content) {
            return Ok(config);
        }
        Err(crate::Error::Configuration(
            "Config is neither valid JSON nor valid TOML".to_string(),
        ))
    }

    /// Build configuration from environment variables, starting from
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("MILON_WORDS_FILE") {
            config.paths.words_file = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("MILON_IMAGES_DIR") {
            config.paths.images_dir = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("MILON_AUDIO_DIR") {
            config.paths.audio_dir = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("MILON_IMPORT_FEED") {
            config.paths.import_feed = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("PIXABAY_API_KEY") {
            config.image.api_key = Some(key);
        }
        if let Ok(size) = std::env::var("MILON_IMAGE_SIZE") {
            if let Ok(px) = size.parse::<u32>() {
                config.image.canonical_size = px;
            }
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.translator.endpoint = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            config.translator.model = model;
        }
        if let Ok(accent) = std::env::var("MILON_VOICE_ACCENT") {
            config.speech.accent = accent;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ImporterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_image_size_bounds() {
        let mut config = ImporterConfig::default();
        config.image.canonical_size = 0;
        assert!(config.validate().is_err());

        config.image.canonical_size = 256;
        config.image.preview_size = 512;
        assert!(config.validate().is_err());

        config.image.preview_size = 128;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = ImporterConfig::default();
        config.translator.provider = "babelfish".to_string();
        assert!(config.validate().is_err());

        let mut config = ImporterConfig::default();
        config.speech.engine = "festival".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[paths]
words_file = "w.json"

[image]
canonical_size = 256
preview_size = 100
"#;
        let config = ImporterConfig::from_str(content).unwrap();
        assert_eq!(config.paths.words_file, PathBuf::from("w.json"));
        assert_eq!(config.image.canonical_size, 256);
        // Untouched sections keep defaults.
        assert_eq!(config.translator.provider, "ollama");
    }

    #[test]
    fn test_parse_json() {
        let content = r#"{"speech": {"accent": "uk"}}"#;
        let config = ImporterConfig::from_str(content).unwrap();
        assert_eq!(config.speech.accent, "uk");
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(ImporterConfig::from_str("not: [valid").is_err());
    }
}
