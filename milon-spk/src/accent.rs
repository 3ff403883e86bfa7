//! Voice accents.
//!
//! A fixed set: each accent maps to a language code plus the regional
//! endpoint variant that produces that pronunciation.

use crate::error::SpeechError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoiceAccent {
    #[default]
    UsEnglish,
    UkEnglish,
    AustralianEnglish,
    CanadianEnglish,
}

impl VoiceAccent {
    pub const ALL: [VoiceAccent; 4] = [
        VoiceAccent::UsEnglish,
        VoiceAccent::UkEnglish,
        VoiceAccent::AustralianEnglish,
        VoiceAccent::CanadianEnglish,
    ];

    /// ISO 639-1 language code.
    pub fn language(&self) -> &'static str {
        "en"
    }

    /// Regional top-level-domain variant of the synthesis endpoint.
    pub fn tld(&self) -> &'static str {
        match self {
            VoiceAccent::UsEnglish => "com",
            VoiceAccent::UkEnglish => "co.uk",
            VoiceAccent::AustralianEnglish => "com.au",
            VoiceAccent::CanadianEnglish => "ca",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceAccent::UsEnglish => "US English",
            VoiceAccent::UkEnglish => "UK English",
            VoiceAccent::AustralianEnglish => "Australian English",
            VoiceAccent::CanadianEnglish => "Canadian English",
        }
    }

    /// Parse a config/CLI accent value.
    pub fn parse(value: &str) -> std::result::Result<Self, SpeechError> {
        match value.trim().to_lowercase().as_str() {
            "us" | "us english" => Ok(VoiceAccent::UsEnglish),
            "uk" | "uk english" => Ok(VoiceAccent::UkEnglish),
            "au" | "australian english" => Ok(VoiceAccent::AustralianEnglish),
            "ca" | "canadian english" => Ok(VoiceAccent::CanadianEnglish),
            other => Err(SpeechError::Config(format!(
                "Unknown voice accent: '{}' (expected us, uk, au, or ca)",
                other
            ))),
        }
    }
}

impl fmt::Display for VoiceAccent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
