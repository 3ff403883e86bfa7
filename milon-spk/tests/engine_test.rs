//! Engine construction and empty-input contract tests.

use milon_core::config::SpeechConfig;
use milon_spk::{build_engine, SpeechError, VoiceAccent};

#[test]
fn test_build_default_engine() {
    let config = SpeechConfig::default();
    let engine = build_engine(&config).unwrap();
    assert_eq!(engine.name(), "gtrans");
}

#[test]
fn test_build_api_engine_requires_endpoint() {
    let mut config = SpeechConfig::default();
    config.engine = "api".to_string();
    assert!(matches!(build_engine(&config), Err(SpeechError::Config(_))));

    config.endpoint = Some("https://api.example.com".to_string());
    let engine = build_engine(&config).unwrap();
    assert_eq!(engine.name(), "api");
}

#[test]
fn test_build_unknown_engine_fails() {
    let mut config = SpeechConfig::default();
    config.engine = "espeak".to_string();
    assert!(build_engine(&config).is_err());
}

#[tokio::test]
async fn test_empty_input_rejected_before_any_network_call() {
    let engine = build_engine(&SpeechConfig::default()).unwrap();
    let err = engine
        .synthesize("   ", VoiceAccent::UsEnglish)
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechError::EmptyInput));
}

#[test]
fn test_accent_roundtrip_through_config_values() {
    for value in ["us", "uk", "au", "ca"] {
        assert!(VoiceAccent::parse(value).is_ok());
    }
}
