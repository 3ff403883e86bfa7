//! End-to-end import runs against a temporary directory, with the network
//! adapters replaced by local fakes.

use async_trait::async_trait;
use bytes::Bytes;
use milon_core::config::ImporterConfig;
use milon_core::model::ImageCandidate;
use milon_engine::ImportEngine;
use milon_img::pipeline::fit_to_square;
use milon_img::{ImagePreparer, ImageSearchProvider, ImagingError};
use milon_llm::Translator;
use milon_spk::{SpeechEngine, VoiceAccent};
use std::path::Path;
use tempfile::TempDir;

struct DictTranslator;

#[async_trait]
impl Translator for DictTranslator {
    fn name(&self) -> &'static str {
        "dict"
    }

    async fn translate(&self, text: &str) -> milon_llm::error::Result<String> {
        match text.trim() {
            "dog" => Ok("כלב".to_string()),
            "cat" => Ok("חתול".to_string()),
            other => Ok(format!("he({})", other)),
        }
    }
}

struct CannedSearch;

#[async_trait]
impl ImageSearchProvider for CannedSearch {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, ImagingError> {
        Ok(vec![
            ImageCandidate {
                id: format!("{}-0", query),
                tags: query.to_string(),
                thumbnail_url: Some("https://img.test/a.thumb".to_string()),
                full_image_url: Some("https://img.test/a.full".to_string()),
                vector_url: None,
                preview_bytes: None,
            },
            ImageCandidate {
                id: format!("{}-1", query),
                tags: query.to_string(),
                thumbnail_url: None,
                full_image_url: Some("https://img.test/b.full".to_string()),
                vector_url: Some("https://img.test/b.svg".to_string()),
                preview_bytes: None,
            },
        ])
    }
}

/// Produces real PNG output from a generated source image, exercising the
/// same normalization path the network preparer uses.
struct LocalPreparer {
    canonical_size: u32,
}

#[async_trait]
impl ImagePreparer for LocalPreparer {
    async fn fetch_square_png(&self, _url: &str, size: u32) -> Result<Vec<u8>, ImagingError> {
        let source = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            40,
            30,
            image::Rgb([30, 90, 200]),
        ));
        fit_to_square(&source, size)
    }

    async fn save_prepared(&self, url: &str, dest: &Path) -> Result<(), ImagingError> {
        let bytes = self.fetch_square_png(url, self.canonical_size).await?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, bytes)?;
        Ok(())
    }
}

struct SilentSpeech;

#[async_trait]
impl SpeechEngine for SilentSpeech {
    fn name(&self) -> &'static str {
        "silent"
    }

    async fn synthesize(
        &self,
        _text: &str,
        _accent: VoiceAccent,
    ) -> milon_spk::error::Result<Bytes> {
        Ok(Bytes::from_static(b"ID3mp3"))
    }
}

fn test_config(dir: &TempDir) -> ImporterConfig {
    let mut config = ImporterConfig::default();
    config.paths.words_file = dir.path().join("words.json");
    config.paths.images_dir = dir.path().join("images");
    config.paths.audio_dir = dir.path().join("audio");
    config.paths.import_feed = dir.path().join("import.csv");
    config.image.canonical_size = 64;
    config.image.preview_size = 32;
    config
}

fn build_engine(config: ImporterConfig) -> ImportEngine {
    ImportEngine::with_providers(
        config,
        Box::new(DictTranslator),
        Box::new(CannedSearch),
        Box::new(LocalPreparer { canonical_size: 64 }),
        Box::new(SilentSpeech),
        VoiceAccent::UkEnglish,
    )
    .unwrap()
}

#[tokio::test]
async fn import_commit_skip_and_reload() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("import.csv"),
        "English,Hebrew,Pixabay_Search\ndog,,puppy vector\ncat,,\n",
    )
    .unwrap();

    let mut engine = build_engine(test_config(&dir));

    // Row 0: full auto-fill, then commit.
    let mut session = engine.open_next().unwrap();
    assert_eq!(session.english, "dog");
    let reports = engine.auto_fill(&mut session).await;
    assert!(reports.is_empty(), "unexpected warnings: {:?}", reports);
    assert_eq!(session.hebrew, "כלב");
    assert_eq!(session.candidates.len(), 2);
    assert!(session.candidates[0].preview_bytes.is_some());
    assert!(session.savable());

    let entry = engine.commit(&session).await.unwrap();
    assert_eq!(entry.id, "dog");
    assert_eq!(entry.image_path, dir.path().join("images/dog.png").to_string_lossy());
    assert_eq!(entry.audio_path, dir.path().join("audio/dog.mp3").to_string_lossy());

    // The committed image really is a canonical square.
    let png = std::fs::read(dir.path().join("images/dog.png")).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));

    // Row 1 comes next; skip it.
    let session = engine.open_next().unwrap();
    assert_eq!(session.english, "cat");
    engine.skip(session.row_index.unwrap());
    assert!(engine.open_next().is_none());

    // A fresh engine over the same directory sees the committed entry and
    // offers the skipped row again.
    let engine = build_engine(test_config(&dir));
    assert_eq!(engine.store().words.len(), 1);
    let session = engine.open_next().unwrap();
    assert_eq!(session.english, "cat");
}

#[tokio::test]
async fn committed_store_uses_the_published_field_names() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("import.csv"),
        "English,Hebrew\ndog,כלב\n",
    )
    .unwrap();

    let mut engine = build_engine(test_config(&dir));
    let mut session = engine.open_next().unwrap();
    engine.auto_fill(&mut session).await;
    session.set_tags_raw("animals, pets");
    session.set_first_letter_optional(true);
    engine.commit(&session).await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("words.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let word = &value["words"][0];
    assert_eq!(word["id"], "dog");
    assert_eq!(word["hebrew"], "כלב");
    assert!(word["audioPath"].is_string());
    assert!(word["imagePath"].is_string());
    assert!(word["distractorWordIds"].is_array());
    assert_eq!(word["firstLetterOptional"], true);
    assert_eq!(word["tags"][0], "animals");
}

#[tokio::test]
async fn recommit_after_edit_replaces_the_entry() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("import.csv"),
        "English,Hebrew\ndog,כלב\n",
    )
    .unwrap();

    let mut engine = build_engine(test_config(&dir));
    let mut session = engine.open_next().unwrap();
    engine.auto_fill(&mut session).await;
    engine.commit(&session).await.unwrap();

    // Fix the translation and save again under the same id.
    session.set_hebrew("כלבלב");
    engine.commit(&session).await.unwrap();

    assert_eq!(engine.store().words.len(), 1);
    assert_eq!(engine.store().words[0].hebrew, "כלבלב");
}

#[tokio::test]
async fn corrupt_store_refuses_to_start() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("words.json"), "{not json").unwrap();

    let result = ImportEngine::with_providers(
        test_config(&dir),
        Box::new(DictTranslator),
        Box::new(CannedSearch),
        Box::new(LocalPreparer { canonical_size: 64 }),
        Box::new(SilentSpeech),
        VoiceAccent::UsEnglish,
    );
    assert!(result.is_err());
}
