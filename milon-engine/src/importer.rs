//! The import engine: imperative shell around the session state machine.
//!
//! Owns the source rows, the progress pointer, the in-memory store, and the
//! provider adapters. Every operation here is one synchronous
//! request/response step for a single operator; the only suspension points
//! are the adapter calls, each bounded by its client timeout.

use milon_core::config::ImporterConfig;
use milon_core::model::{ImportRow, WordEntry};
use milon_core::{Error, Result};
use milon_img::{prepare_previews, ImagePipeline, ImagePreparer, ImageSearchProvider, PixabaySearch};
use milon_llm::{build_translator, Translator};
use milon_spk::{build_engine, SpeechEngine, VoiceAccent};
use milon_store::words::WordFile;
use milon_store::{feed, next_unresolved, upsert};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::session::WorkflowSession;

pub struct ImportEngine {
    config: ImporterConfig,
    accent: VoiceAccent,
    rows: Vec<ImportRow>,
    progress_index: usize,
    store: WordFile,
    translator: Box<dyn Translator>,
    search: Box<dyn ImageSearchProvider>,
    preparer: Box<dyn ImagePreparer>,
    speech: Box<dyn SpeechEngine>,
}

impl ImportEngine {
    /// Build the engine with the configured real providers, loading the
    /// store and the feed from disk.
    pub fn new(config: ImporterConfig) -> Result<Self> {
        config
            .validate()
            .map_err(Error::Configuration)?;

        let translator = build_translator(&config.translator)?;
        let search = Box::new(PixabaySearch::new(&config.image)?);
        let preparer = Box::new(ImagePipeline::new(&config.image)?);
        let speech = build_engine(&config.speech)?;
        let accent = VoiceAccent::parse(&config.speech.accent)?;

        Self::with_providers(config, translator, search, preparer, speech, accent)
    }

    /// Build the engine with caller-supplied adapters. Tests use this to
    /// avoid the network.
    pub fn with_providers(
        config: ImporterConfig,
        translator: Box<dyn Translator>,
        search: Box<dyn ImageSearchProvider>,
        preparer: Box<dyn ImagePreparer>,
        speech: Box<dyn SpeechEngine>,
        accent: VoiceAccent,
    ) -> Result<Self> {
        let store = WordFile::load(&config.paths.words_file)?;
        let rows = feed::load_import_rows(&config.paths.import_feed)?;
        info!(
            "Engine ready: {} store entries, {} feed rows",
            store.words.len(),
            rows.len()
        );

        Ok(Self {
            config,
            accent,
            rows,
            progress_index: 0,
            store,
            translator,
            search,
            preparer,
            speech,
        })
    }

    pub fn store(&self) -> &WordFile {
        &self.store
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn progress_index(&self) -> usize {
        self.progress_index
    }

    /// Hand the next unresolved feed row to a fresh session, or `None` when
    /// every row is already in the store.
    pub fn open_next(&self) -> Option<WorkflowSession> {
        let index = next_unresolved(&self.rows, self.progress_index, &self.store.ids())?;
        Some(WorkflowSession::prefill_from_row(
            self.accent,
            &self.rows[index],
            index,
        ))
    }

    /// Open a session for a manually entered term.
    pub fn open_manual(&self, english: &str) -> WorkflowSession {
        WorkflowSession::prefill_manual(self.accent, english)
    }

    /// Move the queue pointer past `row_index` without committing. The row
    /// stays in the feed and reappears on the next full pass.
    pub fn skip(&mut self, row_index: usize) {
        if row_index >= self.progress_index {
            self.progress_index = row_index + 1;
        }
    }

    /// Translate the session's English term and fill the Hebrew field.
    pub async fn translate(&self, session: &mut WorkflowSession) -> Result<()> {
        let hebrew = self.translator.translate(&session.english).await?;
        session.set_hebrew(&hebrew);
        Ok(())
    }

    /// Dispatch an image search for the session's query. A no-op when a
    /// search is already in flight; on failure the latch is cleared and the
    /// error reported to the caller.
    pub async fn search_images(&self, session: &mut WorkflowSession) -> Result<()> {
        let query = match session.begin_image_search()? {
            Some(query) => query,
            None => return Ok(()),
        };

        match self.search.search(&query).await {
            Ok(mut candidates) => {
                if candidates.is_empty() {
                    warn!("No images returned for '{}'", query);
                } else {
                    prepare_previews(
                        self.preparer.as_ref(),
                        &mut candidates,
                        self.config.image.preview_size,
                    )
                    .await;
                }
                session.image_results(candidates);
                Ok(())
            }
            Err(e) => {
                session.image_failed();
                Err(e.into())
            }
        }
    }

    /// Synthesize audio for the session's pronunciation text. A no-op when
    /// a request is already in flight.
    pub async fn generate_audio(&self, session: &mut WorkflowSession) -> Result<()> {
        let text = match session.begin_audio()? {
            Some(text) => text,
            None => return Ok(()),
        };

        match self.speech.synthesize(&text, session.accent).await {
            Ok(bytes) => {
                let stem = {
                    let id = session.word_id();
                    if id.is_empty() {
                        milon_core::slug::normalize(&text)
                    } else {
                        id
                    }
                };
                let rel_path = rel_asset_path(&self.config.paths.audio_dir, &stem, "mp3");
                session.audio_ready(bytes, rel_path);
                Ok(())
            }
            Err(e) => {
                session.audio_failed();
                Err(e.into())
            }
        }
    }

    /// Run the scheduled auto-fill actions for a freshly opened session:
    /// translation (when the feed gave no hint), image search, and audio
    /// synthesis. Failures are collected as warnings, never aborting the
    /// other actions.
    pub async fn auto_fill(&self, session: &mut WorkflowSession) -> Vec<String> {
        let mut reports = Vec::new();

        if session.hebrew.trim().is_empty() && !session.english.trim().is_empty() {
            if let Err(e) = self.translate(session).await {
                warn!("Auto-translate failed: {}", e);
                reports.push(format!("Translation failed: {}", e));
            }
        }

        if session.auto_image_pending() {
            if let Err(e) = self.search_images(session).await {
                warn!("Auto image search failed: {}", e);
                reports.push(format!("Image search failed: {}", e));
            }
        }

        if session.auto_audio_pending() {
            if let Err(e) = self.generate_audio(session).await {
                warn!("Auto audio generation failed: {}", e);
                reports.push(format!("Audio generation failed: {}", e));
            }
        }

        reports
    }

    /// Commit the session: write both assets, upsert the entry, rewrite the
    /// store, and advance the queue pointer past the committed row. A failed
    /// asset write aborts before the store is touched, so the store file
    /// stays at last-known-good.
    pub async fn commit(&mut self, session: &WorkflowSession) -> Result<WordEntry> {
        session.commit_preconditions()?;

        let id = session.word_id();
        let candidate = session
            .selected_candidate()
            .ok_or_else(|| Error::Input("No image selected".to_string()))?;
        let image_url = candidate.best_full_url().ok_or_else(|| {
            Error::Input("Selected image has no downloadable URL".to_string())
        })?;

        let image_rel = rel_asset_path(&self.config.paths.images_dir, &id, "png");
        self.preparer
            .save_prepared(image_url, Path::new(&image_rel))
            .await?;

        let clip = session
            .audio
            .as_ref()
            .ok_or_else(|| Error::Input("No pronunciation audio generated".to_string()))?;
        write_audio(&clip.rel_path, &clip.bytes)?;

        let entry = session.build_entry(image_rel)?;
        self.store.words = upsert(std::mem::take(&mut self.store.words), entry.clone());
        self.store.save(&self.config.paths.words_file)?;

        if let Some(index) = session.row_index {
            self.progress_index = index + 1;
        }
        info!("Committed \"{}\" ({})", entry.english, entry.id);
        Ok(entry)
    }
}

fn rel_asset_path(dir: &Path, stem: &str, ext: &str) -> String {
    let mut path = PathBuf::from(dir);
    path.push(format!("{}.{}", stem, ext));
    path.to_string_lossy().into_owned()
}

fn write_audio(rel_path: &str, bytes: &[u8]) -> Result<()> {
    let path = Path::new(rel_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Persistence(format!("Cannot create {}: {}", parent.display(), e)))?;
        }
    }
    std::fs::write(path, bytes)
        .map_err(|e| Error::Persistence(format!("Cannot write {}: {}", path.display(), e)))
}
