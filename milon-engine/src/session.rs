//! Workflow session state machine.
//!
//! One live session per operator interaction. The session is a plain value:
//! transitions mutate it and report errors, the I/O lives in
//! [`crate::importer`]. Image and audio are independent sub-states; both
//! must be ready (plus a non-empty derived id) before the session is
//! savable. A pending latch per asset makes duplicate in-flight requests
//! structurally impossible.

use bytes::Bytes;
use milon_core::model::{ImageCandidate, ImportRow, WordEntry};
use milon_core::{slug, Error, Result};
use milon_spk::VoiceAccent;

/// Derived view of one asset's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Idle,
    Pending,
    Ready,
}

/// Generated pronunciation clip, bytes plus the relative path it will be
/// saved under. The path is fixed at generation time; editing the English
/// term afterwards does not move it (operator-visible staleness, resolved
/// by explicit re-generation).
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Bytes,
    pub rel_path: String,
}

#[derive(Debug, Clone)]
pub struct WorkflowSession {
    /// Feed index of the row this session was opened from; `None` for
    /// manual entry.
    pub row_index: Option<usize>,

    pub english: String,
    pub hebrew: String,
    pub image_query: String,
    pub tts_text: String,
    pub accent: VoiceAccent,

    pub tags: Vec<String>,
    pub difficulty: u8,
    pub distractor_ids: Vec<String>,
    pub first_letter_optional: bool,

    pub candidates: Vec<ImageCandidate>,
    pub selected_image: Option<usize>,
    pub audio: Option<AudioClip>,

    /// Auto-fill scheduled but not yet dispatched.
    auto_image_pending: bool,
    auto_audio_pending: bool,

    /// Single-outstanding-request latches.
    image_in_flight: bool,
    audio_in_flight: bool,

}

impl WorkflowSession {
    pub fn new(accent: VoiceAccent) -> Self {
        Self {
            row_index: None,
            english: String::new(),
            hebrew: String::new(),
            image_query: String::new(),
            tts_text: String::new(),
            accent,
            tags: Vec::new(),
            difficulty: 1,
            distractor_ids: Vec::new(),
            first_letter_optional: false,
            candidates: Vec::new(),
            selected_image: None,
            audio: None,
            auto_image_pending: false,
            auto_audio_pending: false,
            image_in_flight: false,
            audio_in_flight: false,
        }
    }

    /// EMPTY → PREFILLED via the queue resolver handing over a row.
    /// Auto-fill latches are set so search and synthesis are scheduled once.
    pub fn prefill_from_row(accent: VoiceAccent, row: &ImportRow, index: usize) -> Self {
        let mut session = Self::new(accent);
        session.row_index = Some(index);
        session.english = row.english.clone();
        session.hebrew = row.hebrew.clone();
        session.image_query = row.search_query.clone();
        session.tts_text = row.english.clone();
        session.auto_image_pending = true;
        session.auto_audio_pending = true;
        session
    }

    /// EMPTY → PREFILLED via the operator typing a term.
    pub fn prefill_manual(accent: VoiceAccent, english: &str) -> Self {
        let mut session = Self::new(accent);
        session.set_english(english);
        session.auto_image_pending = true;
        session.auto_audio_pending = true;
        session
    }

    /// Identifier derived from the current English term. Empty means the
    /// session cannot proceed to commit.
    pub fn word_id(&self) -> String {
        slug::normalize(&self.english)
    }

    /// Edit the English term. Re-seeds the image-search and pronunciation
    /// defaults to the new term, but deliberately keeps an already-selected
    /// image and already-generated audio (see crate docs on staleness).
    pub fn set_english(&mut self, text: &str) {
        if text == self.english {
            return;
        }
        self.english = text.to_string();
        self.image_query = self.english.clone();
        self.tts_text = self.english.clone();
    }

    pub fn set_hebrew(&mut self, text: &str) {
        self.hebrew = text.trim().to_string();
    }

    /// Comma-separated tags; empties dropped, order preserved.
    pub fn set_tags_raw(&mut self, raw: &str) {
        self.tags = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }

    pub fn set_difficulty(&mut self, level: u8) -> Result<()> {
        if !(1..=5).contains(&level) {
            return Err(Error::Input(format!(
                "Difficulty must be between 1 and 5, got {}",
                level
            )));
        }
        self.difficulty = level;
        Ok(())
    }

    pub fn set_distractors(&mut self, ids: Vec<String>) {
        self.distractor_ids = ids;
    }

    pub fn set_first_letter_optional(&mut self, flag: bool) {
        self.first_letter_optional = flag;
    }

    pub fn image_state(&self) -> AssetState {
        if self.image_in_flight {
            AssetState::Pending
        } else if self.selected_image.is_some() {
            AssetState::Ready
        } else {
            AssetState::Idle
        }
    }

    pub fn audio_state(&self) -> AssetState {
        if self.audio_in_flight {
            AssetState::Pending
        } else if self.audio.is_some() {
            AssetState::Ready
        } else {
            AssetState::Idle
        }
    }

    pub fn auto_image_pending(&self) -> bool {
        self.auto_image_pending
    }

    pub fn auto_audio_pending(&self) -> bool {
        self.auto_audio_pending
    }

    /// Request an image search. Returns the query to dispatch, or `None`
    /// when a search is already in flight (re-triggering is a no-op).
    pub fn begin_image_search(&mut self) -> Result<Option<String>> {
        if self.image_in_flight {
            return Ok(None);
        }
        let query = self.image_query.trim();
        if query.is_empty() {
            return Err(Error::Input(
                "Provide an image search phrase first".to_string(),
            ));
        }
        self.image_in_flight = true;
        self.auto_image_pending = false;
        Ok(Some(query.to_string()))
    }

    /// Search results arrived. A non-empty list auto-selects the first
    /// candidate (the operator can re-pick); an empty list clears the latch
    /// and leaves the sub-state un-advanced.
    pub fn image_results(&mut self, candidates: Vec<ImageCandidate>) {
        self.image_in_flight = false;
        self.selected_image = if candidates.is_empty() { None } else { Some(0) };
        self.candidates = candidates;
    }

    /// The search failed. Clears only the latch; an earlier candidate list
    /// and selection survive for manual retry.
    pub fn image_failed(&mut self) {
        self.image_in_flight = false;
    }

    pub fn select_image(&mut self, index: usize) -> Result<()> {
        if index >= self.candidates.len() {
            return Err(Error::Input(format!(
                "No image option {} (have {})",
                index + 1,
                self.candidates.len()
            )));
        }
        self.selected_image = Some(index);
        Ok(())
    }

    pub fn selected_candidate(&self) -> Option<&ImageCandidate> {
        self.selected_image.and_then(|idx| self.candidates.get(idx))
    }

    pub fn clear_images(&mut self) {
        self.candidates.clear();
        self.selected_image = None;
    }

    /// Request audio synthesis. Returns the text to synthesize, or `None`
    /// when a request is already in flight.
    pub fn begin_audio(&mut self) -> Result<Option<String>> {
        if self.audio_in_flight {
            return Ok(None);
        }
        let text = self.tts_text.trim();
        if text.is_empty() {
            return Err(Error::Input(
                "Provide pronunciation text before generating audio".to_string(),
            ));
        }
        self.audio_in_flight = true;
        self.auto_audio_pending = false;
        Ok(Some(text.to_string()))
    }

    pub fn audio_ready(&mut self, bytes: Bytes, rel_path: String) {
        self.audio_in_flight = false;
        self.audio = Some(AudioClip { bytes, rel_path });
    }

    pub fn audio_failed(&mut self) {
        self.audio_in_flight = false;
    }

    pub fn clear_audio(&mut self) {
        self.audio = None;
    }

    /// Both sub-states ready and a valid identifier: the session may commit.
    pub fn savable(&self) -> bool {
        self.commit_preconditions().is_ok()
    }

    /// Why the session cannot commit yet, as an input error.
    pub fn commit_preconditions(&self) -> Result<()> {
        if self.english.trim().is_empty() {
            return Err(Error::Input("English term is empty".to_string()));
        }
        if self.word_id().is_empty() {
            return Err(Error::Input(
                "Word id could not be derived; use alphanumeric characters".to_string(),
            ));
        }
        if self.selected_candidate().is_none() {
            return Err(Error::Input("No image selected".to_string()));
        }
        if self.audio.is_none() {
            return Err(Error::Input("No audio generated".to_string()));
        }
        Ok(())
    }

    /// Assemble the committable entry. `image_rel_path` is decided by the
    /// caller (it owns the asset directories). The session's own id is
    /// filtered out of the distractor list.
    pub fn build_entry(&self, image_rel_path: String) -> Result<WordEntry> {
        self.commit_preconditions()?;
        let id = self.word_id();
        let audio = self
            .audio
            .as_ref()
            .ok_or_else(|| Error::Input("No audio generated".to_string()))?;

        Ok(WordEntry {
            english: self.english.trim().to_string(),
            hebrew: self.hebrew.trim().to_string(),
            audio_path: audio.rel_path.clone(),
            image_path: image_rel_path,
            distractor_word_ids: self
                .distractor_ids
                .iter()
                .filter(|d| **d != id)
                .cloned()
                .collect(),
            tags: self.tags.clone(),
            difficulty: self.difficulty,
            first_letter_optional: self.first_letter_optional,
            id,
        })
    }
}
