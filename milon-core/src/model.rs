//! Shared data model for the import workflow.

use serde::{Deserialize, Serialize};

use crate::slug;

/// A committed vocabulary entry as persisted in the word store.
///
/// Immutable once committed except by full overwrite through an upsert on
/// `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Normalized identifier, unique key of the collection.
    pub id: String,

    /// English display term.
    pub english: String,

    /// Hebrew translation; empty when untranslated.
    pub hebrew: String,

    /// Relative path to the pronunciation clip.
    pub audio_path: String,

    /// Relative path to the normalized square illustration.
    pub image_path: String,

    /// Ids of other entries used as distractors. May be empty; must not
    /// include `id` itself (a caller concern, not enforced here).
    #[serde(default)]
    pub distractor_word_ids: Vec<String>,

    /// Free-form tags, insertion order preserved.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Difficulty level in [1, 5].
    pub difficulty: u8,

    /// Whether this word may appear in first-letter drills.
    #[serde(default)]
    pub first_letter_optional: bool,
}

/// One row of the source vocabulary feed. Read-only input.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub english: String,
    /// Translation hint; may be blank.
    pub hebrew: String,
    /// Image search phrase; defaults to `english` when the feed leaves it
    /// blank.
    pub search_query: String,
    /// Derived via [`slug::normalize`]. Rows with an empty id cannot
    /// participate in the workflow.
    pub id: String,
}

impl ImportRow {
    pub fn new(english: impl Into<String>, hebrew: impl Into<String>, search_query: impl Into<String>) -> Self {
        let english = english.into();
        let search_query = search_query.into();
        let search_query = if search_query.trim().is_empty() {
            english.clone()
        } else {
            search_query
        };
        let id = slug::normalize(&english);
        Self {
            english,
            hebrew: hebrew.into(),
            search_query,
            id,
        }
    }
}

/// One image search result, ephemeral per search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub id: String,
    pub tags: String,
    pub thumbnail_url: Option<String>,
    pub full_image_url: Option<String>,
    pub vector_url: Option<String>,
    /// Normalized preview PNG; `None` when preparation failed. The candidate
    /// stays selectable either way.
    #[serde(skip)]
    pub preview_bytes: Option<Vec<u8>>,
}

impl ImageCandidate {
    /// URL to fetch for the small preview: thumbnail first, then the larger
    /// variants.
    pub fn best_preview_url(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.full_image_url.as_deref())
            .or(self.vector_url.as_deref())
    }

    /// URL to fetch for the committed asset: vector preferred, then the
    /// large raster.
    pub fn best_full_url(&self) -> Option<&str> {
        self.vector_url
            .as_deref()
            .or(self.full_image_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_row_defaults_search_query_to_english() {
        let row = ImportRow::new("Ice Cream", "", "");
        assert_eq!(row.search_query, "Ice Cream");
        assert_eq!(row.id, "ice-cream");
    }

    #[test]
    fn test_import_row_keeps_explicit_query() {
        let row = ImportRow::new("dog", "כלב", "cute dog cartoon");
        assert_eq!(row.search_query, "cute dog cartoon");
        assert_eq!(row.id, "dog");
    }

    #[test]
    fn test_word_entry_serializes_camel_case() {
        let entry = WordEntry {
            id: "dog".into(),
            english: "dog".into(),
            hebrew: "כלב".into(),
            audio_path: "assets/audio/dog.mp3".into(),
            image_path: "assets/images/dog.png".into(),
            distractor_word_ids: vec!["cat".into()],
            tags: vec!["animals".into()],
            difficulty: 1,
            first_letter_optional: false,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["audioPath"], "assets/audio/dog.mp3");
        assert_eq!(json["imagePath"], "assets/images/dog.png");
        assert_eq!(json["distractorWordIds"][0], "cat");
        assert_eq!(json["firstLetterOptional"], false);
    }

    #[test]
    fn test_candidate_url_preference() {
        let candidate = ImageCandidate {
            id: "1".into(),
            tags: "dog".into(),
            thumbnail_url: Some("thumb".into()),
            full_image_url: Some("full".into()),
            vector_url: Some("vector".into()),
            preview_bytes: None,
        };
        assert_eq!(candidate.best_preview_url(), Some("thumb"));
        assert_eq!(candidate.best_full_url(), Some("vector"));

        let raster_only = ImageCandidate {
            vector_url: None,
            ..candidate.clone()
        };
        assert_eq!(raster_only.best_full_url(), Some("full"));
    }
}
