use milon_core::model::{ImportRow, WordEntry};
use milon_core::slug::normalize;
use milon_img::pipeline::fit_to_square;
use milon_llm::clean::clean_response;
use milon_store::{next_unresolved, upsert};
use proptest::prelude::*;
use std::collections::HashSet;

fn entry(id: &str) -> WordEntry {
    WordEntry {
        id: id.to_string(),
        english: id.to_string(),
        hebrew: String::new(),
        audio_path: format!("assets/audio/{}.mp3", id),
        image_path: format!("assets/images/{}.png", id),
        distractor_word_ids: Vec::new(),
        tags: Vec::new(),
        difficulty: 1,
        first_letter_optional: false,
    }
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in ".*") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_alphabet(input in ".*") {
        let id = normalize(&input);
        prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!id.starts_with('-'));
        prop_assert!(!id.ends_with('-'));
        prop_assert!(!id.contains("--"));
    }

    #[test]
    fn normalize_keeps_ascii_words(word in "[a-z][a-z0-9]{0,15}") {
        prop_assert_eq!(normalize(&word), word);
    }

    #[test]
    fn resolver_returns_first_unresolved_at_or_after_start(
        terms in prop::collection::vec("[a-z]{1,8}", 1..30),
        resolved_mask in prop::collection::vec(any::<bool>(), 30),
        start in 0usize..35,
    ) {
        let rows: Vec<ImportRow> = terms
            .iter()
            .map(|t| ImportRow::new(t.clone(), "", ""))
            .collect();
        let existing: HashSet<String> = rows
            .iter()
            .zip(resolved_mask.iter())
            .filter(|(_, resolved)| **resolved)
            .map(|(row, _)| row.id.clone())
            .collect();

        match next_unresolved(&rows, start, &existing) {
            Some(index) => {
                prop_assert!(index >= start);
                prop_assert!(index < rows.len());
                prop_assert!(!existing.contains(&rows[index].id));
                for row in &rows[start..index] {
                    prop_assert!(existing.contains(&row.id));
                }
            }
            None => {
                for row in rows.iter().skip(start) {
                    prop_assert!(existing.contains(&row.id));
                }
            }
        }
    }

    #[test]
    fn upsert_keeps_ids_unique(
        existing_ids in prop::collection::hash_set("[a-z]{1,6}", 0..10),
        new_id in "[a-z]{1,6}",
    ) {
        let entries: Vec<WordEntry> = existing_ids.iter().map(|id| entry(id)).collect();
        let result = upsert(entries, entry(&new_id));

        let ids: Vec<&str> = result.iter().map(|e| e.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());
        prop_assert!(unique.contains(new_id.as_str()));
    }

    #[test]
    fn upsert_is_idempotent(
        existing_ids in prop::collection::hash_set("[a-z]{1,6}", 0..10),
        new_id in "[a-z]{1,6}",
    ) {
        let entries: Vec<WordEntry> = existing_ids.iter().map(|id| entry(id)).collect();
        let once = upsert(entries, entry(&new_id));
        let twice = upsert(once.clone(), entry(&new_id));
        prop_assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn cleaned_responses_are_trimmed_single_lines(raw in ".{0,80}") {
        if let Some(cleaned) = clean_response(&raw) {
            prop_assert!(!cleaned.is_empty());
            prop_assert!(!cleaned.contains('\n'));
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }
    }

    #[test]
    fn blank_responses_clean_to_none(raw in "[ \t\n]{0,20}") {
        prop_assert_eq!(clean_response(&raw), None);
    }

    #[test]
    fn squared_images_always_decode_to_the_requested_size(
        width in 1u32..40,
        height in 1u32..40,
        size in 8u32..48,
    ) {
        let source = image::DynamicImage::ImageRgb8(
            image::RgbImage::from_pixel(width, height, image::Rgb([200, 10, 10])),
        );
        let png = fit_to_square(&source, size).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        prop_assert_eq!(decoded.width(), size);
        prop_assert_eq!(decoded.height(), size);
    }
}
