//! Word id normalization
//!
//! A word id doubles as the asset filename stem, so the mapping has to be
//! deterministic and filesystem-safe.

/// Normalize a word so it can serve as a word id / filename stem.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims leading/trailing separators. Empty or
/// all-punctuation input yields an empty string; callers must treat that as
/// "no valid id", never as a key.
pub fn normalize(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_sep = false;

    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(normalize("dog"), "dog");
        assert_eq!(normalize("Dog"), "dog");
        assert_eq!(normalize("Ice Cream"), "ice-cream");
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        assert_eq!(normalize("don't stop!"), "don-t-stop");
        assert_eq!(normalize("a -- b"), "a-b");
        assert_eq!(normalize("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_leading_trailing_separators_trimmed() {
        assert_eq!(normalize("...dog..."), "dog");
        assert_eq!(normalize("-dog-"), "dog");
    }

    #[test]
    fn test_empty_and_all_punctuation() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize(" - _ . "), "");
    }

    #[test]
    fn test_non_ascii_treated_as_separator() {
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize("כלב"), "");
    }

    #[test]
    fn test_idempotent() {
        for input in ["Dog", "ice cream!", "a--b--c", "", "...", "x1 y2"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
