//! Cleanup of raw provider answers.
//!
//! Text models pad their answers: echoed prompts, an `output:` prefix,
//! surrounding quotes. The adapter contract is "first non-empty line of the
//! cleaned response", so commit only ever sees the bare translation.

/// Reduce a raw provider answer to the translation itself. Returns `None`
/// when nothing remains after cleanup.
pub fn clean_response(raw: &str) -> Option<String> {
    let first_line = raw.lines().map(str::trim).find(|line| !line.is_empty())?;

    let mut cleaned = first_line;
    let lower = cleaned.to_lowercase();
    if lower.starts_with("output:") {
        cleaned = cleaned.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    }

    let cleaned = cleaned
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_answer() {
        assert_eq!(clean_response("כלב"), Some("כלב".to_string()));
    }

    #[test]
    fn test_output_prefix_stripped() {
        assert_eq!(clean_response("output: כלב"), Some("כלב".to_string()));
        assert_eq!(clean_response("Output: כלב"), Some("כלב".to_string()));
    }

    #[test]
    fn test_first_non_empty_line_wins() {
        assert_eq!(
            clean_response("\n\nכלב\nsecond line ignored"),
            Some("כלב".to_string())
        );
    }

    #[test]
    fn test_surrounding_quotes_stripped() {
        assert_eq!(clean_response("\"כלב\""), Some("כלב".to_string()));
        assert_eq!(clean_response("'כלב'"), Some("כלב".to_string()));
    }

    #[test]
    fn test_prefix_and_whitespace_combined() {
        assert_eq!(clean_response("  output:   כלב  "), Some("כלב".to_string()));
    }

    #[test]
    fn test_empty_after_cleanup() {
        assert_eq!(clean_response(""), None);
        assert_eq!(clean_response("   \n  \n"), None);
        assert_eq!(clean_response("output:"), None);
        assert_eq!(clean_response("\"\""), None);
    }
}
