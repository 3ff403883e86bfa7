//! Import queue resolver.

use milon_core::model::ImportRow;
use std::collections::HashSet;

/// Find the next row the operator should import.
///
/// Scans `rows` from `start_index` in feed order and returns the index of
/// the first row whose derived id is non-empty and not already in
/// `existing_ids`. A plain linear scan with no memoization: repeated calls
/// with the same `start_index` return the same answer. After a successful
/// commit the caller advances its pointer to the committed index + 1, which
/// keeps progress forward-only even if the store read is stale within one
/// session.
pub fn next_unresolved(
    rows: &[ImportRow],
    start_index: usize,
    existing_ids: &HashSet<String>,
) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(start_index)
        .find(|(_, row)| !row.id.is_empty() && !existing_ids.contains(&row.id))
        .map(|(idx, _)| idx)
}
