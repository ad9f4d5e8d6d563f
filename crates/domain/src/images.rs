//! Image attachment set handling.
//!
//! A multi-file selection has no "remove one" primitive, so removal is
//! modeled by rebuilding the kept set. On edit, the stored set is the kept
//! existing images (original order preserved) followed by newly uploaded
//! ones.

/// Drops `removed` entries from `existing`, preserving the relative order of
/// everything kept. Each removal entry drops at most one occurrence.
pub fn apply_removals(existing: &[String], removed: &[String]) -> Vec<String> {
    let mut to_remove: Vec<&String> = removed.iter().collect();
    existing
        .iter()
        .filter(|url| {
            if let Some(pos) = to_remove.iter().position(|r| r == url) {
                to_remove.swap_remove(pos);
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// Kept existing images first, newly uploaded appended.
pub fn merge(kept: Vec<String>, uploaded: Vec<String>) -> Vec<String> {
    let mut merged = kept;
    merged.extend(uploaded);
    merged
}
