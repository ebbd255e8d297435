//! Text normalization shared by the import and export stages.

use rustc_hash::FxHashSet;

const TRAILING_PUNCTUATION: &[char] = &['.', '?', '!', ',', ';', ':'];
const ELLIPSIS: &str = "...";

/// Remove one trailing punctuation mark and make sure the title ends with `...`.
///
/// Titles already ending in `...` are returned unchanged.
pub fn normalize_title_ending(title: &str) -> String {
    let title = title.trim_end();
    if title.ends_with(ELLIPSIS) {
        return title.to_string();
    }

    let stem = title.strip_suffix(TRAILING_PUNCTUATION).unwrap_or(title);
    format!("{}{ELLIPSIS}", stem.trim_end())
}

/// Drop every non-ASCII character.
pub fn remove_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Trim a country name and expand the `US` abbreviation.
pub fn normalize_country(country: &str) -> String {
    match country.trim() {
        "US" => "United States".to_string(),
        other => other.to_string(),
    }
}

/// Keep the first occurrence of each key, preserving order. Returns the number
/// of removed items.
pub fn dedup_by_key<T, F>(items: &mut Vec<T>, mut key: F) -> usize
where
    F: FnMut(&T) -> String,
{
    let before = items.len();
    let mut seen = FxHashSet::default();
    items.retain(|item| seen.insert(key(item)));
    before - items.len()
}

/// Whether a row belongs in the analysis export: it has a country and a story
/// longer than `min_story_chars`.
pub fn is_analysis_row(country: Option<&str>, story: &str, min_story_chars: usize) -> bool {
    country.is_some_and(|c| !c.trim().is_empty()) && story.trim().chars().count() > min_story_chars
}
