//! Utility helpers — summary truncation, string clamping, path handling.

use std::path::{Path, PathBuf};

/// Truncate `text` for a summary card, cutting at a whitespace boundary.
///
/// Text shorter than `max` characters is returned unchanged. Otherwise the
/// cut is placed at the last whitespace within the first
/// `max - suffix` characters and `suffix` is appended. When that window
/// contains no whitespace the cut lands at the start of the string and
/// only the suffix is left.
///
/// Lengths are counted in `char`s, so multi-byte text is never split.
pub fn truncate(text: &str, max: usize, suffix: &str) -> String {
    if text.chars().count() < max {
        return text.to_string();
    }

    let window = max.saturating_sub(suffix.chars().count());
    let cut = text
        .char_indices()
        .take(window)
        .filter(|(_, c)| c.is_whitespace())
        .map(|(idx, _)| idx)
        .last()
        .unwrap_or(0);

    format!("{}{}", &text[..cut], suffix)
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if path.starts_with("~/") || path == "~" {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(path.get(2..).unwrap_or(""))
    } else {
        PathBuf::from(path)
    }
}

/// Join the components of a relative path with `/`, whatever the host OS.
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
