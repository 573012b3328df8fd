//! Filesystem-safe section and title names.

/// Characters replaced by `_` in section and title names.
pub const ILLEGAL_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces every character of [`ILLEGAL_CHARS`] with `_`.
///
/// Everything else (spaces, dots, unicode) is kept as is, so names stay
/// recognizable next to the portal's own listing.
pub fn safe_name(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Like [`safe_name`], additionally keeping only the text before the first newline.
pub fn safe_title(title: &str) -> String {
    let first_line = title.split('\n').next().unwrap_or_default();
    safe_name(first_line)
}
