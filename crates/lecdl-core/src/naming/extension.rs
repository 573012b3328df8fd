//! Extension extraction from URL path.

/// Returns the lowercased extension (with the leading dot) of the last URL
/// path segment, e.g. `https://x/a/Lecture.MP4?t=1` → `.mp4`.
///
/// Returns `None` when the URL cannot be parsed, the path has no segment, the
/// segment has no dot, or the extension is too short to mean anything (a bare `.`).
/// A leading dot alone (`/.hidden`) is not an extension.
pub fn extension_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    let dot = segment.rfind('.')?;
    if dot == 0 {
        return None;
    }
    let ext = segment[dot..].to_ascii_lowercase();
    if ext.len() < 2 {
        return None;
    }
    Some(ext)
}
