//! Local naming for downloaded lecture assets.
//!
//! Builds `<root>/<safe section>/<safe title><ext>` from manifest strings and
//! derives extensions from URL paths.

mod extension;
mod sanitize;

pub use extension::extension_from_url_path;
pub use sanitize::{safe_name, safe_title, ILLEGAL_CHARS};

use std::path::{Path, PathBuf};

/// Directory that holds all assets of one manifest section.
pub fn section_dir(root: &Path, section: &str) -> PathBuf {
    root.join(safe_name(section))
}

/// Destination path for a lecture asset with extension `ext` (including the dot).
///
/// # Examples
///
/// - `lecture_file_path("downloads", "Week 1", "Intro\nExtra", ".pdf")` → `downloads/Week 1/Intro.pdf`
pub fn lecture_file_path(root: &Path, section: &str, title: &str, ext: &str) -> PathBuf {
    section_dir(root, section).join(lecture_file_name(title, ext))
}

/// File name (no directory) for a lecture asset.
pub fn lecture_file_name(title: &str, ext: &str) -> String {
    format!("{}{}", safe_title(title), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_uses_safe_section_and_title() {
        let p = lecture_file_path(Path::new("downloads"), "Week 1", "Intro\nExtra", ".pdf");
        assert_eq!(p, Path::new("downloads").join("Week 1").join("Intro.pdf"));
    }

    #[test]
    fn file_path_replaces_separators_in_section() {
        let p = lecture_file_path(Path::new("out"), "Unit 2/3", "a:b", ".mp4");
        assert_eq!(p, Path::new("out").join("Unit 2_3").join("a_b.mp4"));
    }

    #[test]
    fn file_name_keeps_spaces() {
        assert_eq!(lecture_file_name("Lecture 01 - Basics", ".mp3"), "Lecture 01 - Basics.mp3");
    }
}
