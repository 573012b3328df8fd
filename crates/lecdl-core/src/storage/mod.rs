//! Destination file lifecycle.
//!
//! Bodies are streamed into `<final>.part` and renamed onto the final name
//! only after the transfer completed, so a final-name file is always whole.

mod part_file;

pub use part_file::PartFile;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `Intro.mp4` → `Intro.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
