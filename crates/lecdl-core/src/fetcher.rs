//! Streamed download of one link to its destination file.

use std::path::Path;
use thiserror::Error;

use crate::storage::PartFile;
use crate::transport::{Transport, TransportError};

/// Successful outcome for one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downloaded {
    /// Destination already existed; nothing was requested.
    Skipped,
    /// Body was streamed and moved into place.
    Fetched { bytes: u64 },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Downloads `url` to `dest` unless `dest` already exists.
///
/// An existing file counts as done, whatever its content. The body goes to
/// `<dest>.part` first; on any failure that temp file is removed and `dest`
/// is left untouched.
pub fn fetch_to<T: Transport + ?Sized>(
    url: &str,
    dest: &Path,
    transport: &T,
) -> Result<Downloaded, DownloadError> {
    if dest.exists() {
        tracing::debug!(dest = %dest.display(), "destination exists, skipping");
        return Ok(Downloaded::Skipped);
    }

    let mut part = PartFile::create(dest)?;
    let bytes = match transport.get_to(url, &mut part) {
        Ok(n) => n,
        Err(e) => {
            part.discard();
            return Err(e.into());
        }
    };
    finalize(part)?;
    tracing::debug!(url, dest = %dest.display(), bytes, "download complete");
    Ok(Downloaded::Fetched { bytes })
}

fn finalize(part: PartFile) -> std::io::Result<()> {
    let temp = part.temp_path().to_path_buf();
    part.finalize().map_err(|e| {
        let _ = std::fs::remove_file(&temp);
        e
    })
}
