//! File extension resolution for discovered download links.
//!
//! The URL path is trusted first. Only links without a usable path extension
//! (e.g. `https://portal/file?id=1`) cost a HEAD probe, whose content-type is
//! mapped through a fixed table. Whatever stays unresolved gets the default.

use crate::naming::extension_from_url_path;
use crate::transport::Transport;

/// Extension used when neither the URL nor the probe yields one.
pub const DEFAULT_EXTENSION: &str = ".mp4";

/// Generic binary extension; treated like "unknown" and replaced by the default.
pub const GENERIC_BINARY_EXTENSION: &str = ".bin";

/// Known content types and the extension saved for them.
const CONTENT_TYPE_EXTENSIONS: &[(&str, &str)] = &[
    ("video/mp4", ".mp4"),
    ("audio/mpeg", ".mp3"),
    ("application/pdf", ".pdf"),
];

/// Outcome of an extension lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionLookup {
    /// Extension including the leading dot.
    Found(String),
    Unresolved,
}

impl ExtensionLookup {
    /// The found extension, or `default_ext` when unresolved or generic binary.
    pub fn or_default(self, default_ext: &str) -> String {
        match self {
            ExtensionLookup::Found(ext) if ext != GENERIC_BINARY_EXTENSION => ext,
            _ => default_ext.to_string(),
        }
    }
}

/// Maps a `Content-Type` value to an extension.
///
/// Parameters (`; charset=...`) are ignored and the media type is compared
/// case-insensitively.
pub fn extension_for_content_type(content_type: &str) -> ExtensionLookup {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    CONTENT_TYPE_EXTENSIONS
        .iter()
        .find(|(mime, _)| essence.eq_ignore_ascii_case(mime))
        .map(|(_, ext)| ExtensionLookup::Found(ext.to_string()))
        .unwrap_or(ExtensionLookup::Unresolved)
}

/// HEAD-probes `url` and maps its content-type. Probe failures are not errors.
pub fn probe_extension<T: Transport + ?Sized>(url: &str, transport: &T) -> ExtensionLookup {
    match transport.head(url) {
        Ok(head) => match head.content_type.as_deref() {
            Some(ct) => extension_for_content_type(ct),
            None => {
                tracing::debug!(url, "probe returned no content-type");
                ExtensionLookup::Unresolved
            }
        },
        Err(e) => {
            tracing::debug!(url, error = %e, "extension probe failed");
            ExtensionLookup::Unresolved
        }
    }
}

/// URL path extension if present, otherwise the probe result.
pub fn lookup_extension<T: Transport + ?Sized>(url: &str, transport: &T) -> ExtensionLookup {
    match extension_from_url_path(url) {
        Some(ext) => ExtensionLookup::Found(ext),
        None => probe_extension(url, transport),
    }
}

/// Extension to save `url` under, never empty.
pub fn resolve_extension<T: Transport + ?Sized>(
    url: &str,
    transport: &T,
    default_ext: &str,
) -> String {
    lookup_extension(url, transport).or_default(default_ext)
}
