//! HTTP boundary shared by the extension probe and the file fetcher.
//!
//! Every request carries the replayed `Cookie` header and the fixed
//! `User-Agent`. The production implementation is libcurl-backed and blocking;
//! call it from `spawn_blocking` when used from async code.

mod client;
mod error;
mod parse;

pub use client::CurlTransport;
pub use error::TransportError;

use std::io::Write;

/// Desktop Chrome user agent sent with every plain HTTP request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Response metadata from a successful (2xx) HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Final status code after redirects.
    pub status: u32,
    /// Raw `Content-Type` value, parameters included.
    pub content_type: Option<String>,
    /// `Content-Length` if present and numeric.
    pub content_length: Option<u64>,
}

/// Outbound HTTP used by the resolver and fetcher.
pub trait Transport: Send + Sync {
    /// HEAD `url`. Non-2xx responses are errors.
    fn head(&self, url: &str) -> Result<HeadResult, TransportError>;

    /// GET `url`, streaming the body into `sink`. Returns the number of body bytes written.
    /// Non-2xx responses are errors and write nothing.
    fn get_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}
