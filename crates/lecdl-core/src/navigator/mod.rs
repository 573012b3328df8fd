//! Discovery of download links on rendered lecture pages.
//!
//! The batch runner only depends on [`LinkSource`]; [`ChromeNavigator`] is the
//! production implementation driving a headless Chromium over CDP.

mod chrome;
mod script;

pub use chrome::ChromeNavigator;

use anyhow::Result;

/// A navigation session yielding the download links of one page at a time.
///
/// One session serves the whole run. The owner must call [`LinkSource::close`]
/// once, on every exit path.
#[allow(async_fn_in_trait)]
pub trait LinkSource {
    /// Loads `url`, waits for it to settle, and returns the absolute hrefs of
    /// all download anchors in document order. No anchors is `Ok(vec![])`.
    async fn download_links(&mut self, url: &str) -> Result<Vec<String>>;

    /// Releases the session. Calling it again is a no-op.
    async fn close(&mut self) -> Result<()>;
}
