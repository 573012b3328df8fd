//! In-memory transport and link source for unit tests.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Mutex;

use crate::navigator::LinkSource;
use crate::transport::{HeadResult, Transport, TransportError};

/// Scripted transport. Unknown HEAD URLs fail like a refused connection;
/// unknown GET URLs answer 404. Every call is recorded as `"METHOD url"`.
#[derive(Default)]
pub(crate) struct FakeTransport {
    heads: HashMap<String, Option<String>>,
    bodies: HashMap<String, Vec<u8>>,
    broken: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// HEAD `url` succeeds with the given content-type.
    pub(crate) fn with_head(mut self, url: &str, content_type: Option<&str>) -> Self {
        self.heads
            .insert(url.to_string(), content_type.map(str::to_string));
        self
    }

    /// GET `url` succeeds with `body`.
    pub(crate) fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    /// GET `url` writes half of its body, then the connection drops.
    pub(crate) fn with_broken_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self.broken.insert(url.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, url: &str) {
        self.calls.lock().unwrap().push(format!("{} {}", method, url));
    }
}

impl Transport for FakeTransport {
    fn head(&self, url: &str) -> Result<HeadResult, TransportError> {
        self.record("HEAD", url);
        match self.heads.get(url) {
            Some(content_type) => Ok(HeadResult {
                status: 200,
                content_type: content_type.clone(),
                content_length: None,
            }),
            // CURLE_COULDNT_CONNECT
            None => Err(TransportError::Curl(curl::Error::new(7))),
        }
    }

    fn get_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.record("GET", url);
        let body = self.bodies.get(url).ok_or(TransportError::Http(404))?;
        if self.broken.contains(url) {
            let half = &body[..body.len() / 2];
            sink.write_all(half).map_err(TransportError::Sink)?;
            // CURLE_PARTIAL_FILE
            return Err(TransportError::Curl(curl::Error::new(18)));
        }
        sink.write_all(body).map_err(TransportError::Sink)?;
        Ok(body.len() as u64)
    }
}

/// Link source answering from a fixed page → links table. Unknown pages fail
/// like a crashed navigation.
#[derive(Default)]
pub(crate) struct ScriptedNavigator {
    pages: HashMap<String, Vec<String>>,
    pub(crate) visited: Vec<String>,
    pub(crate) close_calls: usize,
}

impl ScriptedNavigator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.pages
            .insert(url.to_string(), links.iter().map(|l| l.to_string()).collect());
        self
    }
}

impl LinkSource for &mut ScriptedNavigator {
    async fn download_links(&mut self, url: &str) -> anyhow::Result<Vec<String>> {
        self.visited.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("net::ERR_NAME_NOT_RESOLVED at {}", url))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}
