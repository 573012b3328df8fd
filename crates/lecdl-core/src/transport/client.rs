//! libcurl-backed transport.

use std::collections::HashMap;
use std::io::Write;
use std::str;
use std::time::Duration;

use super::parse::parse_headers;
use super::{HeadResult, Transport, TransportError, DEFAULT_USER_AGENT};

/// Blocking curl transport carrying the replayed session headers.
///
/// A fresh `Easy` handle is used per request, so the transport is `Send + Sync`
/// and cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
    custom_headers: HashMap<String, String>,
}

impl CurlTransport {
    /// Transport sending `cookie_header` (omitted when empty) and `user_agent`.
    pub fn new(cookie_header: &str, user_agent: &str) -> Self {
        let mut custom_headers = HashMap::new();
        if !cookie_header.is_empty() {
            custom_headers.insert("Cookie".to_string(), cookie_header.to_string());
        }
        let user_agent = if user_agent.is_empty() {
            DEFAULT_USER_AGENT.to_string()
        } else {
            user_agent.to_string()
        };
        Self {
            user_agent,
            custom_headers,
        }
    }

    /// Adds or replaces an extra request header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.custom_headers
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.custom_headers
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        easy.useragent(&self.user_agent)?;

        // Build curl list for custom headers (e.g. "Name: value").
        let mut list = curl::easy::List::new();
        for (k, v) in &self.custom_headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !self.custom_headers.is_empty() {
            easy.http_headers(list)?;
        }
        Ok(easy)
    }
}

impl Transport for CurlTransport {
    fn head(&self, url: &str) -> Result<HeadResult, TransportError> {
        let mut headers: Vec<String> = Vec::new();
        let mut easy = self.easy(url)?;
        easy.nobody(true)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        let mut result = parse_headers(&headers);
        result.status = code;
        Ok(result)
    }

    fn get_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut written = 0u64;
        let mut sink_error: Option<std::io::Error> = None;
        let mut easy = self.easy(url)?;
        // Error bodies (>= 400) are never handed to the write callback.
        easy.fail_on_error(true)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(TransportError::Sink(e));
        }
        let code = easy.response_code()?;
        if let Err(e) = performed {
            if code >= 400 {
                return Err(TransportError::Http(code));
            }
            return Err(TransportError::Curl(e));
        }
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        sink.flush().map_err(TransportError::Sink)?;
        Ok(written)
    }
}
