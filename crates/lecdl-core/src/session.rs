//! Session inputs: the lecture manifest and the captured cookie set.
//!
//! Both are JSON arrays read once at startup. Malformed input is fatal to the
//! run; there is no schema validation beyond deserialization.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One lecture page to visit, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub section: String,
    pub title: String,
    pub url: String,
}

/// A browser cookie as exported from a logged-in session.
///
/// Only `name` and `value` are required. Other exported fields (`hostOnly`,
/// `storeId`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    #[serde(alias = "key")]
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub http_only: Option<bool>,
    /// Expiry in seconds since the epoch; `-1` or absent for session cookies.
    #[serde(default)]
    pub expires: Option<f64>,
    #[serde(default)]
    pub same_site: Option<String>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Lectures and cookies for one run.
#[derive(Debug, Clone)]
pub struct Session {
    pub lectures: Vec<Lecture>,
    pub cookies: Vec<Cookie>,
}

impl Session {
    /// Loads both session files.
    pub fn load(lectures_path: &Path, cookies_path: &Path) -> Result<Self, SessionError> {
        let lectures = load_lectures(lectures_path)?;
        let cookies = load_cookies(cookies_path)?;
        tracing::debug!(
            lectures = lectures.len(),
            cookies = cookies.len(),
            "session loaded"
        );
        Ok(Self { lectures, cookies })
    }

    /// `Cookie` header value for plain HTTP requests.
    pub fn cookie_header(&self) -> String {
        cookie_header(&self.cookies)
    }
}

pub fn load_lectures(path: &Path) -> Result<Vec<Lecture>, SessionError> {
    read_json(path)
}

pub fn load_cookies(path: &Path) -> Result<Vec<Cookie>, SessionError> {
    read_json(path)
}

/// Joins cookies as `name=value; name=value` in input order.
pub fn cookie_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SessionError> {
    let data = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
