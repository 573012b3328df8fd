use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::resolver::DEFAULT_EXTENSION;
use crate::transport::DEFAULT_USER_AGENT;

/// Headless browser settings (optional `[browser]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run without a visible window. Set to false to watch the pages load.
    pub headless: bool,
    /// Chrome/Chromium binary; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    /// Network counts as idle once no new resource was requested for this long.
    pub idle_quiet_ms: u64,
    /// Extra command-line arguments passed to the browser.
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            idle_quiet_ms: 500,
            args: Vec::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/lecdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LecdlConfig {
    /// Lecture manifest (JSON array of `{section, title, url}`).
    pub lectures_path: PathBuf,
    /// Exported browser cookies (JSON array).
    pub cookies_path: PathBuf,
    /// Root of the `<section>/<title><ext>` tree.
    pub download_dir: PathBuf,
    /// Only process the first N lectures of the manifest (None = all).
    pub lecture_limit: Option<usize>,
    /// User-Agent for HEAD/GET requests.
    pub user_agent: String,
    /// CSS selector of the download anchors on a lecture page.
    pub download_selector: String,
    /// Extension used when neither URL nor content-type gives one.
    pub default_extension: String,
    pub browser: BrowserConfig,
}

impl Default for LecdlConfig {
    fn default() -> Self {
        Self {
            lectures_path: PathBuf::from("lectures.json"),
            cookies_path: PathBuf::from("cookies.json"),
            download_dir: PathBuf::from("downloads"),
            lecture_limit: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            download_selector: "a.download".to_string(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            browser: BrowserConfig::default(),
        }
    }
}

impl LecdlConfig {
    /// Pretty TOML, as written by [`load_or_init`].
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lecdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LecdlConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &std::path::Path) -> Result<LecdlConfig> {
    if !path.exists() {
        let default_cfg = LecdlConfig::default();
        let toml = default_cfg.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: LecdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = LecdlConfig::default();
        assert_eq!(cfg.lectures_path, PathBuf::from("lectures.json"));
        assert_eq!(cfg.cookies_path, PathBuf::from("cookies.json"));
        assert_eq!(cfg.download_dir, PathBuf::from("downloads"));
        assert_eq!(cfg.lecture_limit, None);
        assert_eq!(cfg.download_selector, "a.download");
        assert_eq!(cfg.default_extension, ".mp4");
        assert!(cfg.browser.headless);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = LecdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: LecdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            download_dir = "/srv/lectures"
            lecture_limit = 2

            [browser]
            headless = false
        "#;
        let cfg: LecdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, PathBuf::from("/srv/lectures"));
        assert_eq!(cfg.lecture_limit, Some(2));
        assert!(!cfg.browser.headless);
        assert_eq!(cfg.browser.idle_quiet_ms, 500);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, LecdlConfig::default());

        fs::write(&path, "default_extension = \".mkv\"\n").unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.default_extension, ".mkv");
    }

    #[test]
    fn load_or_init_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "lecture_limit = \"two\"\n").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config"));
    }
}
