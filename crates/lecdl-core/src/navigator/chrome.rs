//! Headless Chromium navigator (chromiumoxide).

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, CookieSameSite, TimeSinceEpoch};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::script::{is_idle, link_query_script, RESOURCE_COUNT_JS};
use super::LinkSource;
use crate::config::BrowserConfig;
use crate::session::Cookie;

/// CDP request timeout. Lecture pages may take arbitrarily long; this only
/// guards against a wedged browser.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// One browser process and one page, reused for every lecture.
pub struct ChromeNavigator {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    link_script: String,
    idle_quiet: Duration,
    closed: bool,
}

impl ChromeNavigator {
    /// Launches the browser, opens a blank page and seeds it with `cookies`.
    pub async fn launch(cfg: &BrowserConfig, selector: &str, cookies: &[Cookie]) -> Result<Self> {
        tracing::info!("launching browser (headless={})", cfg.headless);

        let mut builder = CdpConfig::builder()
            .request_timeout(REQUEST_TIMEOUT)
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");
        if !cfg.headless {
            builder = builder.with_head();
        }
        if let Some(ref path) = cfg.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        for arg in &cfg.args {
            builder = builder.arg(arg);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {}", e))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch browser")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler_task.abort();
                return Err(e).context("failed to open page");
            }
        };

        let mut navigator = Self {
            browser,
            page,
            handler_task,
            link_script: link_query_script(selector),
            idle_quiet: Duration::from_millis(cfg.idle_quiet_ms),
            closed: false,
        };
        if let Err(e) = navigator.seed_cookies(cookies).await {
            let _ = navigator.close().await;
            return Err(e);
        }
        Ok(navigator)
    }

    async fn seed_cookies(&self, cookies: &[Cookie]) -> Result<()> {
        let mut params = Vec::with_capacity(cookies.len());
        for cookie in cookies {
            match cookie_param(cookie) {
                Some(p) => params.push(p),
                None => tracing::warn!(
                    "cookie {} has no domain; sent over HTTP only, not set in browser",
                    cookie.name
                ),
            }
        }
        let count = params.len();
        if count > 0 {
            self.page
                .set_cookies(params)
                .await
                .context("failed to set cookies")?;
        }
        tracing::debug!("seeded {} cookie(s) into browser", count);
        Ok(())
    }

    async fn resource_count(&self) -> Result<u64> {
        let count: u64 = self
            .page
            .evaluate(RESOURCE_COUNT_JS)
            .await?
            .into_value()
            .unwrap_or(0);
        Ok(count)
    }

    /// Waits until the page stops fetching resources. No upper bound.
    async fn wait_for_network_idle(&self) -> Result<()> {
        let mut previous = self.resource_count().await?;
        loop {
            tokio::time::sleep(self.idle_quiet).await;
            let current = self.resource_count().await?;
            if is_idle(previous, current) {
                return Ok(());
            }
            previous = current;
        }
    }
}

impl LinkSource for ChromeNavigator {
    async fn download_links(&mut self, url: &str) -> Result<Vec<String>> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("navigation to {} failed", url))?;
        self.wait_for_network_idle().await?;

        let links: Vec<String> = self
            .page
            .evaluate(self.link_script.as_str())
            .await
            .context("link query failed")?
            .into_value()
            .context("link query returned unexpected value")?;
        tracing::debug!(url, count = links.len(), "links extracted");
        Ok(links)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let closed = self.browser.close().await.map(|_| ());
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        tracing::debug!("browser closed");
        closed.context("failed to close browser")
    }
}

impl Drop for ChromeNavigator {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// CDP cookie for `cookie`, or `None` when it lacks a domain.
fn cookie_param(cookie: &Cookie) -> Option<CookieParam> {
    let domain = cookie.domain.as_deref().filter(|d| !d.is_empty())?;
    let mut builder = CookieParam::builder()
        .name(cookie.name.clone())
        .value(cookie.value.clone())
        .domain(domain)
        .path(cookie.path.clone().unwrap_or_else(|| "/".to_string()));
    if let Some(secure) = cookie.secure {
        builder = builder.secure(secure);
    }
    if let Some(http_only) = cookie.http_only {
        builder = builder.http_only(http_only);
    }
    if let Some(expires) = cookie.expires.filter(|e| *e > 0.0) {
        builder = builder.expires(TimeSinceEpoch::new(expires));
    }
    if let Some(same_site) = cookie.same_site.as_deref().and_then(same_site) {
        builder = builder.same_site(same_site);
    }
    builder.build().ok()
}

fn same_site(value: &str) -> Option<CookieSameSite> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" | "no_restriction" => Some(CookieSameSite::None),
        _ => None,
    }
}
