//! `lecdl run` – visit lectures and download their media.

use anyhow::Result;
use lecdl_core::batch::{self, BatchEvent, BatchOptions};
use lecdl_core::config::LecdlConfig;
use lecdl_core::navigator::ChromeNavigator;
use lecdl_core::session::Session;
use lecdl_core::transport::CurlTransport;
use std::sync::Arc;

pub async fn run_download(cfg: &LecdlConfig) -> Result<()> {
    let session = Session::load(&cfg.lectures_path, &cfg.cookies_path)?;
    let transport = Arc::new(CurlTransport::new(&session.cookie_header(), &cfg.user_agent));
    let navigator =
        ChromeNavigator::launch(&cfg.browser, &cfg.download_selector, &session.cookies).await?;

    let (events_tx, mut events_rx) = tokio::sync::mpsc::channel::<BatchEvent>(16);
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            println!("{}", event);
        }
    });

    let result = batch::run_batch(
        &session.lectures,
        navigator,
        transport,
        &BatchOptions::from(cfg),
        Some(&events_tx),
    )
    .await;
    drop(events_tx);
    let _ = printer.await;

    let summary = result?;
    println!("{}", summary);
    if summary.failed > 0 {
        tracing::warn!("{} download(s) failed", summary.failed);
        for failure in &summary.failures {
            tracing::debug!(url = %failure.url, "{}: {}", failure.file_name, failure.message);
        }
    }
    Ok(())
}
