//! `lecdl links` – list download links per lecture without fetching.

use anyhow::Result;
use lecdl_core::batch;
use lecdl_core::config::LecdlConfig;
use lecdl_core::navigator::ChromeNavigator;
use lecdl_core::session::Session;

pub async fn run_links(cfg: &LecdlConfig) -> Result<()> {
    let session = Session::load(&cfg.lectures_path, &cfg.cookies_path)?;
    let navigator =
        ChromeNavigator::launch(&cfg.browser, &cfg.download_selector, &session.cookies).await?;

    let pages = batch::collect_links(&session.lectures, navigator, cfg.lecture_limit).await?;
    for (lecture, links) in pages {
        let title = lecture.title.lines().next().unwrap_or_default();
        println!("{} / {} ({} link(s))", lecture.section, title, links.len());
        for link in links {
            println!("  {}", link);
        }
    }
    Ok(())
}
