//! The lecture loop: visit pages, resolve and fetch every link, summarize.
//!
//! Strictly sequential. The navigation session is owned here and closed on
//! every exit path; blocking HTTP runs one call at a time in `spawn_blocking`.
//! Progress goes out as [`BatchEvent`]s; printing is the caller's business.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LecdlConfig;
use crate::fetcher::{fetch_to, DownloadError, Downloaded};
use crate::naming;
use crate::navigator::LinkSource;
use crate::resolver::resolve_extension;
use crate::session::Lecture;
use crate::transport::Transport;

/// Knobs for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub download_dir: PathBuf,
    /// Only the first N manifest entries are visited (None = all).
    pub lecture_limit: Option<usize>,
    pub default_extension: String,
}

impl From<&LecdlConfig> for BatchOptions {
    fn from(cfg: &LecdlConfig) -> Self {
        Self {
            download_dir: cfg.download_dir.clone(),
            lecture_limit: cfg.lecture_limit,
            default_extension: cfg.default_extension.clone(),
        }
    }
}

/// Status of the run as it progresses, one event per console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Visiting { url: String },
    NoLinks { url: String },
    AlreadyDownloaded { file_name: String },
    Downloaded { file_name: String, bytes: u64 },
    Failed { file_name: String, message: String },
}

impl fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchEvent::Visiting { url } => write!(f, "Visiting: {}", url),
            BatchEvent::NoLinks { .. } => write!(f, "No downloadable links found."),
            BatchEvent::AlreadyDownloaded { file_name } => {
                write!(f, "Already downloaded: {}", file_name)
            }
            BatchEvent::Downloaded { file_name, .. } => write!(f, "Downloaded: {}", file_name),
            BatchEvent::Failed { file_name, message } => {
                write!(f, "Failed: {} - {}", file_name, message)
            }
        }
    }
}

/// Optional progress channel.
pub type EventSender<'a> = Option<&'a tokio::sync::mpsc::Sender<BatchEvent>>;

async fn emit(events: EventSender<'_>, event: BatchEvent) {
    if let Some(tx) = events {
        // Receiver gone only means nobody is watching.
        let _ = tx.send(event).await;
    }
}

/// A link that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub file_name: String,
    pub url: String,
    pub message: String,
}

/// Per-run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lectures_visited: usize,
    pub lectures_without_links: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes: u64,
    pub failures: Vec<Failure>,
}

impl RunSummary {
    pub fn record(&mut self, file_name: &str, url: &str, outcome: &Result<Downloaded, DownloadError>) {
        match outcome {
            Ok(Downloaded::Skipped) => self.skipped += 1,
            Ok(Downloaded::Fetched { bytes }) => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            Err(e) => {
                self.failed += 1;
                self.failures.push(Failure {
                    file_name: file_name.to_string(),
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lecture(s) visited ({} without links): {} downloaded, {} already present, {} failed",
            self.lectures_visited,
            self.lectures_without_links,
            self.downloaded,
            self.skipped,
            self.failed
        )
    }
}

/// The manifest prefix a run covers.
pub fn lectures_to_visit(lectures: &[Lecture], limit: Option<usize>) -> &[Lecture] {
    match limit {
        Some(n) => &lectures[..n.min(lectures.len())],
        None => lectures,
    }
}

/// Visits each lecture and downloads its links into
/// `download_dir/<section>/<title><ext>`.
///
/// Download failures are counted, not returned. A failed page load aborts
/// the run. `navigator` is closed before returning either way.
pub async fn run_batch<N, T>(
    lectures: &[Lecture],
    mut navigator: N,
    transport: Arc<T>,
    opts: &BatchOptions,
    events: EventSender<'_>,
) -> Result<RunSummary>
where
    N: LinkSource,
    T: Transport + 'static,
{
    let result = visit_all(lectures, &mut navigator, &transport, opts, events).await;
    close_quietly(&mut navigator).await;
    result
}

/// Visits pages without downloading; returns each lecture with its links.
pub async fn collect_links<N: LinkSource>(
    lectures: &[Lecture],
    mut navigator: N,
    limit: Option<usize>,
) -> Result<Vec<(Lecture, Vec<String>)>> {
    let mut out = Vec::new();
    let mut result = Ok(());
    for lecture in lectures_to_visit(lectures, limit) {
        match navigator.download_links(&lecture.url).await {
            Ok(links) => out.push((lecture.clone(), links)),
            Err(e) => {
                result = Err(e.context(format!("failed to load lecture page {}", lecture.url)));
                break;
            }
        }
    }
    close_quietly(&mut navigator).await;
    result.map(|()| out)
}

async fn close_quietly<N: LinkSource>(navigator: &mut N) {
    if let Err(e) = navigator.close().await {
        tracing::warn!("closing navigation session failed: {:#}", e);
    }
}

async fn visit_all<N, T>(
    lectures: &[Lecture],
    navigator: &mut N,
    transport: &Arc<T>,
    opts: &BatchOptions,
    events: EventSender<'_>,
) -> Result<RunSummary>
where
    N: LinkSource,
    T: Transport + 'static,
{
    let mut summary = RunSummary::default();

    for lecture in lectures_to_visit(lectures, opts.lecture_limit) {
        emit(events, BatchEvent::Visiting { url: lecture.url.clone() }).await;
        tracing::info!(section = %lecture.section, url = %lecture.url, "visiting lecture");

        let links = navigator
            .download_links(&lecture.url)
            .await
            .with_context(|| format!("failed to load lecture page {}", lecture.url))?;
        summary.lectures_visited += 1;

        if links.is_empty() {
            emit(events, BatchEvent::NoLinks { url: lecture.url.clone() }).await;
            tracing::info!(url = %lecture.url, "no download links");
            summary.lectures_without_links += 1;
            continue;
        }

        let folder = naming::section_dir(&opts.download_dir, &lecture.section);
        tokio::fs::create_dir_all(&folder)
            .await
            .with_context(|| format!("failed to create {}", folder.display()))?;

        for link in links {
            let (file_name, outcome) =
                fetch_link(&link, &lecture.title, &folder, transport, &opts.default_extension)
                    .await?;
            summary.record(&file_name, &link, &outcome);
            let event = match outcome {
                Ok(Downloaded::Skipped) => BatchEvent::AlreadyDownloaded { file_name },
                Ok(Downloaded::Fetched { bytes }) => BatchEvent::Downloaded { file_name, bytes },
                Err(e) => {
                    tracing::warn!(url = %link, file = %file_name, error = %e, "download failed");
                    BatchEvent::Failed {
                        file_name,
                        message: e.to_string(),
                    }
                }
            };
            emit(events, event).await;
        }
    }

    tracing::info!("{}", summary);
    Ok(summary)
}

/// Resolves the extension and downloads one link on the blocking pool.
async fn fetch_link<T: Transport + 'static>(
    link: &str,
    title: &str,
    folder: &Path,
    transport: &Arc<T>,
    default_ext: &str,
) -> Result<(String, Result<Downloaded, DownloadError>)> {
    let link = link.to_string();
    let title = title.to_string();
    let folder = folder.to_path_buf();
    let default_ext = default_ext.to_string();
    let transport = Arc::clone(transport);

    tokio::task::spawn_blocking(move || {
        let ext = resolve_extension(&link, transport.as_ref(), &default_ext);
        let file_name = naming::lecture_file_name(&title, &ext);
        let outcome = fetch_to(&link, &folder.join(&file_name), transport.as_ref());
        (file_name, outcome)
    })
    .await
    .context("download task panicked")
}
