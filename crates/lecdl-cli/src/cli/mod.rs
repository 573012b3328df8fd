//! CLI for the lecdl lecture downloader.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use lecdl_core::config::{self, LecdlConfig};
use std::path::PathBuf;

use commands::{run_completions, run_download, run_links, run_show_config};

/// Top-level CLI for the lecdl lecture downloader.
#[derive(Debug, Parser)]
#[command(name = "lecdl")]
#[command(about = "lecdl: download lecture media from an authenticated portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the session inputs; unset flags keep the config file values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SessionArgs {
    /// Lecture manifest (JSON array of {section, title, url}).
    #[arg(long, value_name = "PATH")]
    pub lectures: Option<PathBuf>,

    /// Exported browser cookies (JSON array).
    #[arg(long, value_name = "PATH")]
    pub cookies: Option<PathBuf>,

    /// Only visit the first N lectures of the manifest.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    pub headed: bool,
}

impl SessionArgs {
    pub fn apply(&self, cfg: &mut LecdlConfig) {
        if let Some(ref p) = self.lectures {
            cfg.lectures_path = p.clone();
        }
        if let Some(ref p) = self.cookies {
            cfg.cookies_path = p.clone();
        }
        if self.limit.is_some() {
            cfg.lecture_limit = self.limit;
        }
        if self.headed {
            cfg.browser.headless = false;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Visit every lecture page and download its linked media.
    Run {
        #[command(flatten)]
        session: SessionArgs,

        /// Root directory for downloads (default from config: ./downloads).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Visit lecture pages and print the download links without fetching.
    Links {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show the config file location and effective values.
    Config,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell, &mut Cli::command());
            return Ok(());
        }

        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { session, out } => {
                session.apply(&mut cfg);
                if let Some(dir) = out {
                    cfg.download_dir = dir;
                }
                run_download(&cfg).await?;
            }
            CliCommand::Links { session } => {
                session.apply(&mut cfg);
                run_links(&cfg).await?;
            }
            CliCommand::Config => run_show_config(&cfg)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
