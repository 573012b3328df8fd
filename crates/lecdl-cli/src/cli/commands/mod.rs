//! CLI command handlers. Each command is in its own file.

mod completions;
mod links;
mod run;
mod show_config;

pub use completions::run_completions;
pub use links::run_links;
pub use run::run_download;
pub use show_config::run_show_config;
