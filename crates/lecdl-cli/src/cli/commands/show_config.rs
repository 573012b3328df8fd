//! `lecdl config` – show where the config lives and what is in effect.

use anyhow::Result;
use lecdl_core::config::{self, LecdlConfig};

pub fn run_show_config(cfg: &LecdlConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
