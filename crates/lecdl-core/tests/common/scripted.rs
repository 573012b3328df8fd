//! Link source answering from a fixed page → links table.

use lecdl_core::navigator::LinkSource;
use std::collections::HashMap;

#[derive(Default)]
pub struct ScriptedPages {
    pages: HashMap<String, Vec<String>>,
    pub closed: bool,
}

impl ScriptedPages {
    pub fn new(pages: Vec<(String, Vec<String>)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            closed: false,
        }
    }
}

impl LinkSource for &mut ScriptedPages {
    async fn download_links(&mut self, url: &str) -> anyhow::Result<Vec<String>> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such page: {}", url))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.closed = true;
        Ok(())
    }
}
