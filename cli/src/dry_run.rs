use crate::output::colorize::Palette;
use async_trait::async_trait;
use dogear::error::Result;
use dogear::tabs::{GroupId, TabColor, TabHost, TabId};
use owo_colors::Style;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Tab host that prints what would be opened instead of opening it
pub struct DryRunHost {
    palette: Palette,
    next_id: AtomicU64,
    pending: Mutex<Vec<String>>,
}

impl DryRunHost {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            next_id: AtomicU64::new(0),
            pending: Mutex::new(Vec::new()),
        }
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn take_pending(&self) -> Vec<String> {
        match self.pending.lock() {
            Ok(mut urls) => std::mem::take(&mut *urls),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl TabHost for DryRunHost {
    async fn open_tab(&self, url: &str) -> Result<Option<TabId>> {
        match self.pending.lock() {
            Ok(mut urls) => urls.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        Ok(Some(TabId(self.next())))
    }

    async fn group_tabs(&self, _tabs: &[TabId]) -> Result<GroupId> {
        Ok(GroupId(self.next()))
    }

    async fn update_group(&self, _group: GroupId, title: &str, color: TabColor) -> Result<()> {
        let p = self.palette;
        eprintln!(
            "\n{} [{}]",
            p.paint(title, Style::new().bold().green()),
            p.tab_color(color)
        );
        for url in self.take_pending() {
            eprintln!("  {} {}", p.paint(">", Style::new().red()), url);
        }
        Ok(())
    }
}
