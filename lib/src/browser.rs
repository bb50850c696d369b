use crate::error::{DogearError, Result};
use crate::tabs::{GroupId, TabColor, TabHost, TabId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Opener = Arc<dyn Fn(&str) -> Result<()> + Send + Sync>;

/// Tab host backed by the system default browser
///
/// Each URL goes to the browser through the platform opener. The opener has
/// no notion of tab groups, so grouping only hands out a local id and the
/// title and color are logged.
pub struct SystemBrowser {
    opener: Opener,
    next_tab: AtomicU64,
    next_group: AtomicU64,
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self::with_opener(open_url)
    }
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opener<F>(opener: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            opener: Arc::new(opener),
            next_tab: AtomicU64::new(0),
            next_group: AtomicU64::new(0),
        }
    }
}

/// Open a single URL in the default browser
pub fn open_url(url: &str) -> Result<()> {
    open::that(url).map_err(|e| DogearError::Host(format!("Failed to open {}: {}", url, e)))
}

#[async_trait]
impl TabHost for SystemBrowser {
    async fn open_tab(&self, url: &str) -> Result<Option<TabId>> {
        // The opener may wait on a child process
        let opener = Arc::clone(&self.opener);
        let owned = url.to_string();
        tokio::task::spawn_blocking(move || opener(&owned))
            .await
            .map_err(|e| DogearError::Host(format!("Failed to open {}: {}", url, e)))??;
        Ok(Some(TabId(self.next_tab.fetch_add(1, Ordering::SeqCst) + 1)))
    }

    async fn group_tabs(&self, tabs: &[TabId]) -> Result<GroupId> {
        let id = GroupId(self.next_group.fetch_add(1, Ordering::SeqCst) + 1);
        log::debug!("Grouped {} tabs as {:?}", tabs.len(), id);
        Ok(id)
    }

    async fn update_group(&self, group: GroupId, title: &str, color: TabColor) -> Result<()> {
        log::info!("Group {} \"{}\" ({})", group.0, title, color);
        Ok(())
    }
}
