use super::colors::{ColorPicker, TabColor};
use super::host::{GroupId, TabHost, TabId};
use super::pacing::Pacer;
use crate::error::Result;
use crate::models::BookmarkGroup;
use crate::utils;
use std::time::Duration;

pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(500);

/// Outcome of opening one bookmark group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroupResult {
    pub name: String,
    pub tabs: Vec<TabId>,
    /// `None` when the host reported no tab ids to group
    pub group: Option<GroupId>,
    pub color: Option<TabColor>,
}

/// Opens bookmark groups as labeled, colored tab groups, one group at a time
///
/// Tabs are opened strictly in order and never in parallel; the pacing
/// delay between groups only means something if the host sees one
/// operation at a time. The first failing host call ends the run.
pub struct TabGroupOrchestrator<H, P> {
    host: H,
    pacer: P,
    colors: Box<dyn ColorPicker>,
    delay: Duration,
}

impl<H: TabHost, P: Pacer> TabGroupOrchestrator<H, P> {
    pub fn new(host: H, pacer: P, colors: Box<dyn ColorPicker>) -> Self {
        Self {
            host,
            pacer,
            colors,
            delay: DEFAULT_PACING_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Open every group in order, pausing between groups
    pub async fn run(&mut self, groups: &[BookmarkGroup]) -> Result<Vec<TabGroupResult>> {
        log::info!("Processing {} bookmark groups", groups.len());

        let mut results = Vec::with_capacity(groups.len());
        for group in groups {
            if group.is_empty() {
                log::debug!("Skipping empty group '{}'", group.name);
                continue;
            }

            if !results.is_empty() {
                self.pacer.pause(self.delay).await;
            }

            log::info!(
                "Creating group \"{}\" with {} URLs",
                group.name,
                group.urls.len()
            );
            let result = self.open_group(group).await.inspect_err(|e| {
                log::error!("Error creating tabs for group '{}': {}", group.name, e);
            })?;
            results.push(result);
        }

        Ok(results)
    }

    async fn open_group(&mut self, group: &BookmarkGroup) -> Result<TabGroupResult> {
        let mut tabs = Vec::with_capacity(group.urls.len());
        for url in &group.urls {
            let url = utils::ensure_https(url);
            log::debug!("Opening tab: {}", url);
            if let Some(tab) = self.host.open_tab(&url).await? {
                tabs.push(tab);
            }
        }

        if tabs.is_empty() {
            return Ok(TabGroupResult {
                name: group.name.clone(),
                tabs,
                group: None,
                color: None,
            });
        }

        let group_id = self.host.group_tabs(&tabs).await?;
        let color = self.colors.pick();
        self.host.update_group(group_id, &group.name, color).await?;

        Ok(TabGroupResult {
            name: group.name.clone(),
            tabs,
            group: Some(group_id),
            color: Some(color),
        })
    }
}
