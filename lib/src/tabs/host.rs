use super::colors::TabColor;
use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

/// Tab and tab-group operations of the host browser
///
/// Implementations report failures as `DogearError::Host` so the message
/// reaches the caller unchanged.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Open `url` in an inactive background tab. A host may not report an id.
    async fn open_tab(&self, url: &str) -> Result<Option<TabId>>;

    /// Bundle tabs into one new group
    async fn group_tabs(&self, tabs: &[TabId]) -> Result<GroupId>;

    /// Set a group's title and color
    async fn update_group(&self, group: GroupId, title: &str, color: TabColor) -> Result<()>;
}

#[async_trait]
impl<T: TabHost + ?Sized> TabHost for std::sync::Arc<T> {
    async fn open_tab(&self, url: &str) -> Result<Option<TabId>> {
        (**self).open_tab(url).await
    }

    async fn group_tabs(&self, tabs: &[TabId]) -> Result<GroupId> {
        (**self).group_tabs(tabs).await
    }

    async fn update_group(&self, group: GroupId, title: &str, color: TabColor) -> Result<()> {
        (**self).update_group(group, title, color).await
    }
}
