use dogear::config::Config;
use dogear::error::{DogearError, Result};
use dogear::store::Catalog;

pub struct AppContext<'a> {
    pub config: &'a Config,
    /// Loaded only for commands that read the content store
    pub catalog: Option<&'a Catalog>,
    pub nc: bool,
}

impl<'a> AppContext<'a> {
    pub fn catalog(&self) -> Result<&'a Catalog> {
        self.catalog
            .ok_or_else(|| DogearError::Other("content store was not loaded".to_string()))
    }
}

pub mod bookmarks;
pub mod catalog;

pub trait DogearCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn DogearCommand>)
pub enum CommandEnum {
    Collections(catalog::CollectionsCommand),
    Sites(catalog::SitesCommand),
    Query(catalog::QueryCommand),
    Export(bookmarks::ExportCommand),
    Preview(bookmarks::PreviewCommand),
    Open(bookmarks::OpenCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Collections(cmd) => cmd.execute(ctx),
            Self::Sites(cmd) => cmd.execute(ctx),
            Self::Query(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Preview(cmd) => cmd.execute(ctx),
            Self::Open(cmd) => cmd.execute(ctx),
        }
    }
}
