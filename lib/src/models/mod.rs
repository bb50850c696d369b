pub mod collection;
pub mod group;

pub use collection::{Collection, CompiledQuery, Operator, Site, Term, TimeRange};
pub use group::BookmarkGroup;
