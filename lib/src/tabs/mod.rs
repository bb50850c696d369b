//! Opening bookmark groups as grouped browser tabs.

pub mod channel;
pub mod colors;
pub mod host;
pub mod orchestrator;
pub mod pacing;

pub use channel::{spawn_service, OrchestratorHandle, Request, Response};
pub use colors::{ColorPicker, RandomColors, TabColor};
pub use host::{GroupId, TabHost, TabId};
pub use orchestrator::{TabGroupOrchestrator, TabGroupResult, DEFAULT_PACING_DELAY};
pub use pacing::{Pacer, TokioPacer};
