//! Request/response channel in front of the orchestrator.
//!
//! Requests are handled one at a time in arrival order, so two callers
//! never interleave tab creation.

use super::host::TabHost;
use super::orchestrator::TabGroupOrchestrator;
use super::pacing::Pacer;
use crate::error::{DogearError, Result};
use crate::models::group::non_empty;
use crate::models::BookmarkGroup;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "createBookmarkGroups", rename_all = "camelCase")]
    CreateBookmarkGroups { bookmark_groups: Vec<BookmarkGroup> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

type Envelope = (Request, oneshot::Sender<Response>);

/// Sending side of a running orchestrator service
///
/// Each handle has at most one request in flight; clone it to queue more.
#[derive(Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<Envelope>,
}

impl OrchestratorHandle {
    pub async fn request(&mut self, request: Request) -> Result<Response> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| DogearError::Channel("service is not running".to_string()))?;
        reply_rx
            .await
            .map_err(|_| DogearError::Channel("service dropped the request".to_string()))
    }

    pub async fn create_bookmark_groups(&mut self, groups: Vec<BookmarkGroup>) -> Result<Response> {
        self.request(Request::CreateBookmarkGroups {
            bookmark_groups: groups,
        })
        .await
    }
}

impl<H: TabHost, P: Pacer> TabGroupOrchestrator<H, P> {
    /// Serve one request. Failures become a `success: false` response.
    pub async fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::CreateBookmarkGroups { bookmark_groups } => {
                let groups = non_empty(bookmark_groups);
                match self.run(&groups).await {
                    Ok(results) => {
                        log::info!("Created {} tab groups", results.len());
                        Response::ok()
                    }
                    Err(e) => Response::failure(e.to_string()),
                }
            }
        }
    }
}

/// Move the orchestrator onto a task and return a handle to it
///
/// The task ends once every handle has been dropped.
pub fn spawn_service<H, P>(orchestrator: TabGroupOrchestrator<H, P>) -> (OrchestratorHandle, JoinHandle<()>)
where
    H: TabHost + 'static,
    P: Pacer + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Envelope>(1);
    let task = tokio::spawn(async move {
        let mut orchestrator = orchestrator;
        while let Some((request, reply)) = rx.recv().await {
            let response = orchestrator.handle(request).await;
            if reply.send(response).is_err() {
                log::debug!("Requester went away before the response was sent");
            }
        }
        log::debug!("Orchestrator service stopped");
    });
    (OrchestratorHandle { tx }, task)
}
