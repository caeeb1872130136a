//! Request/response channel to a page agent running on its own task.
//!
//! Each request carries a oneshot reply, so a request yields exactly one
//! response or a messaging failure. A caller that gives up waiting does not
//! cancel the work already handed to the agent.

use std::time::Duration;

use autofill_core_types::Document;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::commands::{PageAgent, Request, Response};
use crate::errors::{AutofillError, Result};

const DEFAULT_BUFFER: usize = 16;

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Sending side of an agent. Cheap to clone; the agent stops once every
/// handle is dropped.
#[derive(Clone)]
pub struct AgentHandle {
    sender: mpsc::Sender<Envelope>,
}

impl AgentHandle {
    pub async fn request(&self, request: Request) -> Result<Response> {
        let action = request.action();
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Envelope { request, reply })
            .await
            .map_err(|_| {
                AutofillError::MessagingFailure(
                    "Could not establish connection. Receiving end does not exist.".into(),
                )
            })?;
        response.await.map_err(|_| {
            warn!(action, "agent dropped the request");
            AutofillError::MessagingFailure(
                "The message port closed before a response was received.".into(),
            )
        })
    }

    /// Like [`AgentHandle::request`], but stop waiting after `timeout`.
    pub async fn request_with_timeout(
        &self,
        request: Request,
        timeout: Duration,
    ) -> Result<Response> {
        let action = request.action();
        tokio::time::timeout(timeout, self.request(request))
            .await
            .map_err(|_| {
                AutofillError::MessagingFailure(format!(
                    "{action} timed out after {}ms",
                    timeout.as_millis()
                ))
            })?
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Run `agent` on a tokio task. The join handle yields the agent back once
/// every [`AgentHandle`] is gone.
pub fn spawn_agent<D>(agent: PageAgent<D>) -> (AgentHandle, JoinHandle<PageAgent<D>>)
where
    D: Document + Send + 'static,
{
    spawn_agent_with_buffer(agent, DEFAULT_BUFFER)
}

pub fn spawn_agent_with_buffer<D>(
    mut agent: PageAgent<D>,
    buffer: usize,
) -> (AgentHandle, JoinHandle<PageAgent<D>>)
where
    D: Document + Send + 'static,
{
    let (sender, mut receiver) = mpsc::channel::<Envelope>(buffer.max(1));
    let task = tokio::spawn(async move {
        while let Some(Envelope { request, reply }) = receiver.recv().await {
            let response = agent.handle(request);
            if reply.send(response).is_err() {
                debug!("caller stopped waiting for the response");
            }
        }
        agent
    });
    (AgentHandle { sender }, task)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::FillerConfig;
    use crate::orchestrator::FormFiller;
    use autofill_core_types::MemoryDocument;

    fn agent() -> PageAgent<MemoryDocument> {
        PageAgent::new(
            MemoryDocument::new("https://www.usvisascheduling.com/en-US/", "Passport"),
            FormFiller::new(Arc::new(FillerConfig::default())),
        )
    }

    #[tokio::test]
    async fn request_gets_exactly_one_response() {
        let (handle, task) = spawn_agent(agent());
        let response = handle.request(Request::GetPageInfo).await.unwrap();
        assert!(matches!(response, Response::PageInfo(_)));
        drop(handle);
        let agent = task.await.unwrap();
        assert!(agent.last_report().is_none());
    }

    #[tokio::test]
    async fn stopped_agent_is_a_messaging_failure() {
        let (handle, task) = spawn_agent(agent());
        task.abort();
        let _ = task.await;
        let err = handle.request(Request::DetectFields).await.unwrap_err();
        assert!(matches!(err, AutofillError::MessagingFailure(_)));
        assert!(handle.is_closed());
    }
}
