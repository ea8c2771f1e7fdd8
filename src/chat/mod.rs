//! Chat task client
//!
//! Submits a message, then polls the result endpoint on a fixed interval
//! until a terminal observation. The poll series is single-flight per
//! client, runs under an overall deadline, and is cancellable; cancel the
//! token when the active conversation changes or the view tears down.

pub mod task;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ApiClient, ChatSubmission};
use crate::conversations::Conversations;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

pub use self::task::TaskObservation;

/// Interval between result polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Overall deadline for one poll series
pub const DEFAULT_POLL_DEADLINE: Duration = Duration::from_secs(600);

/// Outcome of a successful submit
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub task_id: String,
    pub conversation_id: String,
    /// True when this submit assigned the conversation its id
    pub conversation_created: bool,
}

/// Client for the submit-then-poll chat protocol
pub struct ChatClient {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    conversations: Arc<Conversations>,
    in_flight: AtomicBool,
    poll_interval: Duration,
    poll_deadline: Duration,
}

impl ChatClient {
    pub fn new(
        api: Arc<ApiClient>,
        session: Arc<SessionStore>,
        conversations: Arc<Conversations>,
    ) -> Self {
        Self {
            api,
            session,
            conversations,
            in_flight: AtomicBool::new(false),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_deadline: DEFAULT_POLL_DEADLINE,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = deadline;
        self
    }

    /// True while a submitted task has not reached a terminal observation
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit a message on the current conversation (or start a new one).
    ///
    /// Rejects empty messages and concurrent submits. When the backend
    /// assigns a new conversation id, it is persisted and the conversation
    /// list is refreshed, exactly once each.
    pub async fn submit(&self, message: &str) -> Result<SubmitOutcome> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ClientError::submission("message must not be empty"));
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::submission(
                "a chat task is already in flight; wait for it to finish",
            ));
        }

        match self.submit_inner(trimmed).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.in_flight.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn submit_inner(&self, message: &str) -> Result<SubmitOutcome> {
        let token = self.session.token().await?;
        let user_id = self.session.email().await?;
        let current = self.session.current_conversation().await?;

        let ChatSubmission {
            task_id,
            conversation_id,
        } = self
            .api
            .submit_chat(
                message,
                user_id.as_deref(),
                current.as_deref(),
                token.as_deref(),
            )
            .await?;

        let conversation_created = current.is_none();
        if conversation_created {
            self.session
                .set_current_conversation(&conversation_id)
                .await?;
            self.conversations.refresh(token.as_deref()).await;
            debug!("Conversation created: {}", conversation_id);
        }

        Ok(SubmitOutcome {
            task_id,
            conversation_id,
            conversation_created,
        })
    }

    /// Issue one poll. A transport-level failure terminates the series and
    /// is reported as a generic `Poll` error.
    pub async fn poll(&self, task_id: &str) -> Result<TaskObservation> {
        let response = self.api.task_result(task_id).await.map_err(|e| {
            warn!("Poll transport failure for {}: {}", task_id, e);
            ClientError::poll("could not reach the chat backend")
        })?;

        Ok(TaskObservation::from_response(response))
    }

    /// Poll until the task reaches a terminal observation.
    ///
    /// Returns `Done`/`Failed` as reported by the backend, or an error for
    /// transport failure (`Poll`), deadline expiry (`Timeout`), or
    /// cancellation (`Cancelled`). In every case the single-flight guard is
    /// released and the task id must not be polled again.
    pub async fn wait_for_result(
        &self,
        task_id: &str,
        cancel: &CancellationToken,
    ) -> Result<TaskObservation> {
        let result = self.poll_until_terminal(task_id, cancel).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn poll_until_terminal(
        &self,
        task_id: &str,
        cancel: &CancellationToken,
    ) -> Result<TaskObservation> {
        let deadline = tokio::time::Instant::now() + self.poll_deadline;
        let mut ticker = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Poll loop for {} cancelled", task_id);
                    return Err(ClientError::Cancelled);
                }
                _ = tokio::time::sleep_until(deadline) => {
                    warn!("Task {} did not finish within {:?}", task_id, self.poll_deadline);
                    return Err(ClientError::Timeout);
                }
                _ = ticker.tick() => {
                    let observation = self.poll(task_id).await?;
                    if observation.is_terminal() {
                        debug!("Task {} reached a terminal state", task_id);
                        return Ok(observation);
                    }
                }
            }
        }
    }
}
