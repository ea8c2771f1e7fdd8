//! Chat task observation model
//!
//! A task observed as done or error is terminal: the result endpoint must
//! never be called again for that task id.

use crate::api::types::{TaskStatus, TaskStatusResponse};

/// One observation of a chat task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskObservation {
    Pending,
    Done(String),
    Failed(String),
}

impl TaskObservation {
    /// Returns true if no further polling may occur
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Interpret one result-endpoint response
    pub fn from_response(response: TaskStatusResponse) -> Self {
        match response.status {
            TaskStatus::Done => match response.result {
                Some(text) => Self::Done(text),
                None => Self::Failed("task finished without a result".into()),
            },
            TaskStatus::Error => {
                Self::Failed(response.error.unwrap_or_else(|| "task failed".into()))
            }
            TaskStatus::Pending | TaskStatus::Unknown => Self::Pending,
        }
    }
}
