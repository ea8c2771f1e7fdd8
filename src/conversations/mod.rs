//! Conversation list and history clients
//!
//! The sidebar list is non-blocking: fetch failures are logged and degrade
//! to an empty list. History is different: a failed fetch resets the
//! visible conversation to the single welcome message instead of showing a
//! stale or empty pane.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::api::types::{Conversation, HistoryMessage, Role};
use crate::error::Result;

/// Greeting shown when a conversation has no fetched history
pub const WELCOME_MESSAGE: &str = "Hi! I'm your AI travel advisor. I can help you find the \
perfect hotels, plan your trips, and answer any travel questions. What can I help you with today?";

/// A message in the visible transcript. Immutable once appended; display
/// order is insertion order.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn welcome() -> Self {
        Self::assistant(WELCOME_MESSAGE)
    }
}

impl From<HistoryMessage> for Message {
    fn from(m: HistoryMessage) -> Self {
        Self {
            id: m.id,
            role: m.role,
            content: m.content,
            created_at: m.timestamp,
        }
    }
}

/// Client for the user's prior conversations
pub struct Conversations {
    api: std::sync::Arc<ApiClient>,
    entries: RwLock<Vec<Conversation>>,
}

impl Conversations {
    pub fn new(api: std::sync::Arc<ApiClient>) -> Self {
        Self {
            api,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the conversation list in backend order.
    ///
    /// No token means an anonymous user: empty list, no request. A failed
    /// fetch is logged and treated as empty so the sidebar never blocks.
    pub async fn refresh(&self, token: Option<&str>) -> Vec<Conversation> {
        let list = match token {
            None => Vec::new(),
            Some(token) => match self.api.conversations(token).await {
                Ok(list) => list,
                Err(e) => {
                    warn!("Conversation list fetch failed: {}", e);
                    Vec::new()
                }
            },
        };

        if let Ok(mut entries) = self.entries.write() {
            *entries = list.clone();
        }
        list
    }

    /// Last refreshed list, without a network call
    pub fn entries(&self) -> Vec<Conversation> {
        self.entries
            .read()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Fetch a conversation's messages in backend order
    pub async fn history(&self, conversation_id: &str, token: &str) -> Result<Vec<Message>> {
        let history = self.api.history(conversation_id, token).await?;
        Ok(history.into_iter().map(Message::from).collect())
    }

    /// Fetch history, applying the reset contract: on a missing token or
    /// any fetch failure the visible conversation becomes exactly one
    /// welcome message.
    pub async fn load_history(
        &self,
        conversation_id: &str,
        token: Option<&str>,
    ) -> Vec<Message> {
        let Some(token) = token else {
            return vec![Message::welcome()];
        };

        match self.history(conversation_id, token).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("History fetch for {} failed: {}", conversation_id, e);
                vec![Message::welcome()]
            }
        }
    }
}
