//! Wire types for the Wanderpal backend API
//!
//! Bodies are JSON; field names match the backend exactly. The client
//! treats every list as backend-ordered and never re-sorts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for POST /signin
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request body for POST /signup
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Successful auth response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Error body returned by the backend on non-success
#[derive(Debug, Deserialize, Default)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Request body for POST /chat/async
#[derive(Debug, Serialize)]
pub struct ChatSubmitRequest {
    pub message: String,
    pub user_id: Option<String>,
    pub conversation_id: Option<String>,
}

/// Raw response for POST /chat/async; both fields are validated by the
/// chat client before use
#[derive(Debug, Deserialize)]
pub struct ChatSubmitResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Task state reported by GET /chat/result/{task_id}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
    Error,
    /// Unknown state, treated as still running
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Returns true if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// Response for GET /chat/result/{task_id}
#[derive(Debug, Deserialize)]
pub struct TaskStatusResponse {
    pub status: TaskStatus,
    /// Present iff status is done
    #[serde(default)]
    pub result: Option<String>,
    /// Present iff status is error
    #[serde(default)]
    pub error: Option<String>,
}

/// A prior conversation, as listed by GET /conversations
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationsResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// The backend historically used "ai" for assistant turns
    #[serde(alias = "ai")]
    Assistant,
}

/// A message as returned by GET /chat/history/{conversation_id}
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

/// Profile fields for GET/PUT /profile/{email}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// A planned or past trip, from GET /users/{email}/trips
#[derive(Debug, Clone, Deserialize)]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TripsResponse {
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// Address block attached to a trending place
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaceAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl PlaceAddress {
    /// Most specific locality name available
    pub fn locality(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
            .or(self.state.as_deref())
    }
}

/// A trending place record, passed through verbatim from the lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default)]
    pub xid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kinds: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub wikipedia_extracts: Option<String>,
    #[serde(default)]
    pub otm: Option<String>,
    #[serde(default)]
    pub address: Option<PlaceAddress>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub trending: Vec<PlaceRecord>,
}
