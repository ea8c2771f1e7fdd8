//! HTTP client for the Wanderpal backend
//!
//! One thin transport object covering every endpoint the client consumes.
//! Callers decide what a failure means (hard, soft, or synthetic message);
//! this module only maps transport and status errors onto the taxonomy.

pub mod types;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};
use self::types::{
    ChatSubmitRequest, ChatSubmitResponse, Conversation, ConversationsResponse, ErrorDetail,
    HistoryMessage, HistoryResponse, PlaceRecord, Profile, SignInRequest, SignUpRequest,
    TaskStatusResponse, TokenResponse, TrendingResponse, Trip, TripsResponse,
};

/// A validated submit response: both identifiers are guaranteed present
#[derive(Debug, Clone)]
pub struct ChatSubmission {
    pub task_id: String,
    pub conversation_id: String,
}

/// Wanderpal backend API client
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given backend base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::config(format!("invalid backend URL {}: {}", base_url, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Extract the backend's {detail} message from an error body, falling
    /// back to the raw status
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorDetail>(&body) {
            Ok(ErrorDetail { detail: Some(d) }) => d,
            _ => format!("HTTP {}", status),
        }
    }

    fn auth_or_other(status: StatusCode, detail: String) -> ClientError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ClientError::Auth(detail)
        } else {
            ClientError::Other(detail)
        }
    }

    /// POST /signin
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(self.url("/signin"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_detail(response).await));
        }

        Ok(response.json().await?)
    }

    /// POST /signup
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<TokenResponse> {
        let response = self
            .http
            .post(self.url("/signup"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(Self::error_detail(response).await));
        }

        Ok(response.json().await?)
    }

    /// POST /chat/async
    ///
    /// Any non-success status, and any response missing either identifier,
    /// is a `Submission` error. No retry is attempted.
    pub async fn submit_chat(
        &self,
        message: &str,
        user_id: Option<&str>,
        conversation_id: Option<&str>,
        token: Option<&str>,
    ) -> Result<ChatSubmission> {
        let request = ChatSubmitRequest {
            message: message.to_string(),
            user_id: user_id.map(String::from),
            conversation_id: conversation_id.map(String::from),
        };

        debug!(
            "Submitting chat task (conversation: {})",
            conversation_id.unwrap_or("new")
        );

        let mut builder = self.http.post(self.url("/chat/async")).json(&request);
        if let Some(t) = token {
            builder = builder.bearer_auth(t);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::submission(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Submission(Self::error_detail(response).await));
        }

        let raw: ChatSubmitResponse = response
            .json()
            .await
            .map_err(|e| ClientError::submission(format!("malformed submit response: {}", e)))?;

        let task_id = raw
            .task_id
            .ok_or_else(|| ClientError::submission("submit response missing task_id"))?;
        let conversation_id = raw
            .conversation_id
            .ok_or_else(|| ClientError::submission("submit response missing conversation_id"))?;

        debug!("Chat task accepted: {}", task_id);

        Ok(ChatSubmission {
            task_id,
            conversation_id,
        })
    }

    /// GET /chat/result/{task_id}
    pub async fn task_result(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let response = self
            .http
            .get(self.url(&format!("/chat/result/{}", task_id)))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Other(format!(
                "result endpoint returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// GET /conversations (bearer auth)
    pub async fn conversations(&self, token: &str) -> Result<Vec<Conversation>> {
        let response = self
            .http
            .get(self.url("/conversations"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::auth_or_other(
                status,
                Self::error_detail(response).await,
            ));
        }

        let list: ConversationsResponse = response.json().await?;
        Ok(list.conversations)
    }

    /// GET /chat/history/{conversation_id} (bearer auth)
    pub async fn history(
        &self,
        conversation_id: &str,
        token: &str,
    ) -> Result<Vec<HistoryMessage>> {
        let response = self
            .http
            .get(self.url(&format!("/chat/history/{}", conversation_id)))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::auth_or_other(
                status,
                Self::error_detail(response).await,
            ));
        }

        let history: HistoryResponse = response.json().await?;
        Ok(history.history)
    }

    /// GET /profile/{email} (bearer auth)
    pub async fn profile(&self, email: &str, token: &str) -> Result<Profile> {
        let response = self
            .http
            .get(self.url(&format!("/profile/{}", email)))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::auth_or_other(
                status,
                Self::error_detail(response).await,
            ));
        }

        Ok(response.json().await?)
    }

    /// PUT /profile/{email} (bearer auth)
    pub async fn update_profile(
        &self,
        email: &str,
        profile: &Profile,
        token: &str,
    ) -> Result<Profile> {
        let response = self
            .http
            .put(self.url(&format!("/profile/{}", email)))
            .bearer_auth(token)
            .json(profile)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::auth_or_other(
                status,
                Self::error_detail(response).await,
            ));
        }

        Ok(response.json().await?)
    }

    /// GET /users/{email}/trips (bearer auth)
    pub async fn trips(&self, email: &str, token: &str) -> Result<Vec<Trip>> {
        let response = self
            .http
            .get(self.url(&format!("/users/{}/trips", email)))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::auth_or_other(
                status,
                Self::error_detail(response).await,
            ));
        }

        let trips: TripsResponse = response.json().await?;
        Ok(trips.trips)
    }

    /// GET /trending?lat=&lon=
    pub async fn trending(&self, lat: f64, lon: f64) -> Result<Vec<PlaceRecord>> {
        let response = self
            .http
            .get(self.url("/trending"))
            .query(&[("lat", lat), ("lon", lon)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClientError::Other(format!(
                "trending lookup returned {}",
                status
            )));
        }

        let trending: TrendingResponse = response.json().await?;
        Ok(trending.trending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/signin"), "http://localhost:8000/signin");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_task_result_path() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.url(&format!("/chat/result/{}", "task-9")),
            "http://localhost:8000/chat/result/task-9"
        );
    }
}
