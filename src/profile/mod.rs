//! Profile viewer/editor client

use std::sync::Arc;

use crate::api::ApiClient;
use crate::api::types::Profile;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

/// Bearer-authenticated client for the profile endpoints
pub struct ProfileClient {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl ProfileClient {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    async fn identity(&self) -> Result<(String, String)> {
        let email = self.session.email().await?;
        let token = self.session.token().await?;
        match (email, token) {
            (Some(email), Some(token)) => Ok((email, token)),
            _ => Err(ClientError::auth("sign in to manage your profile")),
        }
    }

    /// GET /profile/{email} for the signed-in user
    pub async fn fetch(&self) -> Result<Profile> {
        let (email, token) = self.identity().await?;
        self.api.profile(&email, &token).await
    }

    /// PUT /profile/{email} for the signed-in user
    pub async fn update(&self, profile: &Profile) -> Result<Profile> {
        let (email, token) = self.identity().await?;
        self.api.update_profile(&email, profile, &token).await
    }
}
