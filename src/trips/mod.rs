//! Trips viewer client

use std::sync::Arc;

use crate::api::ApiClient;
use crate::api::types::Trip;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

/// Bearer-authenticated client for the trips endpoint
pub struct TripsClient {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl TripsClient {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// GET /users/{email}/trips, in backend order
    pub async fn list(&self) -> Result<Vec<Trip>> {
        let email = self.session.email().await?;
        let token = self.session.token().await?;

        match (email, token) {
            (Some(email), Some(token)) => self.api.trips(&email, &token).await,
            _ => Err(ClientError::auth("sign in to view your trips")),
        }
    }
}
