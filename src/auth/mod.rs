//! Sign-in and sign-up flows
//!
//! Validation happens client-side before any network call; backend error
//! details are surfaced inline. A successful flow persists the identity in
//! the session store.

use std::sync::Arc;

use tracing::info;

use crate::api::ApiClient;
use crate::api::types::SignUpRequest;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;
use crate::trending::TrendingCache;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 8;

/// Sign-up form fields, including the confirmation that never leaves the
/// client
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validate the form without touching the network
    pub fn validate(&self) -> Result<()> {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
            &self.password,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::auth("Please fill in all required fields."));
        }

        if self.password != self.confirm_password {
            return Err(ClientError::auth("Please ensure both passwords match."));
        }

        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ClientError::auth(
                "Password must be at least 8 characters long.",
            ));
        }

        Ok(())
    }

    fn into_request(self) -> SignUpRequest {
        SignUpRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            password: self.password,
        }
    }
}

/// Client for the authentication endpoints
pub struct AuthClient {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// POST /signin and persist the returned identity
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::auth("Email and password are required."));
        }

        let response = self.api.sign_in(email.trim(), password).await?;
        self.session
            .set_identity(&response.access_token, email.trim())
            .await?;

        info!("Signed in as {}", email.trim());
        Ok(())
    }

    /// Validate, POST /signup, and persist the returned identity
    pub async fn sign_up(&self, form: SignUpForm) -> Result<()> {
        form.validate()?;

        let email = form.email.trim().to_string();
        let response = self.api.sign_up(&form.into_request()).await?;
        self.session
            .set_identity(&response.access_token, &email)
            .await?;

        info!("Account created for {}", email);
        Ok(())
    }

    /// Clear the identity, the current conversation, and the user's
    /// trending cache entry
    pub async fn sign_out(&self, trending: &TrendingCache) -> Result<()> {
        let email = self.session.email().await?;
        trending.evict(email.as_deref()).await?;

        self.session.clear_identity().await?;
        self.session.clear_current_conversation().await?;

        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            phone: "+91 98450 00000".into(),
            email: "asha@example.com".into(),
            password: "wanderlust".into(),
            confirm_password: "wanderlust".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut form = valid_form();
        form.phone = "   ".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("required fields"));
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut form = valid_form();
        form.confirm_password = "different".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("passwords match"));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut form = valid_form();
        form.password = "short".into();
        form.confirm_password = "short".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }
}
