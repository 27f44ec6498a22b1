//! Authentication endpoints.
//!
//! Login is the one unauthenticated call in the client: the backend takes a
//! form-encoded username/password pair and answers with a bearer token plus
//! the identity to display. Storing and clearing that token goes through the
//! shared [`TokenStore`](crate::token::TokenStore) so every clone of the
//! client sees the change at once.

use kirana_core::types::CurrentUser;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
    pub role: String,
}

impl LoginResponse {
    pub fn user(&self) -> CurrentUser {
        CurrentUser {
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Exchanges credentials for a bearer token and stores it.
    ///
    /// On a bad password the backend answers 401 with a detail message,
    /// which surfaces as [`ApiError::Unauthorized`](crate::error::ApiError).
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let form = [("username", username), ("password", password)];
        let response: LoginResponse = self
            .client
            .send_json(self.client.unauthenticated_post("/auth/login").form(&form))
            .await?;

        self.client.tokens().store(&response.access_token)?;
        info!(username = %response.username, role = %response.role, "Logged in");
        Ok(response)
    }

    /// Who the stored token belongs to. Used to resume a saved session.
    pub async fn me(&self) -> ApiResult<CurrentUser> {
        self.client.send_json(self.client.get("/auth/me")).await
    }

    /// Drops the stored token. Purely local; the backend keeps no session.
    pub fn logout(&self) {
        self.client.tokens().clear();
        info!("Logged out");
    }
}
