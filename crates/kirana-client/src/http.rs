//! # HTTP Core
//!
//! `ApiClient`: the one place requests are built, authenticated, sent, and
//! mapped to [`ApiError`]. Resource modules add typed endpoint functions on
//! top of this.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Request Pipeline                                  │
//! │                                                                         │
//! │  inventory().list(..)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient::get("/inventory/")                                          │
//! │       ├── join onto the fixed base URL                                  │
//! │       ├── attach Authorization: Bearer <token>  (if one is stored)      │
//! │       └── mutating verbs: attach Idempotency-Key: <uuid-v4>             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send → status check → {"detail": ...} extraction → JSON decode         │
//! │                                                                         │
//! │  NO retries. NO caching. NO auto-redirect on 401.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::token::TokenStore;

/// Default per-request timeout. The UI has no spinner-forever mode; a hung
/// backend should surface as an error the operator can see.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The typed HTTP client for the backend.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference counted
/// and the token store is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    tokens: TokenStore,
}

/// Shape of FastAPI-style error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ApiClient {
    /// Creates a client against a fixed base URL.
    pub fn new(base_url: &str, tokens: TokenStore) -> ApiResult<Self> {
        // A trailing slash changes Url::join semantics; normalize it away
        // and keep paths absolute instead.
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(ApiClient { http, base, tokens })
    }

    /// The shared token store (session layer stores/clears through this).
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // =========================================================================
    // Request Builders
    // =========================================================================

    fn endpoint(&self, path: &str) -> String {
        // Url renders an http origin with a trailing "/"; paths here are
        // absolute, so strip it before concatenating.
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(token) = self.tokens.current() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Read request.
    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// Mutating request. Carries an idempotency key so a double-fired
    /// action (double-click, impatient retry) is detectable server-side.
    pub(crate) fn mutate(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.mutate(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.mutate(Method::PUT, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.mutate(Method::DELETE, path)
    }

    /// A request builder without the bearer header; login only.
    pub(crate) fn unauthenticated_post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    /// Sends and decodes a JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.checked(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends a request whose response body we don't care about
    /// (message-only endpoints like `/unpay`).
    pub(crate) async fn send_ok(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.checked(builder).await?;
        Ok(())
    }

    /// Sends and returns the raw body (export blobs, templates).
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> ApiResult<Vec<u8>> {
        let response = self.checked(builder).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn checked(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        debug!(status = %status, detail = %detail, "Backend call failed");

        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { detail })
        } else {
            Err(ApiError::Backend {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let with_slash = ApiClient::new("http://localhost:8000/", TokenStore::in_memory()).unwrap();
        let without = ApiClient::new("http://localhost:8000", TokenStore::in_memory()).unwrap();
        assert_eq!(
            with_slash.endpoint("/inventory/"),
            without.endpoint("/inventory/")
        );
        assert_eq!(
            without.endpoint("/inventory/"),
            "http://localhost:8000/inventory/"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = ApiClient::new("not a url", TokenStore::in_memory());
        assert!(matches!(err, Err(ApiError::InvalidBaseUrl(_))));
    }
}
