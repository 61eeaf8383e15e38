//! Backend account API: collaborator traits plus the HTTP implementation.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call reports
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! "No account" is a normal `Ok(None)`, not an error. Transport, status, and
//! decode failures map to [`ApiError`] and are handled by the caller.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{Account, Session};

/// Errors produced by backend API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with an unexpected HTTP status.
    #[error("unexpected status: {0}")]
    Status(u16),
    /// The response body did not match the expected schema.
    #[error("decode failed: {0}")]
    Decode(String),
    /// No browser transport is available (SSR or native build).
    #[error("backend not available outside the browser")]
    Unavailable,
}

/// Current-account lookups against the backend.
#[async_trait(?Send)]
pub trait AccountService {
    /// Fetch the account behind the active session, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn current_account(&self) -> Result<Option<Account>, ApiError>;

    /// Delete the active session on the backend.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend rejects or never receives the request.
    async fn delete_session(&self) -> Result<(), ApiError>;
}

/// Email + password session creation.
#[async_trait(?Send)]
pub trait SignInService {
    /// Create a session. `Ok(None)` means the credentials were refused.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError>;
}

/// HTTP client for the hosted backend, rooted at `api_base`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    api_base: String,
}

impl HttpBackend {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into().trim_end_matches('/').to_owned() }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn current_account_endpoint(api_base: &str) -> String {
    format!("{api_base}/account/current")
}

#[cfg(any(test, feature = "hydrate"))]
fn sessions_endpoint(api_base: &str) -> String {
    format!("{api_base}/account/sessions")
}

#[cfg(any(test, feature = "hydrate"))]
fn current_session_endpoint(api_base: &str) -> String {
    format!("{api_base}/account/sessions/current")
}

/// Statuses that mean "nobody is signed in" rather than a failure.
#[cfg(any(test, feature = "hydrate"))]
fn is_anonymous_status(status: u16) -> bool {
    matches!(status, 401 | 404)
}

#[async_trait(?Send)]
impl AccountService for HttpBackend {
    async fn current_account(&self) -> Result<Option<Account>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&current_account_endpoint(&self.api_base))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if is_anonymous_status(resp.status()) {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            let account = resp.json::<Account>().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(Some(account))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn delete_session(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(&current_session_endpoint(&self.api_base))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() && !is_anonymous_status(resp.status()) {
                return Err(ApiError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait(?Send)]
impl SignInService for HttpBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&sessions_endpoint(&self.api_base))
                .json(&payload)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if is_anonymous_status(resp.status()) {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            let session = resp.json::<Session>().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(Some(session))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ApiError::Unavailable)
        }
    }
}
