//! HTTP-backed identity provider adapter.
//!
//! Talks to the provider's admin REST API with a service credential. The
//! wire shapes here follow the common hosted-identity pattern: account
//! CRUD under `/v1/accounts`, token verification under `/v1/token/verify`,
//! and a JSON error body carrying a stable `code` field.

use crate::error::IdentityError;
use crate::provider::IdentityProvider;
use async_trait::async_trait;
use fundi_core::IdentityUid;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the HTTP identity provider adapter.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Base URL of the provider's admin API (no trailing slash needed).
    pub base_url: String,
    /// Service credential sent as a bearer token on every call.
    pub api_key: String,
    /// Per-request timeout. Defaults to 10 seconds.
    pub timeout: Duration,
}

impl HttpProviderConfig {
    /// Create a configuration with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateAccountRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyTokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    uid: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

/// Identity provider adapter speaking the provider's admin REST API.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

impl HttpIdentityProvider {
    /// Create a new adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Provider`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &HttpProviderConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Read the provider's error body and map it onto the taxonomy.
    async fn error_from_response(response: reqwest::Response) -> IdentityError {
        let status = response.status();
        let body: Option<ErrorResponse> = response.json().await.ok();
        let code = body.as_ref().and_then(|b| b.code.as_deref());

        match (status, code) {
            (StatusCode::CONFLICT, _) | (_, Some("email_exists")) => IdentityError::EmailTaken,
            (StatusCode::NOT_FOUND, _) | (_, Some("account_not_found")) => IdentityError::NotFound,
            (StatusCode::UNAUTHORIZED, Some("invalid_token"))
            | (_, Some("token_expired")) => IdentityError::InvalidToken,
            _ => {
                let detail = body
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| "no error detail".to_string());
                IdentityError::Provider(format!("provider returned {status}: {detail}"))
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<IdentityUid, IdentityError> {
        let response = self
            .client
            .post(self.url("/v1/accounts"))
            .bearer_auth(&self.api_key)
            .json(&CreateAccountRequest {
                email,
                password,
                display_name,
            })
            .send()
            .await
            .map_err(|e| IdentityError::Provider(format!("create_identity request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Provider(format!("malformed create response: {e}")))?;

        let uid = IdentityUid::new(account.uid)
            .map_err(|e| IdentityError::Provider(format!("provider returned bad uid: {e}")))?;

        tracing::debug!(uid = %uid, "Provider identity created");
        Ok(uid)
    }

    async fn delete_identity(&self, uid: &IdentityUid) -> Result<(), IdentityError> {
        let response = self
            .client
            .delete(self.url(&format!("/v1/accounts/{uid}")))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| IdentityError::Provider(format!("delete_identity request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        tracing::debug!(uid = %uid, "Provider identity deleted");
        Ok(())
    }

    async fn verify_token(&self, token: &str) -> Result<IdentityUid, IdentityError> {
        let response = self
            .client
            .post(self.url("/v1/token/verify"))
            .bearer_auth(&self.api_key)
            .json(&VerifyTokenRequest { token })
            .send()
            .await
            .map_err(|e| IdentityError::Provider(format!("verify_token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Provider(format!("malformed verify response: {e}")))?;

        IdentityUid::new(account.uid)
            .map_err(|e| IdentityError::Provider(format!("provider returned bad uid: {e}")))
    }

    fn provider_type(&self) -> &'static str {
        "http"
    }
}
