//! Bearer-token authentication middleware.
//!
//! Extracts the bearer token, verifies it with the identity provider, and
//! inserts the verified uid into request extensions as
//! [`AuthenticatedIdentity`]. Handlers never see raw tokens.

use crate::error::ApiAuthError;
use axum::{
    body::Body, extract::Request, http::header::AUTHORIZATION, middleware::Next,
    response::Response, Extension,
};
use fundi_core::IdentityUid;
use fundi_identity::{IdentityError, IdentityProvider};
use std::sync::Arc;

/// The verified identity of the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(pub IdentityUid);

/// Middleware that requires a valid bearer token.
///
/// Requires an `Extension<Arc<dyn IdentityProvider>>` layer beneath it.
///
/// # Errors
///
/// - `ApiAuthError::Unauthorized` (401): missing header or failed
///   verification.
pub async fn identity_auth_middleware(
    Extension(provider): Extension<Arc<dyn IdentityProvider>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiAuthError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiAuthError::Unauthorized)?;

    let uid = provider.verify_token(token).await.map_err(|e| match e {
        IdentityError::InvalidToken => ApiAuthError::Unauthorized,
        other => {
            tracing::error!(error = %other, "Token verification failed at the provider");
            ApiAuthError::Provider(other.to_string())
        }
    })?;

    request.extensions_mut().insert(AuthenticatedIdentity(uid));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use fundi_identity::MockIdentityProvider;
    use tower::util::ServiceExt;

    async fn whoami(Extension(identity): Extension<AuthenticatedIdentity>) -> String {
        identity.0.to_string()
    }

    fn app(provider: Arc<MockIdentityProvider>) -> Router {
        let provider: Arc<dyn IdentityProvider> = provider;
        Router::new()
            .route("/", get(whoami))
            .layer(middleware::from_fn(identity_auth_middleware))
            .layer(Extension(provider))
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let app = app(Arc::new(MockIdentityProvider::new()));

        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = app(Arc::new(MockIdentityProvider::new()));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header(AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_identity() {
        let provider = Arc::new(MockIdentityProvider::new());
        let uid = provider
            .create_identity("jane@example.com", "Passw0rd1", "Jane")
            .await
            .unwrap();
        let token = MockIdentityProvider::token_for(&uid);

        let response = app(provider)
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body), uid.to_string());
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let app = app(Arc::new(MockIdentityProvider::new()));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
