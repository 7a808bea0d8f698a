// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Cookie credential authentication middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::{AuthContext, AuthError, Identity, TokenCodec, TokenVerifier, cookie};
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer for credential authentication.
///
/// Reads the `token` cookie, verifies it and attaches an [`AuthContext`] to
/// the request. Requests that fail are answered here and never reach the
/// wrapped service.
#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthLayer {
    /// Creates a new auth layer around any verifier.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Creates a new auth layer verifying with the given codec.
    pub fn from_codec(codec: TokenCodec) -> Self {
        Self::new(Arc::new(codec))
    }
}

impl std::fmt::Debug for AuthLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthLayer").finish_non_exhaustive()
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            verifier: self.verifier.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware for credential authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let verifier = self.verifier.clone();
        let token = cookie::extract_token(req.headers());

        // Keep the service that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let request_id = Uuid::now_v7();

            match authenticate(verifier.as_ref(), token.as_deref()).await {
                Ok(identity) => {
                    let auth_ctx = AuthContext::from_identity(identity).with_request_id(request_id);
                    tracing::trace!(
                        request_id = %request_id,
                        user_id = %auth_ctx.id(),
                        role = %auth_ctx.role(),
                        "Request authenticated"
                    );

                    req.extensions_mut().insert(auth_ctx);
                    inner.call(req).await
                }
                Err(err) => {
                    match &err {
                        AuthError::UnexpectedVerificationFailure(detail) => {
                            tracing::error!(
                                request_id = %request_id,
                                error = %detail,
                                "Credential verification failed unexpectedly"
                            );
                        }
                        other => {
                            tracing::debug!(
                                request_id = %request_id,
                                reason = %other,
                                "Authentication rejected"
                            );
                        }
                    }
                    Ok(ApiError::from(err).into_response())
                }
            }
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Runs the authentication decision for an extracted credential.
///
/// An absent or empty credential is [`AuthError::NoCredential`]; every
/// verification failure is mapped through [`AuthError::from`].
pub async fn authenticate(
    verifier: &dyn TokenVerifier,
    token: Option<&str>,
) -> Result<Identity, AuthError> {
    let token = token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::NoCredential)?;

    verifier.verify_token(token).await.map_err(AuthError::from)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, JwtConfig, Role, VerificationError};
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::{StatusCode, header};
    use std::convert::Infallible;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-key-that-is-long-enough-for-testing";

    fn codec() -> TokenCodec {
        TokenCodec::new(JwtConfig::new(SECRET)).unwrap()
    }

    /// Inner service recording how often it ran and which context it saw.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Option<AuthContext>>>,
    }

    impl Recorder {
        fn into_service(
            self,
        ) -> impl Service<
            Request<Body>,
            Response = Response,
            Error = Infallible,
            Future = impl Future<Output = Result<Response, Infallible>> + Send,
        > + Clone
        + Send
        + 'static {
            let calls = self.calls.clone();
            let seen = self.seen.clone();
            tower::service_fn(move |req: Request<Body>| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = req.extensions().get::<AuthContext>().cloned();
                async { Ok::<_, Infallible>(Response::new(Body::empty())) }
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn seen(&self) -> Option<AuthContext> {
            self.seen.lock().unwrap().clone()
        }
    }

    struct FailingVerifier;

    #[async_trait]
    impl TokenVerifier for FailingVerifier {
        async fn verify_token(&self, _token: &str) -> Result<Identity, VerificationError> {
            Err(VerificationError::Unexpected("key store unavailable".into()))
        }
    }

    fn request(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/v1/banners");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn message(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_missing_cookie() {
        let recorder = Recorder::default();
        let service = AuthLayer::from_codec(codec()).layer(recorder.clone().into_service());

        let response = service.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "User not authenticated");
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_cookie() {
        let recorder = Recorder::default();
        let service = AuthLayer::from_codec(codec()).layer(recorder.clone().into_service());

        let response = service.oneshot(request(Some("token="))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "User not authenticated");
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_token() {
        let recorder = Recorder::default();
        let service = AuthLayer::from_codec(codec()).layer(recorder.clone().into_service());

        let response = service
            .oneshot(request(Some("token=not.a.jwt")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "Invalid token");
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let codec = codec();
        let now = chrono::Utc::now().timestamp();
        let token = codec
            .issue(&Claims::issued_at("u1", "a@example.com", Role::Admin, now - 7200, 3600))
            .unwrap();

        let recorder = Recorder::default();
        let service = AuthLayer::from_codec(codec).layer(recorder.clone().into_service());

        let response = service
            .oneshot(request(Some(&format!("token={}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "Invalid token");
        assert!(recorder.seen().is_none());
    }

    #[tokio::test]
    async fn test_valid_token_attaches_context() {
        let codec = codec();
        let token = codec.issue_for("u1", "a@example.com", Role::Admin).unwrap();

        let recorder = Recorder::default();
        let mut service = AuthLayer::from_codec(codec).layer(recorder.clone().into_service());

        let response = service
            .ready()
            .await
            .unwrap()
            .call(request(Some(&format!("theme=dark; token={}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(recorder.calls(), 1);

        let ctx = recorder.seen().unwrap();
        assert_eq!(ctx.id(), "u1");
        assert_eq!(ctx.email(), "a@example.com");
        assert_eq!(ctx.role(), Role::Admin);
        assert!(ctx.is_authenticated());
    }

    #[tokio::test]
    async fn test_unexpected_failure_still_answers() {
        let recorder = Recorder::default();
        let service = AuthLayer::new(Arc::new(FailingVerifier)).layer(recorder.clone().into_service());

        let response = service
            .oneshot(request(Some("token=anything")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "Invalid token");
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let codec = codec();
        let token = codec.issue_for("u2", "b@example.com", Role::User).unwrap();

        assert!(matches!(
            authenticate(&codec, None).await,
            Err(AuthError::NoCredential)
        ));
        assert!(matches!(
            authenticate(&codec, Some("")).await,
            Err(AuthError::NoCredential)
        ));
        assert!(matches!(
            authenticate(&codec, Some("garbage")).await,
            Err(AuthError::InvalidCredential(VerificationError::Malformed(_)))
        ));
        assert_eq!(
            authenticate(&codec, Some(&token)).await.unwrap().user_id(),
            "u2"
        );
    }
}
