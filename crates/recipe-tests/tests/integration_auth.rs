// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Auth Integration Tests
//!
//! The credential gate and role check composed the way routes compose them,
//! in front of a recording inner service.
//!
//! ## Test Categories
//!
//! - `test_gate_*`: authentication gate outcomes
//! - `test_role_*`: role check after the gate
//! - `test_codec_*`: credential verification properties

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use parking_lot::Mutex;
use recipe_api::auth::{MSG_INVALID_TOKEN, MSG_NOT_AUTHENTICATED, VerificationError};
use recipe_api::middleware::{AuthLayer, RoleLayer};
use recipe_api::{AuthContext, Role};
use recipe_tests::prelude::*;
use serde_json::Value;
use tower::{Service, ServiceBuilder, ServiceExt, service_fn};

// =============================================================================
// Test Helpers
// =============================================================================

/// Counts inner service calls and keeps the last attached context.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Option<AuthContext>>>,
}

impl Recorder {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seen(&self) -> Option<AuthContext> {
        self.seen.lock().clone()
    }

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
        service_fn(move |req: Request<Body>| {
            let recorder = self.clone();
            async move {
                recorder.calls.fetch_add(1, Ordering::SeqCst);
                *recorder.seen.lock() = req.extensions().get::<AuthContext>().cloned();
                Ok::<_, Infallible>(StatusCode::OK.into_response())
            }
        })
    }
}

fn request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/protected");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn gate() -> AuthLayer {
    AuthLayer::from_codec(JwtFixtures::codec())
}

// =============================================================================
// Gate Tests
// =============================================================================

#[tokio::test]
async fn test_gate_missing_cookie_is_rejected() {
    init_test_logging();
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let response = svc.oneshot(request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], MSG_NOT_AUTHENTICATED);
    assert_eq!(recorder.calls(), 0);
}

#[tokio::test]
async fn test_gate_empty_cookie_is_rejected() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let response = svc.oneshot(request(Some("token="))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], MSG_NOT_AUTHENTICATED);
    assert_eq!(recorder.calls(), 0);
}

#[tokio::test]
async fn test_gate_garbage_token_is_rejected() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let response = svc.oneshot(request(Some("token=not-a-jwt"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], MSG_INVALID_TOKEN);
    assert_eq!(recorder.calls(), 0);
    assert!(recorder.seen().is_none());
}

#[tokio::test]
async fn test_gate_foreign_secret_is_rejected() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let token = JwtFixtures::other_codec()
        .issue_for("u1", "a@example.com", Role::Admin)
        .unwrap();
    let response = svc
        .oneshot(request(Some(&format!("token={}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(recorder.calls(), 0);
}

#[tokio::test]
async fn test_gate_expired_token_is_rejected() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let token = JwtFixtures::expired_token(&JwtFixtures::codec(), &Subjects::admin());
    let response = svc
        .oneshot(request(Some(&format!("token={}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], MSG_INVALID_TOKEN);
    assert_eq!(recorder.calls(), 0);
}

#[tokio::test]
async fn test_gate_valid_token_attaches_context() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());

    let codec = JwtFixtures::codec();
    let admin = Subjects::admin();
    let token = codec.issue_for(admin.user_id, admin.email, admin.role).unwrap();

    let response = svc
        .oneshot(request(Some(&format!("theme=dark; token={}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(recorder.calls(), 1);

    let ctx = recorder.seen().expect("context attached");
    let expected = codec.verify(&token).unwrap();
    assert_eq!(ctx.user(), expected.claims());
    assert_eq!(ctx.id(), "u1");
    assert_eq!(ctx.email(), "a@example.com");
    assert_eq!(ctx.role(), Role::Admin);
}

#[tokio::test]
async fn test_gate_handles_each_request_independently() {
    let recorder = Recorder::default();
    let mut svc = ServiceBuilder::new().layer(gate()).service(recorder.clone().into_service());
    let token = JwtFixtures::codec().issue_for("u2", "b@example.com", Role::User).unwrap();

    let ok = svc
        .ready()
        .await
        .unwrap()
        .call(request(Some(&format!("token={}", token))))
        .await
        .unwrap();
    let rejected = svc.ready().await.unwrap().call(request(None)).await.unwrap();

    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(recorder.calls(), 1);
}

// =============================================================================
// Role Tests
// =============================================================================

#[tokio::test]
async fn test_role_admin_only_denies_user() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new()
        .layer(gate())
        .layer(RoleLayer::allow(&[Role::Admin]))
        .service(recorder.clone().into_service());

    let token = JwtFixtures::codec().issue_for("u2", "b@example.com", Role::User).unwrap();
    let response = svc
        .oneshot(request(Some(&format!("token={}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("'user'"));
    assert_eq!(recorder.calls(), 0);
}

#[tokio::test]
async fn test_role_admin_only_admits_admin() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new()
        .layer(gate())
        .layer(RoleLayer::allow(&[Role::Admin]))
        .service(recorder.clone().into_service());

    let token = JwtFixtures::codec().issue_for("u1", "a@example.com", Role::Admin).unwrap();
    let response = svc
        .oneshot(request(Some(&format!("token={}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(recorder.calls(), 1);
}

#[tokio::test]
async fn test_role_without_gate_fails_closed() {
    let recorder = Recorder::default();
    let svc = ServiceBuilder::new()
        .layer(RoleLayer::allow(Role::ALL))
        .service(recorder.clone().into_service());

    let response = svc.oneshot(request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(recorder.calls(), 0);
}

// =============================================================================
// Codec Tests
// =============================================================================

#[tokio::test]
async fn test_codec_verification_is_idempotent() {
    let codec = JwtFixtures::codec();
    let token = codec.issue_for("u1", "a@example.com", Role::Admin).unwrap();

    let first = codec.verify(&token).unwrap();
    let second = codec.verify(&token).unwrap();

    assert_eq!(first.claims(), second.claims());
}

#[tokio::test]
async fn test_codec_admin_scenario_lifecycle() {
    let codec = JwtFixtures::codec();
    let t0 = Utc::now().timestamp();
    let claims = JwtFixtures::claims_at(&Subjects::admin(), t0, 3600);
    let token = codec.issue(&claims).unwrap();

    // Inside the window.
    let identity = codec.verify_at(&token, t0 + 10).unwrap();
    assert_eq!(identity.user_id(), "u1");
    assert_eq!(identity.email(), "a@example.com");
    assert_eq!(identity.role(), Role::Admin);
    assert_eq!(identity.claims().iat, t0);
    assert_eq!(identity.claims().exp, t0 + 3600);

    // At and after expiry.
    assert_eq!(codec.verify_at(&token, t0 + 3600), Err(VerificationError::Expired));
    assert_eq!(codec.verify_at(&token, t0 + 3601), Err(VerificationError::Expired));
}

#[tokio::test]
async fn test_codec_tampered_signature_is_rejected() {
    let codec = JwtFixtures::codec();
    let token = codec.issue_for("u1", "a@example.com", Role::Admin).unwrap();

    assert!(codec.verify(&JwtFixtures::tamper(&token)).is_err());
}

#[tokio::test]
async fn test_codec_secret_mismatch() {
    let token = JwtFixtures::other_codec()
        .issue_for("u1", "a@example.com", Role::Admin)
        .unwrap();

    assert_eq!(
        JwtFixtures::codec().verify(&token),
        Err(VerificationError::SecretMismatch)
    );
}
