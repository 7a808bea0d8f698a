// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! Drives the fully layered router in-process with `tower::ServiceExt`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use recipe_api::{ApiConfig, ApiServer, ApiServerBuilder, AppState};
use serde_json::Value;
use tower::ServiceExt;

use super::fixtures::{ApiFixtures, Subject};

// =============================================================================
// TestResponse
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

impl TestResponse {
    /// Returns the `message` field of the body.
    pub fn message(&self) -> Option<&str> {
        self.body["message"].as_str()
    }

    /// Returns the `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }
}

// =============================================================================
// TestApp
// =============================================================================

/// The API server wired for in-process requests.
pub struct TestApp {
    server: ApiServer,
    router: Router,
}

impl TestApp {
    /// Creates an app with [`ApiFixtures::config`].
    pub fn new() -> Self {
        Self::with_config(ApiFixtures::config())
    }

    /// Creates an app with the given configuration.
    pub fn with_config(config: ApiConfig) -> Self {
        let server = ApiServerBuilder::new()
            .config(config)
            .build()
            .expect("server builds");
        let router = server.router();
        Self { server, router }
    }

    /// Shared application state.
    pub fn state(&self) -> &AppState {
        self.server.state()
    }

    /// Issues a credential for `subject` with the app's codec.
    pub fn token_for(&self, subject: &Subject) -> String {
        self.state()
            .codec()
            .issue_for(subject.user_id, subject.email, subject.role)
            .expect("token issued")
    }

    /// Returns a `Cookie` header value carrying a credential for `subject`.
    pub fn cookie_for(&self, subject: &Subject) -> String {
        format!("token={}", self.token_for(subject))
    }

    /// Sends a raw request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Sends a request with an optional cookie and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    /// GET with an optional cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    /// POST with an optional cookie and body.
    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Option<Value>) -> TestResponse {
        self.request(Method::POST, uri, cookie, body).await
    }

    /// PUT with an optional cookie and body.
    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, cookie, Some(body)).await
    }

    /// DELETE with an optional cookie.
    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, cookie, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
