// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role authorization middleware.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::auth::{AuthContext, AuthError, Role, RoleRequirement, authorize};
use crate::error::ApiError;

// =============================================================================
// RoleLayer
// =============================================================================

/// Layer admitting only the roles of a [`RoleRequirement`].
///
/// Must run after [`AuthLayer`](super::AuthLayer). Without an
/// [`AuthContext`] in the request the call is refused.
#[derive(Debug, Clone)]
pub struct RoleLayer {
    requirement: RoleRequirement,
}

impl RoleLayer {
    /// Creates a layer enforcing the given requirement.
    pub fn new(requirement: RoleRequirement) -> Self {
        Self { requirement }
    }

    /// Creates a layer admitting the listed roles.
    pub fn allow(roles: &[Role]) -> Self {
        Self::new(RoleRequirement::from(roles))
    }

    /// Returns the enforced requirement.
    pub fn requirement(&self) -> &RoleRequirement {
        &self.requirement
    }
}

impl<S> Layer<S> for RoleLayer {
    type Service = RoleMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RoleMiddleware {
            inner,
            requirement: self.requirement.clone(),
        }
    }
}

// =============================================================================
// RoleMiddleware
// =============================================================================

/// Middleware for role enforcement.
#[derive(Debug, Clone)]
pub struct RoleMiddleware<S> {
    inner: S,
    requirement: RoleRequirement,
}

impl<S> Service<Request<Body>> for RoleMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let requirement = self.requirement.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let auth_ctx = req.extensions().get::<AuthContext>();

            match authorize(auth_ctx, &requirement) {
                Ok(()) => inner.call(req).await,
                Err(err) => {
                    match (&err, auth_ctx) {
                        (AuthError::RoleDenied { role }, Some(ctx)) => {
                            tracing::warn!(
                                request_id = %ctx.request_id(),
                                user_id = %ctx.id(),
                                role = %role,
                                allowed = %requirement,
                                "Role denied"
                            );
                        }
                        _ => {
                            tracing::error!(
                                allowed = %requirement,
                                "Role check reached without an auth context, denying access"
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
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, Identity};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use tower::ServiceExt;

    fn mock_service() -> impl Service<
        Request<Body>,
        Response = Response,
        Error = Infallible,
        Future = impl Future<Output = Result<Response, Infallible>> + Send,
    > + Clone
    + Send {
        tower::service_fn(|_req| async { Ok::<_, Infallible>(Response::new(Body::empty())) })
    }

    fn request_as(role: Option<Role>) -> Request<Body> {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        if let Some(role) = role {
            let claims = Claims::new("u1", "a@example.com", role, 3600);
            req.extensions_mut()
                .insert(AuthContext::from_identity(Identity::verified(claims)));
        }
        req
    }

    #[tokio::test]
    async fn test_admin_admitted() {
        let service = RoleLayer::allow(&[Role::Admin]).layer(mock_service());

        let response = service.oneshot(request_as(Some(Role::Admin))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_denied() {
        let service = RoleLayer::allow(&[Role::Admin]).layer(mock_service());

        let response = service.oneshot(request_as(Some(Role::User))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Access denied: role 'user' is not permitted for this resource"
        );
    }

    #[tokio::test]
    async fn test_multiple_roles() {
        let mut service = RoleLayer::allow(Role::ALL).layer(mock_service());

        for role in Role::ALL {
            let response = service
                .ready()
                .await
                .unwrap()
                .call(request_as(Some(*role)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_no_auth_context() {
        let service = RoleLayer::new(RoleRequirement::admin_only()).layer(mock_service());

        let response = service.oneshot(request_as(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
