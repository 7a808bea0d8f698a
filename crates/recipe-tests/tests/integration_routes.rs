// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Integration Tests
//!
//! Requests through the fully layered router, as a browser would send them.
//!
//! ## Test Categories
//!
//! - `test_routes_*`: per-route access declarations
//! - `test_session_*`: `/api/v1/auth/*`
//! - `test_banner_*`: banner management
//! - `test_category_*`: recipe category management

use axum::http::Method;
use recipe_api::routes::{Access, HttpMethod, ROUTES, find_binding};
use recipe_api::{ApiConfig, JwtConfig};
use recipe_tests::prelude::*;
use serde_json::json;

// =============================================================================
// Access Declarations
// =============================================================================

fn concrete(path: &str) -> String {
    path.replace("{id}", "0190a1b2-0000-7000-8000-000000000000")
}

#[tokio::test]
async fn test_routes_every_guarded_route_rejects_anonymous() {
    init_test_logging();
    let app = TestApp::new();

    for binding in ROUTES.iter().filter(|b| b.access.requires_credential()) {
        let method = Method::from_bytes(binding.method.as_str().as_bytes()).unwrap();
        let response = app.request(method, &concrete(binding.path), None, None).await;

        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "{} {} should require a credential",
            binding.method,
            binding.path
        );
    }
}

#[tokio::test]
async fn test_routes_admin_routes_deny_user() {
    let app = TestApp::new();
    let user = app.cookie_for(&Subjects::user());

    for binding in ROUTES.iter().filter(|b| b.access == Access::ADMIN) {
        let method = Method::from_bytes(binding.method.as_str().as_bytes()).unwrap();
        let body = matches!(binding.method, HttpMethod::Post | HttpMethod::Put)
            .then(|| BannerFixtures::new_banner("Summer"));
        let response = app.request(method, &concrete(binding.path), Some(&user), body).await;

        assert_eq!(
            response.status,
            StatusCode::FORBIDDEN,
            "{} {} should be admin-only",
            binding.method,
            binding.path
        );
    }
}

#[tokio::test]
async fn test_routes_public_routes_need_no_cookie() {
    let app = TestApp::new();

    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    // Hero is public; it is 404 only because none is set.
    let hero = app.get("/api/v1/banners/hero", None).await;
    assert_eq!(hero.status, StatusCode::NOT_FOUND);
    assert_eq!(hero.message(), Some("Hero banner not found"));
}

#[tokio::test]
async fn test_routes_invalid_cookie_on_public_route_is_ignored() {
    let app = TestApp::new();
    let response = app.get("/health", Some("token=garbage")).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_routes_undeclared_method_is_not_gated() {
    let app = TestApp::new();

    let response = app
        .request(Method::PATCH, &concrete("/api/v1/banners/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = app.request(Method::PUT, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_routes_binding_lookup() {
    let binding = find_binding(HttpMethod::Get, "/api/v1/banners/hero").unwrap();
    assert!(!binding.access.requires_credential());

    let binding = find_binding(HttpMethod::Delete, "/api/v1/banners/{id}").unwrap();
    assert_eq!(binding.access, Access::ADMIN);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn test_session_me_returns_claims() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let response = app.get("/api/v1/auth/me", Some(&admin)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["id"], "u1");
    assert_eq!(response.body["data"]["email"], "a@example.com");
    assert_eq!(response.body["data"]["role"], "admin");
    assert_eq!(response.body["data"]["isAuthenticated"], true);
}

#[tokio::test]
async fn test_session_me_admits_user_role() {
    let app = TestApp::new();
    let user = app.cookie_for(&Subjects::user());

    let response = app.get("/api/v1/auth/me", Some(&user)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "user");
}

#[tokio::test]
async fn test_session_expired_cookie_is_rejected() {
    let app = TestApp::new();
    let token = JwtFixtures::expired_token(app.state().codec(), &Subjects::admin());

    let response = app
        .get("/api/v1/auth/me", Some(&format!("token={}", token)))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.message(), Some("Invalid token"));
}

#[tokio::test]
async fn test_session_logout_clears_cookie() {
    let app = TestApp::new();
    let user = app.cookie_for(&Subjects::user());

    let response = app.post("/api/v1/auth/logout", Some(&user), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), Some("Logged out successfully"));
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
}

#[tokio::test]
async fn test_session_logout_without_secure_flag() {
    let app = TestApp::with_config(
        ApiConfig::default()
            .with_jwt(JwtConfig::new(TEST_SECRET))
            .with_secure_cookie(false),
    );
    let user = app.cookie_for(&Subjects::user());

    let response = app.post("/api/v1/auth/logout", Some(&user), None).await;

    assert!(!response.set_cookie().unwrap().contains("Secure"));
}

#[tokio::test]
async fn test_session_logout_requires_credential() {
    let app = TestApp::new();
    let response = app.post("/api/v1/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie().is_none());
}

// =============================================================================
// Banners
// =============================================================================

#[tokio::test]
async fn test_banner_admin_lifecycle() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    // Create two banners.
    let first = app
        .post("/api/v1/banners", Some(&admin), Some(BannerFixtures::new_banner("Summer")))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    let first_id = first.body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(first.body["data"]["isHero"], false);

    let second = app
        .post("/api/v1/banners", Some(&admin), Some(BannerFixtures::new_banner("Winter")))
        .await;
    let second_id = second.body["data"]["id"].as_str().unwrap().to_string();

    let list = app.get("/api/v1/banners", Some(&admin)).await;
    assert_eq!(list.body["data"].as_array().unwrap().len(), 2);

    // Update.
    let updated = app
        .put(
            &format!("/api/v1/banners/{}", first_id),
            Some(&admin),
            json!({ "title": "Late Summer" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["title"], "Late Summer");

    // Hero moves from first to second.
    let hero = app
        .post(&format!("/api/v1/banners/{}/set-hero", first_id), Some(&admin), None)
        .await;
    assert_eq!(hero.status, StatusCode::OK);
    app.post(&format!("/api/v1/banners/{}/set-hero", second_id), Some(&admin), None)
        .await;

    let public_hero = app.get("/api/v1/banners/hero", None).await;
    assert_eq!(public_hero.status, StatusCode::OK);
    assert_eq!(public_hero.body["data"]["id"], second_id.as_str());

    let first_again = app
        .get(&format!("/api/v1/banners/{}", first_id), Some(&admin))
        .await;
    assert_eq!(first_again.body["data"]["isHero"], false);

    // Deleting the hero clears it.
    let deleted = app
        .delete(&format!("/api/v1/banners/{}", second_id), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(
        app.get("/api/v1/banners/hero", None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_banner_validation_error() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let response = app
        .post("/api/v1/banners", Some(&admin), Some(BannerFixtures::invalid_banner()))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
    assert!(app.state().banners().is_empty());
}

#[tokio::test]
async fn test_banner_malformed_json() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let response = app
        .post("/api/v1/banners", Some(&admin), Some(json!({ "title": 42 })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_banner_unknown_id() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let response = app
        .get(&concrete("/api/v1/banners/{id}"), Some(&admin))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_banner_user_cannot_create() {
    let app = TestApp::new();
    let user = app.cookie_for(&Subjects::user());

    let response = app
        .post("/api/v1/banners", Some(&user), Some(BannerFixtures::new_banner("Summer")))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.state().banners().is_empty());
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_admin_lifecycle() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let created = app
        .post("/api/v1/categories", Some(&admin), Some(CategoryFixtures::new_category("Soups")))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let category_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let duplicate = app
        .post("/api/v1/categories", Some(&admin), Some(CategoryFixtures::new_category("soups")))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let sub = app
        .post(
            "/api/v1/subcategories",
            Some(&admin),
            Some(CategoryFixtures::new_sub_category(&category_id, "Cold soups")),
        )
        .await;
    assert_eq!(sub.status, StatusCode::CREATED);
    assert_eq!(sub.body["data"]["categoryName"], "Soups");
    let sub_id = sub.body["data"]["id"].as_str().unwrap().to_string();

    let fetched = app
        .get(&format!("/api/v1/subcategories/{}", sub_id), Some(&admin))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["name"], "Cold soups");
    assert_eq!(fetched.body["data"]["categoryId"], category_id.as_str());

    let children = app
        .get(&format!("/api/v1/categories/{}/subcategories", category_id), Some(&admin))
        .await;
    assert_eq!(children.body["data"].as_array().unwrap().len(), 1);

    let renamed = app
        .put(
            &format!("/api/v1/categories/{}", category_id),
            Some(&admin),
            json!({ "name": "Soups & Stews" }),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    let fetched = app
        .get(&format!("/api/v1/subcategories/{}", sub_id), Some(&admin))
        .await;
    assert_eq!(fetched.body["data"]["categoryName"], "Soups & Stews");

    // A category with sub-categories stays.
    let blocked = app
        .delete(&format!("/api/v1/categories/{}", category_id), Some(&admin))
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    app.delete(&format!("/api/v1/subcategories/{}", sub_id), Some(&admin))
        .await;
    let deleted = app
        .delete(&format!("/api/v1/categories/{}", category_id), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(app.state().categories().is_empty());
}

#[tokio::test]
async fn test_category_sub_category_needs_known_parent() {
    let app = TestApp::new();
    let admin = app.cookie_for(&Subjects::admin());

    let response = app
        .post(
            "/api/v1/subcategories",
            Some(&admin),
            Some(CategoryFixtures::new_sub_category(
                "0190a1b2-0000-7000-8000-000000000000",
                "Orphan",
            )),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["errors"]["fields"][0]["field"], "categoryId");
}

#[tokio::test]
async fn test_category_user_cannot_read_or_create() {
    let app = TestApp::new();
    let user = app.cookie_for(&Subjects::user());

    let list = app.get("/api/v1/categories", Some(&user)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let create = app
        .post("/api/v1/categories", Some(&user), Some(CategoryFixtures::new_category("Soups")))
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
    assert!(app.state().categories().is_empty());
}
